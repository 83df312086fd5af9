use serde::{Deserialize, Serialize};

use crate::ast::{ExprCall, Expression, Trivia};

pub type StatementChunk = Vec<Statement>;

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub enum Else {
    Block(StatementChunk),
    If(Box<StmtConditional>),
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct StmtConditional {
    pub condition: Expression,
    pub then_branch: StatementChunk,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub else_branch: Option<Else>,
    #[serde(default, skip_serializing_if = "Trivia::is_empty")]
    pub trivia: Trivia,
}

impl StmtConditional {
    pub fn new(condition: Expression, then_branch: StatementChunk) -> Self {
        Self {
            condition,
            then_branch,
            else_branch: None,
            trivia: Trivia::default(),
        }
    }

    pub fn with_else(mut self, else_branch: Else) -> Self {
        self.else_branch = Some(else_branch);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct StmtReturn {
    pub results: Vec<Expression>,
    #[serde(default, skip_serializing_if = "Trivia::is_empty")]
    pub trivia: Trivia,
}

impl StmtReturn {
    pub fn new(results: Vec<Expression>) -> Self {
        Self {
            results,
            trivia: Trivia::default(),
        }
    }

    /// The call when this returns exactly one call expression.
    pub fn single_call(&self) -> Option<&ExprCall> {
        match self.results.as_slice() {
            [Expression::Call(call)] => Some(call),
            _ => None,
        }
    }
}

/// `targets = values`, or `targets := values` when `declares` is set.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct StmtAssign {
    pub targets: Vec<Expression>,
    pub values: Vec<Expression>,
    pub declares: bool,
    #[serde(default, skip_serializing_if = "Trivia::is_empty")]
    pub trivia: Trivia,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct StmtLoop {
    pub condition: Expression,
    pub body: StatementChunk,
    #[serde(default, skip_serializing_if = "Trivia::is_empty")]
    pub trivia: Trivia,
}

/// Any other statement, kept as its source text.
///
/// The text is stored relative to the statement's own indentation. A block
/// holding nothing but comments keeps them on an opaque statement with
/// empty text.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct StmtOpaque {
    pub text: String,
    #[serde(default, skip_serializing_if = "Trivia::is_empty")]
    pub trivia: Trivia,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub enum Statement {
    Conditional(StmtConditional),
    Return(StmtReturn),
    Assignment(StmtAssign),
    Loop(StmtLoop),
    Opaque(StmtOpaque),
}

impl Statement {
    pub fn conditional(condition: Expression, then_branch: StatementChunk) -> Self {
        Statement::Conditional(StmtConditional::new(condition, then_branch))
    }

    pub fn ret(results: Vec<Expression>) -> Self {
        Statement::Return(StmtReturn::new(results))
    }

    pub fn assign(targets: Vec<Expression>, values: Vec<Expression>) -> Self {
        Statement::Assignment(StmtAssign {
            targets,
            values,
            declares: false,
            trivia: Trivia::default(),
        })
    }

    pub fn declare(targets: Vec<Expression>, values: Vec<Expression>) -> Self {
        Statement::Assignment(StmtAssign {
            targets,
            values,
            declares: true,
            trivia: Trivia::default(),
        })
    }

    pub fn looping(condition: Expression, body: StatementChunk) -> Self {
        Statement::Loop(StmtLoop {
            condition,
            body,
            trivia: Trivia::default(),
        })
    }

    pub fn opaque(text: impl Into<String>) -> Self {
        Statement::Opaque(StmtOpaque {
            text: text.into(),
            trivia: Trivia::default(),
        })
    }

    pub fn with_trivia(mut self, trivia: Trivia) -> Self {
        *self.trivia_mut() = trivia;
        self
    }

    pub fn trivia(&self) -> &Trivia {
        match self {
            Statement::Conditional(cond) => &cond.trivia,
            Statement::Return(ret) => &ret.trivia,
            Statement::Assignment(assign) => &assign.trivia,
            Statement::Loop(lp) => &lp.trivia,
            Statement::Opaque(opaque) => &opaque.trivia,
        }
    }

    pub fn trivia_mut(&mut self) -> &mut Trivia {
        match self {
            Statement::Conditional(cond) => &mut cond.trivia,
            Statement::Return(ret) => &mut ret.trivia,
            Statement::Assignment(assign) => &mut assign.trivia,
            Statement::Loop(lp) => &mut lp.trivia,
            Statement::Opaque(opaque) => &mut opaque.trivia,
        }
    }

    pub fn as_conditional(&self) -> Option<&StmtConditional> {
        match self {
            Statement::Conditional(cond) => Some(cond),
            _ => None,
        }
    }

    pub fn as_return(&self) -> Option<&StmtReturn> {
        match self {
            Statement::Return(ret) => Some(ret),
            _ => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&str> {
        match self {
            Statement::Opaque(opaque) => Some(&opaque.text),
            _ => None,
        }
    }
}

impl From<StmtConditional> for Statement {
    fn from(cond: StmtConditional) -> Self {
        Statement::Conditional(cond)
    }
}

impl From<StmtReturn> for Statement {
    fn from(ret: StmtReturn) -> Self {
        Statement::Return(ret)
    }
}

impl From<StmtAssign> for Statement {
    fn from(assign: StmtAssign) -> Self {
        Statement::Assignment(assign)
    }
}

impl From<StmtLoop> for Statement {
    fn from(lp: StmtLoop) -> Self {
        Statement::Loop(lp)
    }
}

impl From<StmtOpaque> for Statement {
    fn from(opaque: StmtOpaque) -> Self {
        Statement::Opaque(opaque)
    }
}
