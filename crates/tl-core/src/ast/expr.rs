use serde::{Deserialize, Serialize};

use crate::ast::Ident;

/// Comparison operators the tree interprets. Every other binary operator is
/// kept inside an [`Expression::Opaque`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub enum ComparisonOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl ComparisonOp {
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "==" => ComparisonOp::Eq,
            "!=" => ComparisonOp::Ne,
            "<" => ComparisonOp::Lt,
            "<=" => ComparisonOp::Le,
            ">" => ComparisonOp::Gt,
            ">=" => ComparisonOp::Ge,
            _ => return None,
        })
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "==",
            ComparisonOp::Ne => "!=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Le => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Ge => ">=",
        }
    }
}

impl std::fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct ExprCall {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
}

impl ExprCall {
    pub fn new(callee: Expression, arguments: Vec<Expression>) -> Self {
        Self {
            callee: Box::new(callee),
            arguments,
        }
    }

    /// Name of the called function when the callee is a bare identifier.
    pub fn callee_name(&self) -> Option<&str> {
        match self.callee.as_ref() {
            Expression::Identifier(ident) => Some(ident.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct ExprComparison {
    pub left: Box<Expression>,
    pub op: ComparisonOp,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub enum Expression {
    Identifier(Ident),
    Call(ExprCall),
    Comparison(ExprComparison),
    /// Any other expression, kept as its source text.
    Opaque(String),
}

impl Expression {
    pub fn ident(name: impl Into<String>) -> Self {
        Expression::Identifier(Ident::new(name))
    }

    pub fn call(callee: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Expression::Call(ExprCall::new(Expression::ident(callee), arguments))
    }

    pub fn comparison(left: Expression, op: ComparisonOp, right: Expression) -> Self {
        Expression::Comparison(ExprComparison {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    pub fn opaque(text: impl Into<String>) -> Self {
        Expression::Opaque(text.into())
    }

    pub fn as_call(&self) -> Option<&ExprCall> {
        match self {
            Expression::Call(call) => Some(call),
            _ => None,
        }
    }

    pub fn as_ident(&self) -> Option<&Ident> {
        match self {
            Expression::Identifier(ident) => Some(ident),
            _ => None,
        }
    }
}

impl From<Ident> for Expression {
    fn from(ident: Ident) -> Self {
        Expression::Identifier(ident)
    }
}

impl From<ExprCall> for Expression {
    fn from(call: ExprCall) -> Self {
        Expression::Call(call)
    }
}

impl From<ExprComparison> for Expression {
    fn from(cmp: ExprComparison) -> Self {
        Expression::Comparison(cmp)
    }
}
