//! Tiny evaluator for the integer Go subset used by the scenarios: `if`,
//! conditional `for`, assignments, returns, self-calls, comparisons and
//! `+ - * / %` arithmetic inside opaque expressions.

use std::collections::HashMap;
use tl_core::ast::{ComparisonOp, Else, Expression, SourceUnit, Statement, StmtConditional};

const STEP_LIMIT: usize = 200_000;
const MAX_DEPTH: usize = 256;

type Env = HashMap<String, i64>;

enum Flow {
    Next,
    Return(i64),
}

pub struct Interpreter<'a> {
    unit: &'a SourceUnit,
    steps: usize,
    depth: usize,
}

impl<'a> Interpreter<'a> {
    pub fn new(unit: &'a SourceUnit) -> Self {
        Self {
            unit,
            steps: 0,
            depth: 0,
        }
    }

    /// Calls `name` with fresh step and depth budgets.
    pub fn run(unit: &'a SourceUnit, name: &str, args: &[i64]) -> Result<i64, String> {
        Self::new(unit).call(name, args)
    }

    pub fn call(&mut self, name: &str, args: &[i64]) -> Result<i64, String> {
        let unit = self.unit;
        let func = unit
            .function(name)
            .ok_or_else(|| format!("unknown function {name}"))?;
        let body = func
            .body
            .as_ref()
            .ok_or_else(|| format!("{name} has no body"))?;

        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err("recursion too deep".to_string());
        }
        let mut env = Env::new();
        for (param, value) in func.params.iter().zip(args) {
            if let Some(param_name) = &param.name {
                env.insert(param_name.name.clone(), *value);
            }
        }
        let flow = self.exec_block(body, &mut env)?;
        self.depth -= 1;

        match flow {
            Flow::Return(value) => Ok(value),
            Flow::Next => Err(format!("{name} finished without returning")),
        }
    }

    fn tick(&mut self) -> Result<(), String> {
        self.steps += 1;
        if self.steps > STEP_LIMIT {
            return Err("step limit exceeded".to_string());
        }
        Ok(())
    }

    fn exec_block(&mut self, stmts: &[Statement], env: &mut Env) -> Result<Flow, String> {
        for stmt in stmts {
            if let Flow::Return(value) = self.exec(stmt, env)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Next)
    }

    fn exec(&mut self, stmt: &Statement, env: &mut Env) -> Result<Flow, String> {
        self.tick()?;
        match stmt {
            Statement::Conditional(cond) => self.exec_conditional(cond, env),
            Statement::Return(ret) => {
                let [expr] = ret.results.as_slice() else {
                    return Err("expected exactly one return value".to_string());
                };
                Ok(Flow::Return(self.eval(expr, env)?))
            }
            Statement::Assignment(assign) => {
                // right-hand sides are all evaluated before any target is written
                let mut values = Vec::with_capacity(assign.values.len());
                for value in &assign.values {
                    values.push(self.eval(value, env)?);
                }
                for (target, value) in assign.targets.iter().zip(values) {
                    let Expression::Identifier(ident) = target else {
                        return Err(format!("cannot assign to {target:?}"));
                    };
                    env.insert(ident.name.clone(), value);
                }
                Ok(Flow::Next)
            }
            Statement::Loop(lp) => {
                while self.eval(&lp.condition, env)? != 0 {
                    self.tick()?;
                    if let Flow::Return(value) = self.exec_block(&lp.body, env)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Next)
            }
            Statement::Opaque(opaque) if opaque.text.is_empty() => Ok(Flow::Next),
            Statement::Opaque(opaque) => Err(format!("cannot execute {:?}", opaque.text)),
        }
    }

    fn exec_conditional(&mut self, cond: &StmtConditional, env: &mut Env) -> Result<Flow, String> {
        if self.eval(&cond.condition, env)? != 0 {
            return self.exec_block(&cond.then_branch, env);
        }
        match &cond.else_branch {
            None => Ok(Flow::Next),
            Some(Else::Block(stmts)) => self.exec_block(stmts, env),
            Some(Else::If(inner)) => self.exec_conditional(inner, env),
        }
    }

    fn eval(&mut self, expr: &Expression, env: &Env) -> Result<i64, String> {
        match expr {
            Expression::Identifier(ident) => env
                .get(ident.as_str())
                .copied()
                .ok_or_else(|| format!("unbound {}", ident.name)),
            Expression::Call(call) => {
                let name = call
                    .callee_name()
                    .ok_or_else(|| "only direct calls are supported".to_string())?
                    .to_string();
                let mut args = Vec::with_capacity(call.arguments.len());
                for arg in &call.arguments {
                    args.push(self.eval(arg, env)?);
                }
                self.call(&name, &args)
            }
            Expression::Comparison(cmp) => {
                let left = self.eval(&cmp.left, env)?;
                let right = self.eval(&cmp.right, env)?;
                let holds = match cmp.op {
                    ComparisonOp::Eq => left == right,
                    ComparisonOp::Ne => left != right,
                    ComparisonOp::Lt => left < right,
                    ComparisonOp::Le => left <= right,
                    ComparisonOp::Gt => left > right,
                    ComparisonOp::Ge => left >= right,
                };
                Ok(holds as i64)
            }
            Expression::Opaque(text) => Arith::new(text, env)?.expr(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(i64),
    Name(String),
    Op(char),
}

/// Precedence-climbing evaluator for opaque arithmetic.
struct Arith<'e> {
    tokens: Vec<Token>,
    pos: usize,
    env: &'e Env,
}

impl<'e> Arith<'e> {
    fn new(text: &str, env: &'e Env) -> Result<Self, String> {
        let mut tokens = Vec::new();
        let mut chars = text.chars().peekable();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() {
                chars.next();
            } else if c.is_ascii_digit() {
                let mut digits = String::new();
                while let Some(&d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                    digits.push(d);
                    chars.next();
                }
                tokens.push(Token::Num(digits.parse().map_err(|_| digits.clone())?));
            } else if c.is_alphabetic() || c == '_' {
                let mut name = String::new();
                while let Some(&d) = chars.peek().filter(|d| d.is_alphanumeric() || **d == '_') {
                    name.push(d);
                    chars.next();
                }
                tokens.push(Token::Name(name));
            } else if "+-*/%()".contains(c) {
                tokens.push(Token::Op(c));
                chars.next();
            } else {
                return Err(format!("unsupported character {c:?} in {text:?}"));
            }
        }
        Ok(Self {
            tokens,
            pos: 0,
            env,
        })
    }

    fn peek_op(&self) -> Option<char> {
        match self.tokens.get(self.pos) {
            Some(Token::Op(op)) => Some(*op),
            _ => None,
        }
    }

    fn expr(&mut self) -> Result<i64, String> {
        let mut value = self.term()?;
        while let Some(op @ ('+' | '-')) = self.peek_op() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<i64, String> {
        let mut value = self.factor()?;
        while let Some(op @ ('*' | '/' | '%')) = self.peek_op() {
            self.pos += 1;
            let rhs = self.factor()?;
            if op != '*' && rhs == 0 {
                return Err("division by zero".to_string());
            }
            value = match op {
                '*' => value * rhs,
                '/' => value / rhs,
                _ => value % rhs,
            };
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<i64, String> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| "unexpected end of expression".to_string())?;
        self.pos += 1;
        match token {
            Token::Num(value) => Ok(value),
            Token::Name(name) => self
                .env
                .get(&name)
                .copied()
                .ok_or_else(|| format!("unbound {name}")),
            Token::Op('-') => Ok(-self.factor()?),
            Token::Op('(') => {
                let value = self.expr()?;
                match self.tokens.get(self.pos) {
                    Some(Token::Op(')')) => {
                        self.pos += 1;
                        Ok(value)
                    }
                    _ => Err("missing )".to_string()),
                }
            }
            Token::Op(op) => Err(format!("unexpected {op:?}")),
        }
    }
}
