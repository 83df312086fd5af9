//! Go source serializer for the tailloop syntax tree.

use itertools::Itertools;
use tl_core::ast::{
    AstSerializer, Comment, CommentPosition, Declaration, Else, Expression, FunctionDeclaration,
    Parameter, SourceUnit, Statement, StmtAssign, StmtConditional, StmtLoop,
};
use tl_core::error::Result;

use crate::layout::indent_continuation;

/// Public entry point used by the CLI.
#[derive(Clone, Debug)]
pub struct GoSerializer {
    indent: String,
}

impl GoSerializer {
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }
}

impl Default for GoSerializer {
    fn default() -> Self {
        Self::new("\t")
    }
}

impl AstSerializer for GoSerializer {
    fn serialize_unit(&self, unit: &SourceUnit) -> Result<String> {
        let mut emitter = GoEmitter::new(&self.indent);
        emitter.emit_unit(unit);
        Ok(emitter.finish())
    }

    fn serialize_function(&self, func: &FunctionDeclaration) -> Result<String> {
        let mut emitter = GoEmitter::new(&self.indent);
        emitter.emit_function(func);
        Ok(emitter.finish())
    }

    fn serialize_stmt(&self, stmt: &Statement) -> Result<String> {
        let mut emitter = GoEmitter::new(&self.indent);
        emitter.emit_stmt(stmt);
        Ok(emitter.finish())
    }

    fn serialize_expr(&self, expr: &Expression) -> Result<String> {
        Ok(render_expr(expr))
    }
}

struct GoEmitter<'a> {
    code: String,
    indent: usize,
    indent_unit: &'a str,
}

impl<'a> GoEmitter<'a> {
    fn new(indent_unit: &'a str) -> Self {
        Self {
            code: String::new(),
            indent: 0,
            indent_unit,
        }
    }

    fn finish(mut self) -> String {
        let trimmed = self.code.trim_end().len();
        self.code.truncate(trimmed);
        self.code.push('\n');
        self.code
    }

    fn current_indent(&self) -> String {
        self.indent_unit.repeat(self.indent)
    }

    /// Writes `line` at the current depth; continuation lines are re-indented.
    fn push_line(&mut self, line: &str) {
        let indent = self.current_indent();
        self.code.push_str(&indent);
        self.code.push_str(&indent_continuation(line, &indent));
        self.code.push('\n');
    }

    fn blank_line(&mut self) {
        if !self.code.is_empty() {
            self.code.push('\n');
        }
    }

    fn append_to_last_line(&mut self, gap: &str, text: &str) {
        if !self.code.ends_with('\n') {
            self.push_line(text);
            return;
        }
        self.code.pop();
        self.code.push_str(if gap.is_empty() { " " } else { gap });
        let indent = self.current_indent();
        self.code.push_str(&indent_continuation(text, &indent));
        self.code.push('\n');
    }

    fn emit_comments(&mut self, comments: &[Comment]) {
        for comment in comments {
            match comment.position {
                CommentPosition::SameLine => self.append_to_last_line(&comment.gap, &comment.text),
                CommentPosition::NextLine => self.push_line(&comment.text),
                CommentPosition::AfterBlankLine => {
                    self.blank_line();
                    self.push_line(&comment.text);
                }
            }
        }
    }

    fn emit_unit(&mut self, unit: &SourceUnit) {
        for (idx, item) in unit.items.iter().enumerate() {
            if idx > 0 && item.blank_line_before {
                self.code.push('\n');
            }
            match &item.decl {
                Declaration::Function(func) => self.emit_function(func),
                Declaration::Opaque(text) => self.push_line(text),
            }
            if let Some(comment) = &item.trailing_comment {
                self.append_to_last_line(&comment.gap, &comment.text);
            }
        }
    }

    fn emit_function(&mut self, func: &FunctionDeclaration) {
        let mut header = match &func.signature {
            Some(signature) => signature.clone(),
            None => render_signature(func),
        };

        match &func.body {
            None => self.push_line(&header),
            Some(body) => {
                header.push_str(" {");
                self.push_line(&header);
                self.emit_block_body(body);
                self.push_line("}");
            }
        }
    }

    fn emit_block_body(&mut self, stmts: &[Statement]) {
        self.indent += 1;
        for stmt in stmts {
            self.emit_stmt(stmt);
        }
        self.indent -= 1;
    }

    fn emit_stmt(&mut self, stmt: &Statement) {
        let trivia = stmt.trivia();
        self.emit_comments(&trivia.leading);
        if trivia.blank_line_before {
            self.blank_line();
        }
        match stmt {
            Statement::Conditional(cond) => self.emit_conditional(cond),
            Statement::Return(ret) => {
                if ret.results.is_empty() {
                    self.push_line("return");
                } else {
                    self.push_line(&format!("return {}", render_list(&ret.results)));
                }
            }
            Statement::Assignment(assign) => self.push_line(&render_assign(assign)),
            Statement::Loop(lp) => self.emit_loop(lp),
            Statement::Opaque(opaque) => {
                if !opaque.text.is_empty() {
                    self.push_line(&opaque.text);
                }
            }
        }
        self.emit_comments(&trivia.trailing);
    }

    fn emit_conditional(&mut self, cond: &StmtConditional) {
        self.push_line(&format!("if {} {{", render_expr(&cond.condition)));
        self.emit_block_body(&cond.then_branch);

        let mut next = cond.else_branch.as_ref();
        while let Some(else_branch) = next {
            match else_branch {
                Else::Block(stmts) => {
                    self.push_line("} else {");
                    self.emit_block_body(stmts);
                    next = None;
                }
                Else::If(inner) => {
                    self.push_line(&format!("}} else if {} {{", render_expr(&inner.condition)));
                    self.emit_block_body(&inner.then_branch);
                    next = inner.else_branch.as_ref();
                }
            }
        }
        self.push_line("}");
    }

    fn emit_loop(&mut self, lp: &StmtLoop) {
        self.push_line(&format!("for {} {{", render_expr(&lp.condition)));
        self.emit_block_body(&lp.body);
        self.push_line("}");
    }
}

/// Header for a declaration built in memory rather than parsed.
fn render_signature(func: &FunctionDeclaration) -> String {
    let mut header = String::from("func ");
    if let Some(receiver) = &func.receiver {
        header.push_str(receiver);
        header.push(' ');
    }
    header.push_str(func.name.as_str());
    if let Some(type_parameters) = &func.type_parameters {
        header.push_str(type_parameters);
    }
    header.push('(');
    header.push_str(&render_params(&func.params));
    header.push(')');
    if let Some(result) = &func.result {
        header.push(' ');
        header.push_str(result);
    }
    header
}

/// Groups consecutive named parameters sharing a type: `a, b int`.
fn render_params(params: &[Parameter]) -> String {
    params
        .iter()
        .chunk_by(|param| (param.name.is_some(), param.ty.clone()))
        .into_iter()
        .flat_map(|((named, ty), group)| {
            if named {
                let names = group
                    .filter_map(|param| param.name.as_ref())
                    .map(|name| name.as_str())
                    .join(", ");
                vec![format!("{names} {ty}")]
            } else {
                group.map(|_| ty.clone()).collect()
            }
        })
        .join(", ")
}

fn render_assign(assign: &StmtAssign) -> String {
    let op = if assign.declares { ":=" } else { "=" };
    format!(
        "{} {op} {}",
        render_list(&assign.targets),
        render_list(&assign.values)
    )
}

fn render_list(exprs: &[Expression]) -> String {
    exprs.iter().map(render_expr).join(", ")
}

pub fn render_expr(expr: &Expression) -> String {
    match expr {
        Expression::Identifier(ident) => ident.name.clone(),
        Expression::Call(call) => format!(
            "{}({})",
            render_expr(&call.callee),
            render_list(&call.arguments)
        ),
        Expression::Comparison(cmp) => format!(
            "{} {} {}",
            render_expr(&cmp.left),
            cmp.op,
            render_expr(&cmp.right)
        ),
        Expression::Opaque(text) => text.clone(),
    }
}
