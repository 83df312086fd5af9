//! Go parser built on top of `tree-sitter-go`.
//!
//! Function declarations are mapped into the tailloop syntax tree. Only the
//! statement and expression kinds the rewrite interprets get structured
//! nodes; everything else keeps its exact source text as an opaque node.
//! Comments are never statements: they are attached as trivia to the
//! statement they sit on or above.

use eyre::{eyre, Result};
use tl_core::ast::{
    Comment, CommentPosition, ComparisonOp, Declaration, Else, ExprCall, Expression,
    FunctionDeclaration, Ident, Item, Parameter, SourceUnit, Statement, StatementChunk,
    StmtAssign, StmtConditional, StmtLoop, StmtReturn, Trivia,
};
use tl_core::error::Error as CoreError;
use tl_core::span::Span;
use tracing::{debug, trace};
use tree_sitter::{Node as TsNode, Parser as TsParser};

use crate::layout::dedent;

/// High-level parser that owns a tree-sitter instance for Go.
pub struct GoParser {
    parser: TsParser,
}

impl GoParser {
    /// Create a new parser instance with the Go grammar loaded.
    pub fn new() -> Result<Self> {
        let mut parser = TsParser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|err| eyre!("Failed to load tree-sitter Go grammar: {err}"))?;
        Ok(Self { parser })
    }

    /// Parse Go source into a source unit.
    ///
    /// Any syntax error reported by tree-sitter rejects the whole file; the
    /// returned report wraps a [`CoreError::SyntaxError`] carrying its span.
    pub fn parse_str(&mut self, source: &str) -> Result<SourceUnit> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| eyre!("failed to parse Go source"))?;

        let root = tree.root_node();
        if root.has_error() {
            let bad = first_error(root).unwrap_or(root);
            let what = if bad.is_missing() {
                format!("missing {}", bad.kind())
            } else {
                "unexpected input".to_string()
            };
            return Err(CoreError::syntax(span_of(bad), what).into());
        }

        parse_file(root, source)
    }
}

impl Default for GoParser {
    fn default() -> Self {
        Self::new().expect("GoParser::new should succeed")
    }
}

fn first_error(node: TsNode) -> Option<TsNode> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error() || child.is_missing())
        .find_map(first_error)
}

fn span_of(node: TsNode) -> Span {
    let start = node.start_position();
    Span::new(
        node.start_byte() as u32,
        node.end_byte() as u32,
        start.row as u32 + 1,
        start.column as u32 + 1,
    )
}

fn text<'a>(node: TsNode, source: &'a str) -> Result<&'a str> {
    Ok(node.utf8_text(source.as_bytes())?)
}

/// Whitespace at the start of the line `node` begins on.
fn line_indent<'s>(node: TsNode, source: &'s str) -> &'s str {
    let start = node.start_byte();
    let line_start = source[..start].rfind('\n').map_or(0, |idx| idx + 1);
    let line = &source[line_start..];
    let width = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..width]
}

/// Source text of `node` with continuation lines made relative to its line.
fn verbatim(node: TsNode, source: &str) -> Result<String> {
    Ok(dedent(text(node, source)?, line_indent(node, source)))
}

fn same_line_comment(node: TsNode, source: &str, prev_end: usize) -> Result<Comment> {
    let gap = source
        .get(prev_end..node.start_byte())
        .filter(|gap| !gap.is_empty() && gap.chars().all(|c| c == ' ' || c == '\t'))
        .unwrap_or(" ");
    Ok(Comment::new(CommentPosition::SameLine, verbatim(node, source)?).with_gap(gap))
}

fn parse_file(root: TsNode, source: &str) -> Result<SourceUnit> {
    let mut cursor = root.walk();
    let mut items: Vec<Item> = Vec::new();
    let mut prev_end_row: Option<usize> = None;
    let mut prev_end_byte = 0;

    for child in root.named_children(&mut cursor) {
        let start_row = child.start_position().row;

        // a trailing comment on the same line stays with the declaration before it
        if child.kind() == "comment" && prev_end_row == Some(start_row) {
            if let Some(item) = items.last_mut().filter(|item| item.trailing_comment.is_none()) {
                item.trailing_comment = Some(same_line_comment(child, source, prev_end_byte)?);
                prev_end_byte = child.end_byte();
                continue;
            }
        }

        let decl = match child.kind() {
            "function_declaration" | "method_declaration" => {
                Declaration::Function(parse_function(child, source)?)
            }
            kind => {
                trace!("keeping top-level {kind} verbatim");
                Declaration::Opaque(text(child, source)?.to_string())
            }
        };
        let blank_line_before = prev_end_row.is_some_and(|row| start_row > row + 1);
        items.push(Item {
            blank_line_before,
            decl,
            trailing_comment: None,
        });
        prev_end_row = Some(child.end_position().row);
        prev_end_byte = child.end_byte();
    }

    debug!("parsed {} top-level declarations", items.len());
    Ok(SourceUnit::new(items))
}

fn parse_function(node: TsNode, source: &str) -> Result<FunctionDeclaration> {
    let name_node = node
        .child_by_field_name("name")
        .ok_or_else(|| eyre!("function declaration missing name"))?;
    let name = Ident::new(text(name_node, source)?);

    let field_text = |field: &str| -> Result<Option<String>> {
        node.child_by_field_name(field)
            .map(|child| text(child, source).map(str::to_string))
            .transpose()
    };

    let params = node
        .child_by_field_name("parameters")
        .map(|node| parse_parameter_list(node, source))
        .transpose()?
        .unwrap_or_default();

    let body_node = node.child_by_field_name("body");
    let header_end = body_node.map_or(node.end_byte(), |body| body.start_byte());
    let signature = source
        .get(node.start_byte()..header_end)
        .map(|header| header.trim_end().to_string());
    let body = body_node
        .map(|node| parse_block(node, source))
        .transpose()?;

    Ok(FunctionDeclaration {
        name,
        receiver: field_text("receiver")?,
        type_parameters: field_text("type_parameters")?,
        params,
        result: field_text("result")?,
        signature,
        body,
    })
}

fn parse_parameter_list(node: TsNode, source: &str) -> Result<Vec<Parameter>> {
    let mut params = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "parameter_declaration" | "variadic_parameter_declaration" => {
                params.extend(parse_parameter_declaration(child, source)?);
            }
            _ => {}
        }
    }
    Ok(params)
}

fn parse_parameter_declaration(node: TsNode, source: &str) -> Result<Vec<Parameter>> {
    let ty_node = node
        .child_by_field_name("type")
        .ok_or_else(|| eyre!("parameter missing type"))?;
    let mut ty = text(ty_node, source)?.to_string();
    if node.kind() == "variadic_parameter_declaration" {
        ty = format!("...{ty}");
    }

    let mut names = Vec::new();
    let mut cursor = node.walk();
    for child in node.children_by_field_name("name", &mut cursor) {
        names.push(Ident::new(text(child, source)?));
    }

    if names.is_empty() {
        return Ok(vec![Parameter::unnamed(ty)]);
    }

    Ok(names
        .into_iter()
        .map(|name| Parameter::new(name, ty.clone()))
        .collect())
}

fn block_elements<'t>(node: TsNode<'t>, out: &mut Vec<TsNode<'t>>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            // newer grammars wrap the statements of a block in a list node
            "statement_list" => block_elements(child, out),
            "empty_statement" => {}
            _ => out.push(child),
        }
    }
}

/// Parses the statements of a `{ ... }` block, attaching comments as trivia.
///
/// A comment on the same line as the end of a statement trails it; any other
/// comment leads the next statement, or trails the last one when nothing
/// follows.
fn parse_block(node: TsNode, source: &str) -> Result<StatementChunk> {
    let mut elements = Vec::new();
    block_elements(node, &mut elements);

    let mut stmts: StatementChunk = Vec::new();
    let mut pending: Vec<Comment> = Vec::new();
    // the opening brace
    let mut prev_row = node.start_position().row;
    let mut prev_end = node.start_byte() + 1;

    for element in elements {
        let start_row = element.start_position().row;
        if element.kind() == "comment" {
            let comment = if start_row == prev_row {
                same_line_comment(element, source, prev_end)?
            } else if start_row > prev_row + 1 {
                Comment::new(CommentPosition::AfterBlankLine, verbatim(element, source)?)
            } else {
                Comment::line(verbatim(element, source)?)
            };
            match stmts.last_mut() {
                Some(last) if start_row == prev_row && pending.is_empty() => {
                    last.trivia_mut().trailing.push(comment)
                }
                _ => pending.push(comment),
            }
        } else {
            let trivia = Trivia {
                blank_line_before: start_row > prev_row + 1,
                leading: std::mem::take(&mut pending),
                trailing: Vec::new(),
            };
            stmts.push(parse_statement(element, source)?.with_trivia(trivia));
        }
        prev_row = element.end_position().row;
        prev_end = element.end_byte();
    }

    if !pending.is_empty() {
        match stmts.last_mut() {
            Some(last) => last.trivia_mut().trailing.append(&mut pending),
            None => stmts.push(Statement::opaque("").with_trivia(Trivia {
                trailing: pending,
                ..Trivia::default()
            })),
        }
    }
    Ok(stmts)
}

/// Whether a comment sits inside `node` outside of any nested block.
fn has_loose_comment(node: TsNode) -> bool {
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().any(|child| match child.kind() {
        "comment" => true,
        "block" => false,
        _ => has_loose_comment(child),
    })
}

/// Statements with a comment outside their blocks stay opaque so the
/// comment is never lost.
fn parse_statement(node: TsNode, source: &str) -> Result<Statement> {
    if has_loose_comment(node) {
        return Ok(Statement::opaque(verbatim(node, source)?));
    }
    let parsed = match node.kind() {
        "if_statement" => parse_if_statement(node, source)?.map(Statement::from),
        "return_statement" => Some(Statement::from(parse_return_statement(node, source)?)),
        "assignment_statement" => parse_assignment(node, source, false)?.map(Statement::from),
        "short_var_declaration" => parse_assignment(node, source, true)?.map(Statement::from),
        "for_statement" => parse_for_statement(node, source)?.map(Statement::from),
        _ => None,
    };
    match parsed {
        Some(stmt) => Ok(stmt),
        None => Ok(Statement::opaque(verbatim(node, source)?)),
    }
}

/// `None` when the `if` (or any `else if` in its chain) has an init statement.
fn parse_if_statement(node: TsNode, source: &str) -> Result<Option<StmtConditional>> {
    if node.child_by_field_name("initializer").is_some() {
        return Ok(None);
    }
    let condition = node
        .child_by_field_name("condition")
        .ok_or_else(|| eyre!("if statement missing condition"))?;
    let consequence = node
        .child_by_field_name("consequence")
        .ok_or_else(|| eyre!("if statement missing body"))?;

    let else_branch = match node.child_by_field_name("alternative") {
        None => None,
        Some(alt) if alt.kind() == "if_statement" => match parse_if_statement(alt, source)? {
            Some(inner) => Some(Else::If(Box::new(inner))),
            None => return Ok(None),
        },
        Some(alt) => Some(Else::Block(parse_block(alt, source)?)),
    };

    Ok(Some(StmtConditional {
        condition: parse_expr(condition, source)?,
        then_branch: parse_block(consequence, source)?,
        else_branch,
        trivia: Trivia::default(),
    }))
}

fn parse_return_statement(node: TsNode, source: &str) -> Result<StmtReturn> {
    let mut results = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "expression_list" => results.extend(parse_expression_list(child, source)?),
            _ => results.push(parse_expr(child, source)?),
        }
    }
    Ok(StmtReturn::new(results))
}

fn parse_assignment(node: TsNode, source: &str, declares: bool) -> Result<Option<StmtAssign>> {
    if !declares {
        let op = node
            .child_by_field_name("operator")
            .map(|op| text(op, source))
            .transpose()?;
        if op != Some("=") {
            return Ok(None);
        }
    }
    let left = node
        .child_by_field_name("left")
        .ok_or_else(|| eyre!("assignment missing left side"))?;
    let right = node
        .child_by_field_name("right")
        .ok_or_else(|| eyre!("assignment missing right side"))?;

    Ok(Some(StmtAssign {
        targets: parse_expression_list(left, source)?,
        values: parse_expression_list(right, source)?,
        declares,
        trivia: Trivia::default(),
    }))
}

/// Only the `for cond { ... }` form is structured.
fn parse_for_statement(node: TsNode, source: &str) -> Result<Option<StmtLoop>> {
    let body = node
        .child_by_field_name("body")
        .ok_or_else(|| eyre!("for statement missing body"))?;

    let mut header = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.id() != body.id() {
            header.push(child);
        }
    }

    match header.as_slice() {
        [cond] if !matches!(cond.kind(), "for_clause" | "range_clause") => Ok(Some(StmtLoop {
            condition: parse_expr(*cond, source)?,
            body: parse_block(body, source)?,
            trivia: Trivia::default(),
        })),
        _ => Ok(None),
    }
}

fn parse_expression_list(node: TsNode, source: &str) -> Result<Vec<Expression>> {
    if node.kind() != "expression_list" {
        return Ok(vec![parse_expr(node, source)?]);
    }
    let mut exprs = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        exprs.push(parse_expr(child, source)?);
    }
    Ok(exprs)
}

fn parse_expr(node: TsNode, source: &str) -> Result<Expression> {
    let parsed = match node.kind() {
        "identifier" => Some(Expression::ident(text(node, source)?)),
        "call_expression" => parse_call_expression(node, source)?,
        "binary_expression" => parse_binary_expression(node, source)?,
        _ => None,
    };
    match parsed {
        Some(expr) => Ok(expr),
        None => Ok(Expression::Opaque(verbatim(node, source)?)),
    }
}

fn parse_call_expression(node: TsNode, source: &str) -> Result<Option<Expression>> {
    if node.child_by_field_name("type_arguments").is_some() {
        return Ok(None);
    }
    let func_node = node
        .child_by_field_name("function")
        .ok_or_else(|| eyre!("call expression missing function"))?;
    let args_node = node
        .child_by_field_name("arguments")
        .ok_or_else(|| eyre!("call expression missing arguments"))?;

    let mut args = Vec::new();
    let mut cursor = args_node.walk();
    for child in args_node.children(&mut cursor) {
        // `f(xs...)` has no structured form
        if child.kind() == "..." {
            return Ok(None);
        }
        if child.is_named() {
            args.push(parse_expr(child, source)?);
        }
    }

    let callee = parse_expr(func_node, source)?;
    Ok(Some(Expression::Call(ExprCall::new(callee, args))))
}

fn parse_binary_expression(node: TsNode, source: &str) -> Result<Option<Expression>> {
    let operator = node
        .child_by_field_name("operator")
        .ok_or_else(|| eyre!("binary expression missing operator"))?;
    let Some(op) = ComparisonOp::from_token(text(operator, source)?) else {
        return Ok(None);
    };
    let left = node
        .child_by_field_name("left")
        .ok_or_else(|| eyre!("binary expression missing left operand"))?;
    let right = node
        .child_by_field_name("right")
        .ok_or_else(|| eyre!("binary expression missing right operand"))?;

    Ok(Some(Expression::comparison(
        parse_expr(left, source)?,
        op,
        parse_expr(right, source)?,
    )))
}
