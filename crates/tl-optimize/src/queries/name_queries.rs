// Name queries - which identifiers a function already uses

use std::collections::HashSet;
use tl_core::ast::{Else, Expression, FunctionDeclaration, Statement};

/// Every identifier that may be visible inside `func`.
///
/// Opaque nodes are scanned token-wise, so a name only mentioned inside an
/// uninterpreted statement still counts as taken.
pub fn collect_used_names(func: &FunctionDeclaration) -> HashSet<String> {
    let mut names = HashSet::new();
    names.insert(func.name.name.clone());
    for text in [&func.receiver, &func.type_parameters, &func.result]
        .into_iter()
        .flatten()
    {
        scan_tokens(text, &mut names);
    }
    for param in &func.params {
        if let Some(name) = &param.name {
            names.insert(name.name.clone());
        }
    }
    if let Some(body) = &func.body {
        collect_statements(body, &mut names);
    }
    names
}

fn collect_statements(stmts: &[Statement], names: &mut HashSet<String>) {
    for stmt in stmts {
        match stmt {
            Statement::Conditional(cond) => {
                collect_expression(&cond.condition, names);
                collect_statements(&cond.then_branch, names);
                let mut next = cond.else_branch.as_ref();
                while let Some(else_branch) = next {
                    next = match else_branch {
                        Else::Block(stmts) => {
                            collect_statements(stmts, names);
                            None
                        }
                        Else::If(inner) => {
                            collect_expression(&inner.condition, names);
                            collect_statements(&inner.then_branch, names);
                            inner.else_branch.as_ref()
                        }
                    };
                }
            }
            Statement::Return(ret) => ret
                .results
                .iter()
                .for_each(|expr| collect_expression(expr, names)),
            Statement::Assignment(assign) => assign
                .targets
                .iter()
                .chain(&assign.values)
                .for_each(|expr| collect_expression(expr, names)),
            Statement::Loop(lp) => {
                collect_expression(&lp.condition, names);
                collect_statements(&lp.body, names);
            }
            Statement::Opaque(opaque) => scan_tokens(&opaque.text, names),
        }
    }
}

fn collect_expression(expr: &Expression, names: &mut HashSet<String>) {
    match expr {
        Expression::Identifier(ident) => {
            names.insert(ident.name.clone());
        }
        Expression::Call(call) => {
            collect_expression(&call.callee, names);
            call.arguments
                .iter()
                .for_each(|arg| collect_expression(arg, names));
        }
        Expression::Comparison(cmp) => {
            collect_expression(&cmp.left, names);
            collect_expression(&cmp.right, names);
        }
        Expression::Opaque(text) => scan_tokens(text, names),
    }
}

fn scan_tokens(text: &str, names: &mut HashSet<String>) {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().next().is_some_and(|c| !c.is_ascii_digit()))
        .for_each(|token| {
            names.insert(token.to_string());
        });
}
