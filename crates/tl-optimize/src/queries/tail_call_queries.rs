// Tail-call queries - locating the recursive return and the base-case guard

use tl_core::ast::{Else, ExprCall, Statement, StmtConditional, StmtReturn};

/// A `return f(...)` where `f` is the enclosing function itself.
#[derive(Debug, Clone, Copy)]
pub struct TailCall<'a> {
    /// The return statement, for identity comparison against the body.
    pub stmt: &'a Statement,
    pub ret: &'a StmtReturn,
    pub call: &'a ExprCall,
}

/// Depth-first search for the first return of a direct self-call.
///
/// Descends into both branches of conditionals and into loop bodies, in
/// source order. Opaque statements are never looked into.
pub fn find_tail_call<'a>(name: &str, body: &'a [Statement]) -> Option<TailCall<'a>> {
    body.iter().find_map(|stmt| find_in_statement(name, stmt))
}

fn find_in_statement<'a>(name: &str, stmt: &'a Statement) -> Option<TailCall<'a>> {
    match stmt {
        Statement::Return(ret) => ret
            .single_call()
            .filter(|call| call.callee_name() == Some(name))
            .map(|call| TailCall { stmt, ret, call }),
        Statement::Conditional(cond) => find_in_conditional(name, cond),
        Statement::Loop(lp) => find_tail_call(name, &lp.body),
        Statement::Assignment(_) | Statement::Opaque(_) => None,
    }
}

fn find_in_conditional<'a>(name: &str, cond: &'a StmtConditional) -> Option<TailCall<'a>> {
    find_tail_call(name, &cond.then_branch).or_else(|| match cond.else_branch.as_ref()? {
        Else::Block(stmts) => find_tail_call(name, stmts),
        Else::If(inner) => find_in_conditional(name, inner),
    })
}

/// The guard conditional, which must be the very first statement.
pub fn extract_guard(body: &[Statement]) -> Option<&StmtConditional> {
    body.first()?.as_conditional()
}

/// The base-case return: the first statement of the guard's then-branch.
/// Any statements after it are not part of the base case.
pub fn base_return(guard: &StmtConditional) -> Option<&StmtReturn> {
    guard.then_branch.first()?.as_return()
}
