use std::collections::HashSet;

use tl_core::ast::{Expression, Ident, Parameter, Statement};
use tracing::trace;

/// Hands out temporaries that collide with nothing already in scope.
pub struct TempNamer {
    prefix: String,
    used: HashSet<String>,
}

impl TempNamer {
    pub fn new(prefix: impl Into<String>, used: HashSet<String>) -> Self {
        Self {
            prefix: prefix.into(),
            used,
        }
    }

    /// `<prefix><base>`, suffixed with `_1`, `_2`, ... while taken.
    pub fn fresh(&mut self, base: &str) -> Ident {
        let stem = format!("{}{}", self.prefix, base);
        let mut candidate = stem.clone();
        let mut suffix = 0;
        while self.used.contains(&candidate) {
            suffix += 1;
            candidate = format!("{stem}_{suffix}");
        }
        self.used.insert(candidate.clone());
        Ident::new(candidate)
    }
}

/// Turns the arguments of a self-call into a simultaneous parameter update.
///
/// Pairs parameters with arguments by position, stopping at the shorter of
/// the two. Every argument is first captured in a temporary (`tmp := arg`),
/// so each one is evaluated against the parameters' old values; a single
/// tuple assignment then commits all of them. Unnamed and `_` parameters
/// still consume their argument but are not reassigned.
pub fn stage_parameters(
    params: &[Parameter],
    arguments: &[Expression],
    namer: &mut TempNamer,
) -> Vec<Statement> {
    let mut stmts = Vec::new();
    let mut targets = Vec::new();
    let mut temps = Vec::new();

    for (param, argument) in params.iter().zip(arguments) {
        let Some(name) = param.assignable_name() else {
            continue;
        };
        let temp = namer.fresh(name.as_str());
        trace!("staging {} through {}", name, temp);
        stmts.push(Statement::declare(
            vec![Expression::Identifier(temp.clone())],
            vec![argument.clone()],
        ));
        targets.push(Expression::Identifier(name.clone()));
        temps.push(Expression::Identifier(temp));
    }

    if !targets.is_empty() {
        stmts.push(Statement::assign(targets, temps));
    }
    stmts
}
