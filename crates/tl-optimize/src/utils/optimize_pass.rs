// OptimizePass trait - interface for syntax-tree rewrite passes

use std::fmt;

use tl_core::ast::{FunctionDeclaration, Ident, SourceUnit};
use tl_core::error::Result;
use tracing::debug;

/// Why a pass left a function untouched. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No body, or an empty one.
    EmptyBody,
    /// No `return f(...)` calling the function itself.
    NoTailCall,
    /// The first statement is not a conditional.
    NoGuard,
    /// The guard's branch does not start with a return.
    NoBaseReturn,
    /// The pass has nothing to say about this function.
    NotApplicable,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::EmptyBody => "empty body",
            SkipReason::NoTailCall => "no tail self-call",
            SkipReason::NoGuard => "first statement is not a guard",
            SkipReason::NoBaseReturn => "guard has no base-case return",
            SkipReason::NotApplicable => "not applicable",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionOutcome {
    Rewritten,
    Skipped(SkipReason),
}

impl FunctionOutcome {
    pub fn is_rewritten(&self) -> bool {
        matches!(self, FunctionOutcome::Rewritten)
    }
}

/// Per-function outcomes of one pass over a source unit, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    pub pass: String,
    pub functions: Vec<(Ident, FunctionOutcome)>,
}

impl PassReport {
    pub fn new(pass: impl Into<String>) -> Self {
        Self {
            pass: pass.into(),
            functions: Vec::new(),
        }
    }

    pub fn rewritten(&self) -> impl Iterator<Item = &Ident> {
        self.functions
            .iter()
            .filter(|(_, outcome)| outcome.is_rewritten())
            .map(|(name, _)| name)
    }

    pub fn outcome(&self, name: &str) -> Option<FunctionOutcome> {
        self.functions
            .iter()
            .find(|(ident, _)| ident.as_str() == name)
            .map(|(_, outcome)| *outcome)
    }
}

#[allow(unused_variables)]
pub trait OptimizePass {
    fn name(&self) -> &str;

    /// Rewrites one function in place. Must leave `func` untouched unless it
    /// returns [`FunctionOutcome::Rewritten`].
    fn optimize_function(&self, func: &mut FunctionDeclaration) -> Result<FunctionOutcome> {
        Ok(FunctionOutcome::Skipped(SkipReason::NotApplicable))
    }

    /// Visits every function declaration once, in source order. Each one is
    /// handled on its own; an outcome never influences the next function.
    fn optimize_unit(&self, unit: &mut SourceUnit) -> Result<PassReport> {
        let mut report = PassReport::new(self.name());
        for func in unit.functions_mut() {
            let outcome = self.optimize_function(func)?;
            match outcome {
                FunctionOutcome::Rewritten => {
                    debug!(pass = self.name(), function = %func.name, "rewrote function")
                }
                FunctionOutcome::Skipped(reason) => {
                    debug!(pass = self.name(), function = %func.name, %reason, "left function unchanged")
                }
            }
            report.functions.push((func.name.clone(), outcome));
        }
        Ok(report)
    }
}
