//! Rewrites guarded tail self-recursion into a loop.
//!
//! ```go
//! func Sum(n, acc int) int {          func Sum(n, acc int) int {
//!     if n == 0 {                         for n != 0 {
//!         return acc          ==>             tmpn := n - 1
//!     }                                       tmpacc := acc + n
//!     return Sum(n-1, acc+n)                  n, acc = tmpn, tmpacc
//! }                                       }
//!                                         return acc
//!                                     }
//! ```
//!
//! The match is purely syntactic. Nothing checks that the guard's branch
//! really avoids recursion or that the loop terminates.

mod negate;
mod rebuild;
mod staging;

pub use negate::*;
pub use rebuild::*;
pub use staging::*;

use serde::{Deserialize, Serialize};
use tl_core::ast::FunctionDeclaration;
use tl_core::error::Result;
use tracing::trace;

use crate::queries::{base_return, collect_used_names, extract_guard, find_tail_call};
use crate::utils::{FunctionOutcome, OptimizePass, SkipReason};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailRecursionConfig {
    /// Prepended to a parameter name to form its temporary.
    pub temp_prefix: String,
}

impl Default for TailRecursionConfig {
    fn default() -> Self {
        Self {
            temp_prefix: "tmp".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TailRecursionPass {
    config: TailRecursionConfig,
}

impl TailRecursionPass {
    pub fn new(config: TailRecursionConfig) -> Self {
        Self { config }
    }

    /// All-or-nothing: `func` is only assigned to once every step succeeded.
    pub fn rewrite_function(&self, func: &mut FunctionDeclaration) -> FunctionOutcome {
        let Some(body) = func.body.as_deref().filter(|body| !body.is_empty()) else {
            return FunctionOutcome::Skipped(SkipReason::EmptyBody);
        };
        let Some(tail) = find_tail_call(func.name.as_str(), body) else {
            return FunctionOutcome::Skipped(SkipReason::NoTailCall);
        };
        let Some(guard) = extract_guard(body) else {
            return FunctionOutcome::Skipped(SkipReason::NoGuard);
        };
        let Some(base) = base_return(guard) else {
            return FunctionOutcome::Skipped(SkipReason::NoBaseReturn);
        };

        let condition = negate_condition(&guard.condition);
        let mut namer = TempNamer::new(self.config.temp_prefix.clone(), collect_used_names(func));
        let staging = stage_parameters(&func.params, &tail.call.arguments, &mut namer);
        trace!(
            function = %func.name,
            staged = staging.len(),
            "staged tail-call arguments"
        );

        let rebuilt = rebuild_body(body, &body[0], tail.stmt, condition, staging, base);
        func.body = Some(rebuilt);
        FunctionOutcome::Rewritten
    }
}

impl OptimizePass for TailRecursionPass {
    fn name(&self) -> &str {
        "tail_recursion"
    }

    fn optimize_function(&self, func: &mut FunctionDeclaration) -> Result<FunctionOutcome> {
        Ok(self.rewrite_function(func))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tl_core::ast::{ComparisonOp, Expression, Parameter, Statement};

    fn ident(name: &str) -> Expression {
        Expression::ident(name)
    }

    fn sum() -> FunctionDeclaration {
        FunctionDeclaration::new(
            "Sum",
            vec![Parameter::new("n", "int"), Parameter::new("acc", "int")],
            vec![
                Statement::conditional(
                    Expression::comparison(ident("n"), ComparisonOp::Eq, Expression::opaque("0")),
                    vec![Statement::ret(vec![ident("acc")])],
                ),
                Statement::ret(vec![Expression::call(
                    "Sum",
                    vec![Expression::opaque("n - 1"), Expression::opaque("acc + n")],
                )]),
            ],
        )
        .with_result("int")
    }

    #[test]
    fn rewrites_accumulator_sum() {
        let mut func = sum();
        let outcome = TailRecursionPass::default().rewrite_function(&mut func);
        assert_eq!(outcome, FunctionOutcome::Rewritten);
        assert_eq!(
            func.body,
            Some(vec![
                Statement::looping(
                    Expression::comparison(ident("n"), ComparisonOp::Ne, Expression::opaque("0")),
                    vec![
                        Statement::declare(vec![ident("tmpn")], vec![Expression::opaque("n - 1")]),
                        Statement::declare(
                            vec![ident("tmpacc")],
                            vec![Expression::opaque("acc + n")]
                        ),
                        Statement::assign(
                            vec![ident("n"), ident("acc")],
                            vec![ident("tmpn"), ident("tmpacc")]
                        ),
                    ],
                ),
                Statement::ret(vec![ident("acc")]),
            ])
        );
    }

    #[test]
    fn second_application_is_a_no_op() {
        let pass = TailRecursionPass::default();
        let mut func = sum();
        assert!(pass.rewrite_function(&mut func).is_rewritten());
        let once = func.clone();
        assert_eq!(
            pass.rewrite_function(&mut func),
            FunctionOutcome::Skipped(SkipReason::NoTailCall)
        );
        assert_eq!(func, once);
    }

    #[test]
    fn loop_first_body_is_not_a_guard() {
        let mut func = sum();
        let body = func.body.as_mut().unwrap();
        body.insert(0, Statement::looping(ident("ok"), vec![]));
        let before = func.clone();
        assert_eq!(
            TailRecursionPass::default().rewrite_function(&mut func),
            FunctionOutcome::Skipped(SkipReason::NoGuard)
        );
        assert_eq!(func, before);
    }

    #[test]
    fn guard_without_return_is_skipped() {
        let mut func = sum();
        let body = func.body.as_mut().unwrap();
        let Statement::Conditional(guard) = &mut body[0] else {
            unreachable!()
        };
        guard.then_branch.insert(0, Statement::opaque("log(acc)"));
        let before = func.clone();
        assert_eq!(
            TailRecursionPass::default().rewrite_function(&mut func),
            FunctionOutcome::Skipped(SkipReason::NoBaseReturn)
        );
        assert_eq!(func, before);
    }

    #[test]
    fn empty_and_missing_bodies_are_skipped() {
        let pass = TailRecursionPass::default();
        let mut empty = FunctionDeclaration::new("F", vec![], vec![]);
        assert_eq!(
            pass.rewrite_function(&mut empty),
            FunctionOutcome::Skipped(SkipReason::EmptyBody)
        );
        let mut external = FunctionDeclaration {
            body: None,
            ..FunctionDeclaration::new("F", vec![], vec![])
        };
        assert_eq!(
            pass.rewrite_function(&mut external),
            FunctionOutcome::Skipped(SkipReason::EmptyBody)
        );
    }

    #[test]
    fn custom_prefix_is_used() {
        let pass = TailRecursionPass::new(TailRecursionConfig {
            temp_prefix: "next_".to_string(),
        });
        let mut func = sum();
        pass.rewrite_function(&mut func);
        let Some(Statement::Loop(lp)) = func.body.as_ref().and_then(|body| body.first()) else {
            panic!("expected loop");
        };
        assert_eq!(
            lp.body[0],
            Statement::declare(vec![ident("next_n")], vec![Expression::opaque("n - 1")])
        );
    }
}
