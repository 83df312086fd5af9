use crate::ast::{Expression, FunctionDeclaration, SourceUnit, Statement};
use crate::bail;

#[allow(unused_variables)]
pub trait AstSerializer: Send + Sync {
    fn serialize_unit(&self, unit: &SourceUnit) -> Result<String, crate::Error> {
        bail!("not implemented: serialize_unit")
    }
    fn serialize_function(&self, func: &FunctionDeclaration) -> Result<String, crate::Error> {
        bail!("not implemented: serialize_function")
    }
    fn serialize_stmt(&self, stmt: &Statement) -> Result<String, crate::Error> {
        bail!("not implemented: serialize_stmt")
    }
    fn serialize_expr(&self, expr: &Expression) -> Result<String, crate::Error> {
        bail!("not implemented: serialize_expr")
    }
}
