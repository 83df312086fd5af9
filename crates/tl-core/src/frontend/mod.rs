use crate::ast::{AstSerializer, SourceUnit};
use crate::error::Result;
use std::path::Path;
use std::sync::Arc;

/// Provenance of a parsed source unit.
#[derive(Debug, Clone)]
pub struct FrontendSnapshot {
    pub language: String,
    pub description: String,
}

/// Result produced by a language frontend after parsing source code.
#[derive(Clone)]
pub struct FrontendResult {
    pub unit: SourceUnit,
    pub serializer: Arc<dyn AstSerializer>,
    pub snapshot: Option<FrontendSnapshot>,
}

/// Trait implemented by every source-language frontend.
pub trait LanguageFrontend: Send + Sync {
    fn language(&self) -> &'static str;
    fn parse(&self, source: &str, path: Option<&Path>) -> Result<FrontendResult>;
}
