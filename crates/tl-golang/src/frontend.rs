//! Go frontend backed by tree-sitter-go.

use std::path::Path;
use std::sync::Arc;

use tl_core::ast::AstSerializer;
use tl_core::error::{Error as CoreError, Result as CoreResult};
use tl_core::frontend::{FrontendResult, FrontendSnapshot, LanguageFrontend};

use crate::parser::GoParser;
use crate::serializer::GoSerializer;

/// Canonical identifier for the Go frontend.
pub const GOLANG: &str = "go";

/// Frontend that converts Go source code into a tailloop source unit.
pub struct GoFrontend {
    serializer: Arc<GoSerializer>,
}

impl GoFrontend {
    pub fn new() -> Self {
        Self {
            serializer: Arc::new(GoSerializer::default()),
        }
    }
}

impl Default for GoFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageFrontend for GoFrontend {
    fn language(&self) -> &'static str {
        GOLANG
    }

    fn parse(&self, source: &str, path: Option<&Path>) -> CoreResult<FrontendResult> {
        let mut parser = GoParser::new().map_err(|err| CoreError::from(err.to_string()))?;
        let mut unit = parser
            .parse_str(source)
            .map_err(|err| match err.downcast::<CoreError>() {
                Ok(core) => core,
                Err(other) => CoreError::from(other.to_string()),
            })?;

        let description = match path {
            Some(path) => {
                unit.path = path.to_path_buf();
                format!("Go source {}", path.display())
            }
            None => "Go source <stdin>".to_string(),
        };

        Ok(FrontendResult {
            unit,
            serializer: self.serializer.clone() as Arc<dyn AstSerializer>,
            snapshot: Some(FrontendSnapshot {
                language: self.language().to_string(),
                description,
            }),
        })
    }
}
