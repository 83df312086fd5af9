//! tailloop CLI Library
//!
//! Reads one Go source file, rewrites its guarded tail-recursive functions
//! into loops and hands back the printed result.

pub mod config;
pub mod diagnostics;
pub mod transform;

// CLI-specific error handling
pub mod error {
    use std::path::PathBuf;

    use thiserror::Error;
    use tl_core::span::Span;

    #[derive(Error, Debug)]
    pub enum CliError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Failed to read {}: {source}", path.display())]
        ReadInput {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },

        #[error("Configuration error: {0}")]
        Config(String),

        #[error("Parse error in {}: {message}", path.display())]
        Parse {
            path: PathBuf,
            src: String,
            span: Option<Span>,
            message: String,
        },

        #[error("Transform error: {0}")]
        Transform(String),
    }

    impl From<tl_core::Error> for CliError {
        fn from(err: tl_core::Error) -> Self {
            CliError::Transform(err.to_string())
        }
    }

    pub type Result<T> = std::result::Result<T, CliError>;
}

pub use error::{CliError, Result};
