//! Diagnostic and error reporting utilities

use crate::{CliError, Result};
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::Path;
use thiserror::Error;
use tl_core::span::Span;

/// Set up enhanced error reporting with miette
pub fn setup_error_reporting() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(false)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .map_err(|e| CliError::Config(format!("Failed to setup error reporting: {}", e)))?;

    Ok(())
}

#[derive(Error, Debug, Diagnostic)]
pub enum TailloopDiagnostic {
    #[error("Syntax error: {message}")]
    #[diagnostic(
        code(tailloop::syntax_error),
        help("the input must be a complete, well-formed Go source file")
    )]
    SyntaxError {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        err_span: SourceSpan,
    },
}

/// Helper function to create a syntax error with source context
pub fn syntax_error(path: &Path, src: &str, span: Span, message: &str) -> TailloopDiagnostic {
    TailloopDiagnostic::SyntaxError {
        message: message.to_string(),
        src: NamedSource::new(path.display().to_string(), src.to_string()),
        err_span: source_span(src, span),
    }
}

/// Clamps a byte span to the source so the label always lands inside it.
fn source_span(src: &str, span: Span) -> SourceSpan {
    let lo = (span.lo as usize).min(src.len());
    let hi = (span.hi as usize).clamp(lo, src.len());
    SourceSpan::new(lo.into(), hi - lo)
}

/// Renders errors that carry source context; returns false for everything else.
pub fn render_cli_error(error: &CliError) -> bool {
    match error {
        CliError::Parse {
            path,
            src,
            span: Some(span),
            message,
        } => {
            let report = miette::Report::new(syntax_error(path, src, *span, message));
            eprintln!("{:?}", report);
            true
        }
        _ => false,
    }
}
