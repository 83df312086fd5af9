//! Parse, rewrite and print one Go source file.

use std::path::Path;

use tl_core::error::Error as CoreError;
use tl_core::frontend::LanguageFrontend;
use tl_golang::GoFrontend;
use tl_optimize::{Optimizer, PassReport, TailRecursionConfig};
use tracing::{debug, info};

use crate::{CliError, Result};

/// Printed source plus what each pass did to it.
#[derive(Debug)]
pub struct TransformOutput {
    pub source: String,
    pub reports: Vec<PassReport>,
}

pub fn transform_source(
    source: &str,
    path: &Path,
    config: &TailRecursionConfig,
) -> Result<TransformOutput> {
    let frontend = GoFrontend::new();
    let parsed = frontend
        .parse(source, Some(path))
        .map_err(|err| match err {
            CoreError::SyntaxError { span, message } => CliError::Parse {
                path: path.to_path_buf(),
                src: source.to_string(),
                span: Some(span),
                message,
            },
            other => CliError::Parse {
                path: path.to_path_buf(),
                src: source.to_string(),
                span: None,
                message: other.to_string(),
            },
        })?;

    if let Some(snapshot) = &parsed.snapshot {
        debug!(language = %snapshot.language, "{}", snapshot.description);
    }

    let mut unit = parsed.unit;
    let reports = Optimizer::with_config(config).optimize_unit(&mut unit)?;
    for report in &reports {
        for name in report.rewritten() {
            info!(pass = %report.pass, function = %name, "rewrote tail recursion");
        }
    }

    let source = parsed.serializer.serialize_unit(&unit)?;
    Ok(TransformOutput { source, reports })
}

pub fn transform_file(path: &Path, config: &TailRecursionConfig) -> Result<TransformOutput> {
    let source = std::fs::read_to_string(path).map_err(|source| CliError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    transform_source(&source, path, config)
}
