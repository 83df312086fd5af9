use crate::passes::{TailRecursionConfig, TailRecursionPass};
use crate::utils::{OptimizePass, PassReport};
use tl_core::ast::SourceUnit;
use tl_core::error::Result;
use tracing::info;

pub fn load_optimizers(config: &TailRecursionConfig) -> Vec<Box<dyn OptimizePass>> {
    vec![Box::new(TailRecursionPass::new(config.clone()))]
}

/// Runs a fixed list of passes over a source unit, one after another.
pub struct Optimizer {
    passes: Vec<Box<dyn OptimizePass>>,
}

impl Optimizer {
    pub fn new(passes: Vec<Box<dyn OptimizePass>>) -> Self {
        Self { passes }
    }

    pub fn with_config(config: &TailRecursionConfig) -> Self {
        Self::new(load_optimizers(config))
    }

    pub fn optimize_unit(&self, unit: &mut SourceUnit) -> Result<Vec<PassReport>> {
        let mut reports = Vec::with_capacity(self.passes.len());
        for pass in &self.passes {
            let report = pass.optimize_unit(unit)?;
            info!(
                pass = pass.name(),
                rewritten = report.rewritten().count(),
                visited = report.functions.len(),
                "pass finished"
            );
            reports.push(report);
        }
        Ok(reports)
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::with_config(&TailRecursionConfig::default())
    }
}
