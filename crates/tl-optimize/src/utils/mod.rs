// Utils - the pass seam and the optimizer that drives passes

pub mod optimize_pass;
pub mod optimizer;

pub use optimize_pass::*;
pub use optimizer::*;
