// tl-optimize: syntax-tree rewrites for tailloop
//
// Architecture:
// - passes: Focused passes that implement OptimizePass
// - queries: Stateless operations for extracting information
// - utils: The OptimizePass seam and the optimizer that runs passes

pub mod passes;
pub mod queries;
pub mod utils;

// Re-export key types for convenience
pub use passes::*;
pub use queries::*;
pub use utils::*;
