// Passes - focused rewrite passes that implement OptimizePass

pub mod tail_recursion;

pub use tail_recursion::*;
