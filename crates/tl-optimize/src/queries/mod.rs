// Queries - stateless operations for extracting information from the syntax tree

pub mod name_queries;
pub mod tail_call_queries;

pub use name_queries::*;
pub use tail_call_queries::*;
