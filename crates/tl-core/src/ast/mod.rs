//! Syntax tree for one source unit.
//!
//! Only the node kinds the tail-recursion rewrite interprets get their own
//! variants; every other statement or expression is carried as `Opaque`
//! source text and reproduced verbatim by the serializer. Comments and
//! blank lines ride along as [`Trivia`] on the statement they belong to.

mod expr;
mod ident;
mod item;
mod serialize;
mod stmt;
mod trivia;

pub use expr::*;
pub use ident::*;
pub use item::*;
pub use serialize::*;
pub use stmt::*;
pub use trivia::*;
