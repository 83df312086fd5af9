//! Go language support for tailloop.

pub mod frontend;
mod layout;
pub mod parser;
pub mod serializer;

pub use frontend::GoFrontend;
pub use parser::GoParser;
pub use serializer::GoSerializer;
