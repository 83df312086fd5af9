//! Shared test fixtures for tl-optimize integration tests.

pub mod go;
pub mod interp;
