//! Infrastructure adapters for Kindle.
//!
//! This crate implements the ports defined in `kindle-core::application::ports`.
//! It contains all external dependencies and I/O operations: reading
//! documents, parsing JSON and TOML, and turning reports into text.

pub mod loader;
pub mod renderer;
pub mod source;

// Re-export commonly used adapters
pub use loader::{DocumentFormat, parse_document};
pub use renderer::{JsonRenderer, PlainRenderer};
pub use source::{LocalSource, MemorySource};
