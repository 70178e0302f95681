//! Application ports (traits) for external dependencies.
//!
//! Adapters in `kindle-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `DocumentSource`: document loading and discovery
//!   - `ReportRenderer`: report output formats
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{DocumentSource, ReportRenderer};

#[cfg(test)]
pub use output::MockDocumentSource;
