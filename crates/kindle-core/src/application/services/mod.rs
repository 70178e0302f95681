//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "validate every document under a directory".

pub mod validation_service;

pub use validation_service::{Outcome, ValidationService};
