//! Kindle Core - provisioning config validation engine
//!
//! This crate provides the domain and application layers for the Kindle
//! validator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           kindle-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │          (ValidationService)            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Driven: DocumentSource, Renderer)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     kindle-adapters (Infrastructure)    │
//! │  (LocalSource, MemorySource, renderers) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Config entities, rules, walker,       │
//! │   report)                               │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use kindle_core::domain::{Config, Filesystem, Storage, ValidationKind, validate_config};
//!
//! let config = Config {
//!     storage: Storage {
//!         filesystems: vec![Filesystem {
//!             device: "/dev/sda1".into(),
//!             path: Some("/var".into()),
//!             ..Default::default()
//!         }],
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//!
//! let report = validate_config(&config);
//! assert!(report.is_fatal());
//! assert!(report.kinds().contains(&ValidationKind::FormatNilWithOthers));
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Outcome, ValidationService,
        ports::{DocumentSource, ReportRenderer},
    };
    pub use crate::domain::{
        Config, ContextPath, DocumentId, Entry, Report, Severity, Validate, ValidationKind, Walk,
        validate_config,
    };
    pub use crate::error::{KindleError, KindleResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
