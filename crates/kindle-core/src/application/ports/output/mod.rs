//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `kindle-adapters` crate provides implementations.

use std::path::Path;

use crate::application::Outcome;
use crate::domain::{Config, DocumentId};
use crate::error::KindleResult;

/// Port for obtaining deserialized documents.
///
/// Implemented by:
/// - `kindle_adapters::source::LocalSource` (files on disk)
/// - `kindle_adapters::source::MemorySource` (testing)
///
/// ## Design Notes
///
/// - Parsing lives behind this port; the engine only sees typed [`Config`]s
/// - `discover` must return ids in a stable order
#[cfg_attr(test, mockall::automock)]
pub trait DocumentSource: Send + Sync {
    /// Load and deserialize one document.
    fn load(&self, id: &DocumentId) -> KindleResult<Config>;

    /// Every document under `root` (or `root` itself when it is a document).
    fn discover(&self, root: &Path) -> KindleResult<Vec<DocumentId>>;
}

/// Port for turning outcomes into text.
///
/// Implemented by:
/// - `kindle_adapters::renderer::PlainRenderer`
/// - `kindle_adapters::renderer::JsonRenderer`
pub trait ReportRenderer: Send + Sync {
    fn render(&self, outcomes: &[Outcome]) -> KindleResult<String>;
}
