//! Application layer errors.
//!
//! These errors represent failures in getting a document to the engine,
//! not findings about the document. Findings are [`crate::domain::Report`]
//! entries.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while loading, discovering or rendering documents.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The document (or discovery root) does not exist.
    #[error("Document not found: {path}")]
    DocumentNotFound { path: PathBuf },

    /// The document exists but could not be deserialized.
    #[error("Failed to parse {path}: {reason}")]
    ParseFailed { path: PathBuf, reason: String },

    /// The document's extension maps to no known wire format.
    #[error("Unsupported document format '{extension}' for {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// Reading from the source failed.
    #[error("Source error at {path}: {reason}")]
    SourceError { path: PathBuf, reason: String },

    /// Source access failed (lock poisoned, etc.).
    #[error("Document source lock error")]
    SourceLockError,

    /// Report rendering failed.
    #[error("Report rendering failed: {reason}")]
    RenderingFailed { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DocumentNotFound { path } => vec![
                format!("Nothing exists at: {}", path.display()),
                "Check the path for typos".into(),
            ],
            Self::ParseFailed { reason, .. } => vec![
                format!("Parser said: {}", reason),
                "Check the document is well-formed JSON or TOML".into(),
                "Field values must have the documented types (strings, integers, booleans)"
                    .into(),
            ],
            Self::UnsupportedFormat { extension, .. } => vec![
                format!("'.{}' documents are not recognized", extension),
                "Use .json, .ign or .toml".into(),
            ],
            Self::SourceError { path, .. } => vec![
                format!("Failed to read: {}", path.display()),
                "Check that you have read permissions".into(),
            ],
            Self::SourceLockError => vec![
                "The document source is locked".into(),
                "Try again in a moment".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DocumentNotFound { .. } => ErrorCategory::NotFound,
            Self::ParseFailed { .. } | Self::UnsupportedFormat { .. } => ErrorCategory::Validation,
            Self::SourceError { .. } | Self::SourceLockError => ErrorCategory::Internal,
            Self::RenderingFailed { .. } => ErrorCategory::Internal,
        }
    }
}
