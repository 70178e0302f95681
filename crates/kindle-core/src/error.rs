//! Unified error handling for Kindle Core.
//!
//! This module provides a unified error type that wraps application
//! errors, with rich context and user-actionable suggestions. Validation
//! findings are not errors; they live in [`crate::domain::Report`].

use thiserror::Error;

use crate::application::ApplicationError;

/// Root error type for Kindle Core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KindleError {
    /// Errors from the application layer (loading, discovery, rendering).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// A document was validated and its report contains errors.
    #[error("Configuration is invalid: {errors} error(s), {warnings} warning(s)")]
    Invalid { errors: usize, warnings: usize },

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl KindleError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Application(e) => e.suggestions(),
            Self::Invalid { errors, .. } => vec![
                format!("Fix the {} error(s) listed in the report", errors),
                "Warnings alone never block provisioning".into(),
            ],
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Kindle".into(),
                "Please report this issue at: https://github.com/cosecruz/kindle/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Application(e) => e.category(),
            Self::Invalid { .. } => ErrorCategory::Validation,
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type KindleResult<T> = Result<T, KindleError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> KindleResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> KindleResult<T> {
        self.map_err(|e| KindleError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_category_passes_through() {
        let err: KindleError = ApplicationError::DocumentNotFound {
            path: "/x.json".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn configuration_has_its_own_category() {
        let err = KindleError::Configuration {
            message: "no document extensions configured".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.suggestions()[0].contains("no document extensions"));
    }

    #[test]
    fn context_wraps_foreign_errors() {
        let result: Result<(), std::fmt::Error> = Err(std::fmt::Error);
        let err = result.context("writing report").unwrap_err();
        assert!(matches!(err, KindleError::Internal { ref message } if message.starts_with("writing report")));
    }
}
