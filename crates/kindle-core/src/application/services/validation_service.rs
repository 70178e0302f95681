//! Validation Service - main application orchestrator.
//!
//! This service coordinates the validation workflow:
//! 1. Discover documents under the given roots
//! 2. Load each document through the source port
//! 3. Walk it with the engine and collect the report
//!
//! A document that fails to load does not stop the others.

use std::path::PathBuf;

use tracing::{info, instrument, warn};

use crate::{
    application::ports::DocumentSource,
    domain::{DocumentId, Report, validate_config},
    error::{KindleError, KindleResult},
};

/// What happened to one document.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub id: DocumentId,
    pub result: Result<Report, KindleError>,
}

impl Outcome {
    /// Loaded, and no Error-severity entry.
    pub fn passed(&self) -> bool {
        matches!(&self.result, Ok(report) if !report.is_fatal())
    }

    pub fn report(&self) -> Option<&Report> {
        self.result.as_ref().ok()
    }

    pub fn error_count(&self) -> usize {
        match &self.result {
            Ok(report) => report.error_count(),
            Err(_) => 1,
        }
    }

    pub fn warning_count(&self) -> usize {
        self.report().map_or(0, Report::warning_count)
    }
}

/// Main validation service.
pub struct ValidationService {
    source: Box<dyn DocumentSource>,
}

impl ValidationService {
    /// Create a new validation service over a document source.
    pub fn new(source: Box<dyn DocumentSource>) -> Self {
        Self { source }
    }

    /// Resolve roots (files or directories) to document ids, in root order.
    #[instrument(skip_all, fields(roots = roots.len()))]
    pub fn discover(&self, roots: &[PathBuf]) -> KindleResult<Vec<DocumentId>> {
        let mut ids = Vec::new();
        for root in roots {
            ids.extend(self.source.discover(root)?);
        }
        info!(documents = ids.len(), "Documents discovered");
        Ok(ids)
    }

    /// Validate one document. Findings live in the report; `Err` only
    /// means the document could not be loaded.
    #[instrument(skip(self), fields(document = %id))]
    pub fn validate(&self, id: &DocumentId) -> KindleResult<Report> {
        let config = self.source.load(id)?;
        let report = validate_config(&config);
        info!(
            errors = report.error_count(),
            warnings = report.warning_count(),
            "Document validated"
        );
        Ok(report)
    }

    /// Like [`Self::validate`], but a fatal report becomes an error.
    pub fn check(&self, id: &DocumentId) -> KindleResult<Report> {
        let report = self.validate(id)?;
        if report.is_fatal() {
            return Err(KindleError::Invalid {
                errors: report.error_count(),
                warnings: report.warning_count(),
            });
        }
        Ok(report)
    }

    /// Validate every document, in order, without stopping on failures.
    pub fn validate_all(&self, ids: &[DocumentId]) -> Vec<Outcome> {
        ids.iter()
            .map(|id| {
                let result = self.validate(id);
                if let Err(e) = &result {
                    warn!(document = %id, error = %e, "Document could not be validated");
                }
                Outcome {
                    id: id.clone(),
                    result,
                }
            })
            .collect()
    }
}
