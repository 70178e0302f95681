//! Document parsing.
//!
//! Turns raw document text into a typed [`Config`]. The wire format is
//! picked from the document's extension:
//!
//! | extension      | format |
//! |----------------|--------|
//! | `.json`, `.ign`| JSON   |
//! | `.toml`        | TOML   |
//!
//! Unknown keys are ignored. Type mismatches are parse failures, not
//! validation findings.

use std::fmt;

use thiserror::Error;
use tracing::{debug, instrument};

use kindle_core::{
    application::ApplicationError,
    domain::{Config, DocumentId},
    error::KindleResult,
};

/// Wire formats a document can arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Map a (case-insensitive) file extension to a format.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" | "ign" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Format for a document id, or `UnsupportedFormat`.
    pub fn detect(id: &DocumentId) -> KindleResult<Self> {
        let extension = id.extension().unwrap_or_default();
        Self::from_extension(&extension).ok_or_else(|| {
            ApplicationError::UnsupportedFormat {
                path: id.as_path().to_path_buf(),
                extension,
            }
            .into()
        })
    }

    pub fn parse(self, text: &str) -> Result<Config, ParseError> {
        let config = match self {
            Self::Json => serde_json::from_str(text)?,
            Self::Toml => toml::from_str(text)?,
        };
        Ok(config)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Toml => write!(f, "toml"),
        }
    }
}

/// Parser failure, before it is attached to a document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Toml(#[from] toml::de::Error),
}

/// Parse `text` as the document `id`.
#[instrument(skip(text), fields(document = %id, bytes = text.len()))]
pub fn parse_document(id: &DocumentId, text: &str) -> KindleResult<Config> {
    let format = DocumentFormat::detect(id)?;
    debug!(%format, "Parsing document");

    format.parse(text).map_err(|e| {
        ApplicationError::ParseFailed {
            path: id.as_path().to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use kindle_core::error::KindleError;

    use super::*;

    #[test]
    fn extensions_map_to_formats() {
        assert_eq!(DocumentFormat::from_extension("json"), Some(DocumentFormat::Json));
        assert_eq!(DocumentFormat::from_extension("IGN"), Some(DocumentFormat::Json));
        assert_eq!(DocumentFormat::from_extension("toml"), Some(DocumentFormat::Toml));
        assert_eq!(DocumentFormat::from_extension("yaml"), None);
    }

    #[test]
    fn json_and_toml_produce_the_same_config() {
        let json = parse_document(
            &"a.json".into(),
            r#"{"ignition":{"version":"3.4.0"},"storage":{"filesystems":[{"device":"/dev/sda1","format":"ext4","wipeFilesystem":true}]}}"#,
        )
        .unwrap();
        let toml = parse_document(
            &"a.toml".into(),
            r#"
            [ignition]
            version = "3.4.0"

            [[storage.filesystems]]
            device = "/dev/sda1"
            format = "ext4"
            wipeFilesystem = true
            "#,
        )
        .unwrap();

        assert_eq!(json, toml);
        assert_eq!(json.storage.filesystems[0].wipe_filesystem, Some(true));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = parse_document(&"a.ign".into(), r#"{"future":{"x":1},"passwd":{}}"#).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn type_mismatch_is_a_parse_failure() {
        let err = parse_document(&"bad.json".into(), r#"{"storage":{"files":[{"path":7}]}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            KindleError::Application(ApplicationError::ParseFailed { .. })
        ));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = parse_document(&"doc.yaml".into(), "{}").unwrap_err();
        match err {
            KindleError::Application(ApplicationError::UnsupportedFormat { extension, .. }) => {
                assert_eq!(extension, "yaml");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
