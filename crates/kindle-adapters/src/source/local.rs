//! Local filesystem document source.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use kindle_core::{
    application::{ApplicationError, ports::DocumentSource},
    domain::{Config, DocumentId},
    error::{KindleError, KindleResult},
};

use crate::loader::{DocumentFormat, parse_document};

/// Extensions discovered when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["json", "ign", "toml"];

/// Reads documents from disk.
///
/// Directory roots are walked recursively; only files whose extension is in
/// the configured set become documents. Explicit file roots are always
/// returned, whatever their extension, so an unsupported one surfaces as a
/// load error instead of being skipped silently.
#[derive(Debug, Clone)]
pub struct LocalSource {
    extensions: Vec<String>,
    follow_links: bool,
}

impl LocalSource {
    pub fn new() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            follow_links: false,
        }
    }

    /// Replace the discovered extensions (leading dots are ignored).
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Reject a discovery set that could never yield a loadable document.
    pub fn check(&self) -> KindleResult<()> {
        if self.extensions.is_empty() {
            return Err(KindleError::Configuration {
                message: "no document extensions configured".into(),
            });
        }
        if let Some(unknown) = self
            .extensions
            .iter()
            .find(|e| DocumentFormat::from_extension(e).is_none())
        {
            return Err(KindleError::Configuration {
                message: format!("extension '{unknown}' has no document parser"),
            });
        }
        Ok(())
    }

    fn wanted(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
    }
}

impl Default for LocalSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSource for LocalSource {
    #[instrument(skip(self), fields(document = %id))]
    fn load(&self, id: &DocumentId) -> KindleResult<Config> {
        let text = fs::read_to_string(id.as_path()).map_err(|e| map_io_error(id.as_path(), e))?;
        parse_document(id, &text)
    }

    #[instrument(skip(self))]
    fn discover(&self, root: &Path) -> KindleResult<Vec<DocumentId>> {
        if !root.exists() {
            return Err(ApplicationError::DocumentNotFound {
                path: root.to_path_buf(),
            }
            .into());
        }

        if root.is_file() {
            return Ok(vec![DocumentId::new(root)]);
        }

        let mut found = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(self.follow_links)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                    warn!(path = %path.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            if entry.file_type().is_file() && self.wanted(entry.path()) {
                found.push(DocumentId::new(entry.into_path()));
            }
        }

        debug!(count = found.len(), "Discovered documents");
        Ok(found)
    }
}

fn map_io_error(path: &Path, e: io::Error) -> KindleError {
    let path: PathBuf = path.to_path_buf();
    match e.kind() {
        io::ErrorKind::NotFound => ApplicationError::DocumentNotFound { path }.into(),
        _ => ApplicationError::SourceError {
            path,
            reason: format!("Failed to read document: {}", e),
        }
        .into(),
    }
}
