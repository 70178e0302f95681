//! In-memory document source for testing.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use kindle_core::{
    application::{ApplicationError, ports::DocumentSource},
    domain::{Config, DocumentId},
    error::KindleResult,
};

use crate::loader::parse_document;

/// Documents held as raw text, keyed by path.
///
/// Text is parsed on every load, so parse failures behave exactly like
/// [`super::LocalSource`].
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: Arc<RwLock<BTreeMap<PathBuf, String>>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a document.
    pub fn insert(&self, path: impl Into<PathBuf>, text: impl Into<String>) -> KindleResult<()> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| ApplicationError::SourceLockError)?;
        documents.insert(path.into(), text.into());
        Ok(())
    }

    /// Builder-style [`Self::insert`].
    pub fn with(self, path: impl Into<PathBuf>, text: impl Into<String>) -> KindleResult<Self> {
        self.insert(path, text)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.documents.read().map_or(0, |d| d.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentSource for MemorySource {
    fn load(&self, id: &DocumentId) -> KindleResult<Config> {
        let documents = self
            .documents
            .read()
            .map_err(|_| ApplicationError::SourceLockError)?;
        let text = documents
            .get(id.as_path())
            .ok_or_else(|| ApplicationError::DocumentNotFound {
                path: id.as_path().to_path_buf(),
            })?;
        parse_document(id, text)
    }

    /// Every stored path equal to or under `root`, in path order.
    fn discover(&self, root: &Path) -> KindleResult<Vec<DocumentId>> {
        let documents = self
            .documents
            .read()
            .map_err(|_| ApplicationError::SourceLockError)?;
        let found: Vec<DocumentId> = documents
            .keys()
            .filter(|path| path.starts_with(root))
            .map(|path| DocumentId::new(path.clone()))
            .collect();

        if found.is_empty() {
            return Err(ApplicationError::DocumentNotFound {
                path: root.to_path_buf(),
            }
            .into());
        }
        Ok(found)
    }
}
