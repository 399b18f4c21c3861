//! # JSON File Backend
//!
//! The whole store is one JSON object mapping namespace to an array of
//! documents. Every write rewrites the file through a temporary sibling and a
//! rename, so readers never observe a half-written store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::backend::{Cursor, Document, DocumentStore};
use super::criteria::Criteria;
use super::errors::{DocumentStoreError, DocumentStoreResult};
use super::update::{apply_update, UpdateOp, UpdateResult};

type Namespaces = BTreeMap<String, Vec<Document>>;

/// Document store persisted to a single JSON file
#[derive(Debug)]
pub struct FileDocumentStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileDocumentStore {
    /// Open a store at `path`. The file is created on first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of all namespaces holding at least one document.
    pub fn namespaces(&self) -> DocumentStoreResult<Vec<String>> {
        let _guard = self.guard()?;
        Ok(self.read_all()?.into_keys().collect())
    }

    fn guard(&self) -> DocumentStoreResult<std::sync::MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| DocumentStoreError::Unavailable("file store lock poisoned".to_string()))
    }

    fn read_all(&self) -> DocumentStoreResult<Namespaces> {
        if !self.path.exists() {
            return Ok(Namespaces::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            DocumentStoreError::Unavailable(format!(
                "failed to read {}: {}",
                self.path.display(),
                e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(Namespaces::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            DocumentStoreError::Unavailable(format!("corrupt store {}: {}", self.path.display(), e))
        })
    }

    fn write_all(&self, namespaces: &Namespaces) -> DocumentStoreResult<()> {
        let content = serde_json::to_string_pretty(namespaces)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, content)
            .map_err(|e| DocumentStoreError::WriteRejected(format!("failed to write store: {}", e)))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            DocumentStoreError::WriteRejected(format!("failed to replace store: {}", e))
        })
    }
}

impl DocumentStore for FileDocumentStore {
    fn insert(&self, namespace: &str, document: Document) -> DocumentStoreResult<()> {
        if !document.is_object() {
            return Err(DocumentStoreError::InvalidDocument(
                "document must be an object".to_string(),
            ));
        }

        let _guard = self.guard()?;
        let mut namespaces = self.read_all()?;
        namespaces
            .entry(namespace.to_string())
            .or_default()
            .push(document);
        self.write_all(&namespaces)
    }

    fn update(
        &self,
        namespace: &str,
        criteria: &Criteria,
        ops: &[UpdateOp],
    ) -> DocumentStoreResult<UpdateResult> {
        let _guard = self.guard()?;
        let mut namespaces = self.read_all()?;

        let target = namespaces
            .get_mut(namespace)
            .and_then(|docs| docs.iter_mut().find(|doc| criteria.matches(doc)));

        let Some(document) = target else {
            return Ok(UpdateResult { matched: 0 });
        };

        *document = apply_update(document, ops)?;
        self.write_all(&namespaces)?;
        Ok(UpdateResult { matched: 1 })
    }

    fn query(&self, namespace: &str, criteria: &Criteria) -> DocumentStoreResult<Cursor<'_>> {
        let _guard = self.guard()?;
        let matches: Vec<Document> = self
            .read_all()?
            .remove(namespace)
            .unwrap_or_default()
            .into_iter()
            .filter(|doc| criteria.matches(doc))
            .collect();

        Ok(Box::new(matches.into_iter().map(Ok)))
    }
}
