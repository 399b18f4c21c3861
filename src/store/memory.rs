//! # In-Memory Backend

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::backend::{Cursor, Document, DocumentStore};
use super::criteria::Criteria;
use super::errors::{DocumentStoreError, DocumentStoreResult};
use super::update::{apply_update, UpdateOp, UpdateResult};

type Namespaces = BTreeMap<String, Vec<Document>>;

/// Document store held in process memory
///
/// Queries return a snapshot of the matching documents taken when the query
/// is issued. Write rejection and outages can be simulated for tests.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    namespaces: Mutex<Namespaces>,
    unavailable: AtomicBool,
    reject_writes: AtomicBool,
}

impl MemoryDocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail with `Unavailable` until cleared.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make inserts and updates fail with `WriteRejected` until cleared.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Copy of every document in `namespace`, in insertion order.
    pub fn documents(&self, namespace: &str) -> Vec<Document> {
        match self.namespaces.lock() {
            Ok(guard) => guard.get(namespace).cloned().unwrap_or_default(),
            Err(poisoned) => poisoned.into_inner().get(namespace).cloned().unwrap_or_default(),
        }
    }

    pub fn len(&self, namespace: &str) -> usize {
        self.documents(namespace).len()
    }

    pub fn is_empty(&self, namespace: &str) -> bool {
        self.len(namespace) == 0
    }

    fn lock(&self) -> DocumentStoreResult<MutexGuard<'_, Namespaces>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DocumentStoreError::Unavailable(
                "memory store marked unavailable".to_string(),
            ));
        }
        self.namespaces
            .lock()
            .map_err(|_| DocumentStoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn check_writable(&self) -> DocumentStoreResult<()> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(DocumentStoreError::WriteRejected(
                "memory store rejects writes".to_string(),
            ));
        }
        Ok(())
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn insert(&self, namespace: &str, document: Document) -> DocumentStoreResult<()> {
        let mut namespaces = self.lock()?;
        self.check_writable()?;

        if !document.is_object() {
            return Err(DocumentStoreError::InvalidDocument(
                "document must be an object".to_string(),
            ));
        }

        namespaces
            .entry(namespace.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    fn update(
        &self,
        namespace: &str,
        criteria: &Criteria,
        ops: &[UpdateOp],
    ) -> DocumentStoreResult<UpdateResult> {
        let mut namespaces = self.lock()?;
        self.check_writable()?;

        let target = namespaces
            .get_mut(namespace)
            .and_then(|docs| docs.iter_mut().find(|doc| criteria.matches(doc)));

        match target {
            Some(document) => {
                *document = apply_update(document, ops)?;
                Ok(UpdateResult { matched: 1 })
            }
            None => Ok(UpdateResult { matched: 0 }),
        }
    }

    fn query(&self, namespace: &str, criteria: &Criteria) -> DocumentStoreResult<Cursor<'_>> {
        let namespaces = self.lock()?;
        let matches: Vec<Document> = namespaces
            .get(namespace)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| criteria.matches(doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(Box::new(matches.into_iter().map(Ok)))
    }
}
