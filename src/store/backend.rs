//! # Document Store Trait

use serde_json::Value;

use super::criteria::Criteria;
use super::errors::DocumentStoreResult;
use super::update::{UpdateOp, UpdateResult};

/// A stored document (always a JSON object).
pub type Document = Value;

/// Iterator over query results, in store order.
pub type Cursor<'a> = Box<dyn Iterator<Item = DocumentStoreResult<Document>> + 'a>;

/// Backend trait for document storage
///
/// Documents live in namespaces (`<database>.<collection>`). Implementations
/// must be safe for sequential reuse; callers sharing one store between
/// threads rely on the implementation's own synchronization.
pub trait DocumentStore: std::fmt::Debug {
    /// Insert a new document
    fn insert(&self, namespace: &str, document: Document) -> DocumentStoreResult<()>;

    /// Apply `ops` atomically to the first document matching `criteria`
    fn update(
        &self,
        namespace: &str,
        criteria: &Criteria,
        ops: &[UpdateOp],
    ) -> DocumentStoreResult<UpdateResult>;

    /// All documents matching `criteria`
    fn query(&self, namespace: &str, criteria: &Criteria) -> DocumentStoreResult<Cursor<'_>>;
}
