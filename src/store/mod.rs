//! Document store capability
//!
//! The engine talks to its backing store only through `DocumentStore`:
//! insert, atomic update of the first match, and query with a cursor.
//!
//! Backends:
//! - `MemoryDocumentStore`: in-process, with simulated failures for tests
//! - `FileDocumentStore`: one JSON file, used by the CLI

mod backend;
mod criteria;
mod errors;
mod file;
mod key;
mod memory;
mod update;

pub use backend::{Cursor, Document, DocumentStore};
pub use criteria::Criteria;
pub use errors::{DocumentStoreError, DocumentStoreResult};
pub use file::FileDocumentStore;
pub use key::StoreKey;
pub use memory::MemoryDocumentStore;
pub use update::{apply_update, UpdateOp, UpdateResult};
