//! # Document Store Errors

use thiserror::Error;

/// Result type for document store operations
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

/// Errors reported by a document store backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentStoreError {
    /// The store could not be reached or read
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store refused a write
    #[error("Write rejected: {0}")]
    WriteRejected(String),

    /// Document or update operation is malformed
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DocumentStoreError {
    /// Whether the failure happened before the store could act on a request.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DocumentStoreError::Unavailable(_) | DocumentStoreError::Io(_))
    }
}

impl From<std::io::Error> for DocumentStoreError {
    fn from(e: std::io::Error) -> Self {
        DocumentStoreError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for DocumentStoreError {
    fn from(e: serde_json::Error) -> Self {
        DocumentStoreError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_classification() {
        assert!(DocumentStoreError::Unavailable("down".into()).is_unavailable());
        assert!(DocumentStoreError::Io("disk".into()).is_unavailable());
        assert!(!DocumentStoreError::WriteRejected("dup".into()).is_unavailable());
    }

    #[test]
    fn test_display() {
        let err = DocumentStoreError::WriteRejected("duplicate key".into());
        assert_eq!(err.to_string(), "Write rejected: duplicate key");
    }
}
