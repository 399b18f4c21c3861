//! # Persistence Errors

use thiserror::Error;

use crate::node::NodeId;
use crate::store::DocumentStoreError;
use crate::taggroup::TagGroupId;

/// Result type for tag group persistence
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tag group save and load failures
///
/// Every variant names the tag group; store failures also name the
/// namespace they were addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The store could not be reached or queried
    #[error("Tag group {taggroup_id}: store {namespace} unavailable: {source}")]
    StoreUnavailable {
        taggroup_id: TagGroupId,
        namespace: String,
        source: DocumentStoreError,
    },

    /// Insert or update was rejected, or the update matched no record
    #[error("Tag group {taggroup_id} of node {node_id}: write to {namespace} failed: {reason}")]
    StoreWriteFailed {
        taggroup_id: TagGroupId,
        node_id: NodeId,
        namespace: String,
        reason: String,
    },

    /// Tag group was saved before but carries no store key
    #[error("Tag group {taggroup_id}: saved to {namespace} but has no store key")]
    MissingStoreKey {
        taggroup_id: TagGroupId,
        namespace: String,
    },

    #[error("Tag group {taggroup_id} not found on node {node_id}")]
    TagGroupNotFound {
        node_id: NodeId,
        taggroup_id: TagGroupId,
    },
}

impl PersistenceError {
    pub fn taggroup_id(&self) -> TagGroupId {
        match self {
            PersistenceError::StoreUnavailable { taggroup_id, .. }
            | PersistenceError::StoreWriteFailed { taggroup_id, .. }
            | PersistenceError::MissingStoreKey { taggroup_id, .. }
            | PersistenceError::TagGroupNotFound { taggroup_id, .. } => *taggroup_id,
        }
    }

    /// Error code string, stable for logs and CLI output
    pub fn code(&self) -> &'static str {
        match self {
            PersistenceError::StoreUnavailable { .. } => "TAGVAULT_STORE_UNAVAILABLE",
            PersistenceError::StoreWriteFailed { .. } => "TAGVAULT_STORE_WRITE_FAILED",
            PersistenceError::MissingStoreKey { .. } => "TAGVAULT_MISSING_STORE_KEY",
            PersistenceError::TagGroupNotFound { .. } => "TAGVAULT_TAGGROUP_NOT_FOUND",
        }
    }
}

/// Store configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid {field}: '{value}'. {reason}")]
    Invalid {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}
