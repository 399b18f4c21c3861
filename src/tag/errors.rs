//! Errors raised when mutating tags and tag groups in memory

use thiserror::Error;

use crate::value::ValueType;

/// Result type for in-memory tag operations
pub type TagResult<T> = Result<T, TagError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("Tag {tag_id} holds {expected} values, got {found}")]
    TypeMismatch {
        tag_id: u16,
        expected: ValueType,
        found: ValueType,
    },

    #[error("Tag {tag_id}: writing {len} values at index {index} exceeds count {count}")]
    OutOfBounds {
        tag_id: u16,
        index: usize,
        len: usize,
        count: u32,
    },

    #[error("Tag {0} already exists in tag group")]
    DuplicateTag(u16),

    #[error("Tag {0} not found in tag group")]
    TagNotFound(u16),

    #[error("Tag group {0} reached the last usable version")]
    VersionExhausted(u16),
}
