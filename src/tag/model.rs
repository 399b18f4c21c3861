//! In-memory tag

use crate::entity::EntityState;
use crate::value::{TagValue, ValueType};

use super::errors::{TagError, TagResult};

/// Tag identifier, unique within its tag group.
pub type TagId = u16;

/// A single typed attribute of a tag group.
///
/// The value buffer is sized to `count` when the tag is created; `count`
/// stays authoritative even when fewer values are ever written.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    id: TagId,
    value_type: ValueType,
    count: u32,
    custom_type: i32,
    value: TagValue,
    state: EntityState,
    initialized: bool,
}

impl Tag {
    /// Creates a tag with a zeroed value buffer.
    pub fn new(id: TagId, value_type: ValueType, count: u32, custom_type: i32) -> Self {
        Self {
            id,
            value_type,
            count,
            custom_type,
            value: TagValue::zeroed(value_type, count),
            state: EntityState::Reserved,
            initialized: false,
        }
    }

    pub fn id(&self) -> TagId {
        self.id
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn custom_type(&self) -> i32 {
        self.custom_type
    }

    pub fn value(&self) -> &TagValue {
        &self.value
    }

    pub fn state(&self) -> EntityState {
        self.state
    }

    pub fn set_state(&mut self, state: EntityState) {
        self.state = state;
    }

    /// Whether the tag has received its first value.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    /// Writes `values` into the buffer starting at `index`.
    pub fn set_values(&mut self, index: usize, values: &TagValue) -> TagResult<()> {
        if values.value_type() != self.value_type {
            return Err(TagError::TypeMismatch {
                tag_id: self.id,
                expected: self.value_type,
                found: values.value_type(),
            });
        }

        if !self.value.overwrite(index, values) {
            return Err(TagError::OutOfBounds {
                tag_id: self.id,
                index,
                len: values.len(),
                count: self.count,
            });
        }

        self.initialized = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tag_is_zeroed() {
        let tag = Tag::new(1, ValueType::UInt32, 3, 7);
        assert_eq!(tag.value(), &TagValue::UInt32(vec![0, 0, 0]));
        assert_eq!(tag.state(), EntityState::Reserved);
        assert!(!tag.is_initialized());
    }

    #[test]
    fn test_set_values() {
        let mut tag = Tag::new(1, ValueType::UInt32, 3, 0);
        tag.set_values(0, &TagValue::UInt32(vec![5, 6, 7])).unwrap();
        assert_eq!(tag.value(), &TagValue::UInt32(vec![5, 6, 7]));
        assert!(tag.is_initialized());

        tag.set_values(2, &TagValue::UInt32(vec![8])).unwrap();
        assert_eq!(tag.value(), &TagValue::UInt32(vec![5, 6, 8]));
    }

    #[test]
    fn test_set_values_rejects_wrong_type() {
        let mut tag = Tag::new(4, ValueType::Real32, 2, 0);
        let err = tag.set_values(0, &TagValue::Real64(vec![1.0])).unwrap_err();
        assert_eq!(
            err,
            TagError::TypeMismatch {
                tag_id: 4,
                expected: ValueType::Real32,
                found: ValueType::Real64
            }
        );
    }

    #[test]
    fn test_set_values_rejects_overflow() {
        let mut tag = Tag::new(2, ValueType::UInt8, 2, 0);
        let result = tag.set_values(1, &TagValue::UInt8(vec![1, 2]));
        assert!(matches!(result, Err(TagError::OutOfBounds { index: 1, len: 2, .. })));
        assert_eq!(tag.value(), &TagValue::UInt8(vec![0, 0]));
    }
}
