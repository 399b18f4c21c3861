//! In-memory tag group

use std::collections::HashMap;

use crate::entity::EntityState;
use crate::store::StoreKey;
use crate::tag::{Tag, TagError, TagId, TagResult};
use crate::value::ValueType;

use super::checksum::tags_checksum;

/// Tag group identifier, unique within its node.
pub type TagGroupId = u16;

/// Highest version a tag group can reach. `u32::MAX` names the latest
/// snapshot in stored records and is never a real version.
pub const MAX_VERSION: u32 = u32::MAX - 1;

/// A versioned collection of tags attached to a node.
///
/// Tags live in an arena of slots in insertion order with an index by tag
/// id. Removing a tag empties its slot; iteration skips empty slots.
///
/// `saved_version` is the last version confirmed in the store (`None` until
/// the first successful save). It never exceeds `version`.
#[derive(Debug, Clone)]
pub struct TagGroup {
    id: TagGroupId,
    custom_type: i32,
    version: u32,
    saved_version: Option<u32>,
    store_key: Option<StoreKey>,
    crc32: u32,
    state: EntityState,
    slots: Vec<Option<Tag>>,
    index: HashMap<TagId, usize>,
}

impl TagGroup {
    /// Creates an empty, unsaved tag group at version 0.
    pub fn new(id: TagGroupId, custom_type: i32) -> Self {
        Self {
            id,
            custom_type,
            version: 0,
            saved_version: None,
            store_key: None,
            crc32: tags_checksum(std::iter::empty()),
            state: EntityState::Reserved,
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn id(&self) -> TagGroupId {
        self.id
    }

    pub fn custom_type(&self) -> i32 {
        self.custom_type
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn saved_version(&self) -> Option<u32> {
        self.saved_version
    }

    /// True when the store holds exactly the in-memory version.
    pub fn is_saved(&self) -> bool {
        self.saved_version == Some(self.version)
    }

    pub fn store_key(&self) -> Option<&StoreKey> {
        self.store_key.as_ref()
    }

    pub fn crc32(&self) -> u32 {
        self.crc32
    }

    pub fn state(&self) -> EntityState {
        self.state
    }

    pub fn set_state(&mut self, state: EntityState) {
        self.state = state;
    }

    /// Creates a tag with the given id.
    pub fn create_tag(
        &mut self,
        id: TagId,
        value_type: ValueType,
        count: u32,
        custom_type: i32,
    ) -> TagResult<&mut Tag> {
        if self.index.contains_key(&id) {
            return Err(TagError::DuplicateTag(id));
        }

        let slot = self.slots.len();
        self.slots.push(Some(Tag::new(id, value_type, count, custom_type)));
        self.index.insert(id, slot);

        self.slots[slot].as_mut().ok_or(TagError::TagNotFound(id))
    }

    pub fn tag(&self, id: TagId) -> Option<&Tag> {
        let slot = *self.index.get(&id)?;
        self.slots.get(slot)?.as_ref()
    }

    pub fn tag_mut(&mut self, id: TagId) -> Option<&mut Tag> {
        let slot = *self.index.get(&id)?;
        self.slots.get_mut(slot)?.as_mut()
    }

    pub fn remove_tag(&mut self, id: TagId) -> Option<Tag> {
        let slot = self.index.remove(&id)?;
        self.slots.get_mut(slot)?.take()
    }

    /// Tags in insertion order.
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.slots.iter().flatten()
    }

    pub fn tag_count(&self) -> usize {
        self.index.len()
    }

    /// Advances the version after a change and refreshes the checksum.
    pub fn increment_version(&mut self) -> TagResult<u32> {
        if self.version >= MAX_VERSION {
            return Err(TagError::VersionExhausted(self.id));
        }
        self.version += 1;
        self.refresh_crc32();
        Ok(self.version)
    }

    /// Recomputes the checksum from the current tags.
    pub fn refresh_crc32(&mut self) -> u32 {
        self.crc32 = tags_checksum(self.tags());
        self.crc32
    }

    /// Checksum of the current tags without updating the stored field.
    pub fn compute_crc32(&self) -> u32 {
        tags_checksum(self.tags())
    }

    pub(crate) fn mark_saved(&mut self) {
        self.saved_version = Some(self.version);
    }

    pub(crate) fn assign_store_key(&mut self, key: StoreKey) {
        self.store_key = Some(key);
    }

    /// Sets both the version and the saved version, as after a load.
    pub(crate) fn restore_versions(&mut self, version: u32) {
        self.version = version;
        self.saved_version = Some(version);
    }

    pub(crate) fn set_crc32(&mut self, crc32: u32) {
        self.crc32 = crc32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::TagValue;

    #[test]
    fn test_new_group_is_unsaved() {
        let tg = TagGroup::new(3, 7);
        assert_eq!(tg.version(), 0);
        assert_eq!(tg.saved_version(), None);
        assert!(!tg.is_saved());
        assert!(tg.store_key().is_none());
        assert_eq!(tg.tag_count(), 0);
    }

    #[test]
    fn test_create_and_lookup() {
        let mut tg = TagGroup::new(1, 0);
        tg.create_tag(5, ValueType::UInt8, 1, 0).unwrap();
        tg.create_tag(2, ValueType::String8, 1, 0).unwrap();

        assert_eq!(tg.tag(5).unwrap().value_type(), ValueType::UInt8);
        assert_eq!(tg.tag(2).unwrap().value_type(), ValueType::String8);
        assert!(tg.tag(9).is_none());
        assert_eq!(tg.tag_count(), 2);
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        let mut tg = TagGroup::new(1, 0);
        tg.create_tag(5, ValueType::UInt8, 1, 0).unwrap();
        let err = tg.create_tag(5, ValueType::UInt16, 1, 0).unwrap_err();
        assert_eq!(err, TagError::DuplicateTag(5));
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let mut tg = TagGroup::new(1, 0);
        for id in [9, 3, 7, 1] {
            tg.create_tag(id, ValueType::UInt8, 0, 0).unwrap();
        }
        tg.remove_tag(7).unwrap();

        let ids: Vec<TagId> = tg.tags().map(Tag::id).collect();
        assert_eq!(ids, vec![9, 3, 1]);
    }

    #[test]
    fn test_remove_then_recreate() {
        let mut tg = TagGroup::new(1, 0);
        tg.create_tag(1, ValueType::UInt8, 0, 0).unwrap();
        tg.create_tag(2, ValueType::UInt8, 0, 0).unwrap();
        assert!(tg.remove_tag(1).is_some());
        assert!(tg.remove_tag(1).is_none());

        tg.create_tag(1, ValueType::UInt64, 1, 0).unwrap();
        let ids: Vec<TagId> = tg.tags().map(Tag::id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(tg.tag(1).unwrap().value_type(), ValueType::UInt64);
    }

    #[test]
    fn test_increment_version_refreshes_checksum() {
        let mut tg = TagGroup::new(1, 0);
        let empty = tg.crc32();
        tg.create_tag(1, ValueType::UInt32, 1, 0)
            .unwrap()
            .set_values(0, &TagValue::UInt32(vec![42]))
            .unwrap();
        assert_eq!(tg.crc32(), empty);

        assert_eq!(tg.increment_version().unwrap(), 1);
        assert_ne!(tg.crc32(), empty);
        assert_eq!(tg.crc32(), tg.compute_crc32());
    }

    #[test]
    fn test_version_exhausted() {
        let mut tg = TagGroup::new(8, 0);
        tg.restore_versions(MAX_VERSION);
        assert_eq!(tg.increment_version(), Err(TagError::VersionExhausted(8)));
        assert_eq!(tg.version(), MAX_VERSION);
    }

    #[test]
    fn test_mark_saved() {
        let mut tg = TagGroup::new(1, 0);
        tg.increment_version().unwrap();
        tg.mark_saved();
        assert_eq!(tg.saved_version(), Some(1));
        assert!(tg.is_saved());
        tg.increment_version().unwrap();
        assert!(!tg.is_saved());
    }
}
