//! Plain in-memory node

use std::collections::BTreeMap;

use crate::taggroup::{TagGroup, TagGroupId};

use super::{Node, NodeId};

/// A node that owns its tag groups in a map
#[derive(Debug, Clone, Default)]
pub struct MemoryNode {
    id: NodeId,
    tag_groups: BTreeMap<TagGroupId, TagGroup>,
}

impl MemoryNode {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            tag_groups: BTreeMap::new(),
        }
    }

    /// Tag groups ordered by id.
    pub fn tag_groups(&self) -> impl Iterator<Item = &TagGroup> {
        self.tag_groups.values()
    }

    pub fn remove_tag_group(&mut self, id: TagGroupId) -> Option<TagGroup> {
        self.tag_groups.remove(&id)
    }
}

impl Node for MemoryNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn create_tag_group(&mut self, id: TagGroupId, custom_type: i32) -> Option<&mut TagGroup> {
        if self.tag_groups.contains_key(&id) {
            return None;
        }
        Some(
            self.tag_groups
                .entry(id)
                .or_insert_with(|| TagGroup::new(id, custom_type)),
        )
    }

    fn tag_group(&self, id: TagGroupId) -> Option<&TagGroup> {
        self.tag_groups.get(&id)
    }

    fn tag_group_mut(&mut self, id: TagGroupId) -> Option<&mut TagGroup> {
        self.tag_groups.get_mut(&id)
    }
}
