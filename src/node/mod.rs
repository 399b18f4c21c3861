//! Node capability
//!
//! Tag groups belong to graph nodes, which live outside this crate. The
//! persistence layer only needs a node's id and the ability to create and
//! find tag groups under it.

mod memory;

pub use memory::MemoryNode;

use crate::taggroup::{TagGroup, TagGroupId};

/// Node identifier, unique on the server.
pub type NodeId = u32;

/// Owner of tag groups
pub trait Node {
    fn id(&self) -> NodeId;

    /// Creates an empty tag group. Returns `None` if the id is taken or the
    /// node does not accept new tag groups.
    fn create_tag_group(&mut self, id: TagGroupId, custom_type: i32) -> Option<&mut TagGroup>;

    fn tag_group(&self, id: TagGroupId) -> Option<&TagGroup>;

    fn tag_group_mut(&mut self, id: TagGroupId) -> Option<&mut TagGroup>;
}
