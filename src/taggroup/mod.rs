//! Tag groups: versioned tag collections owned by a node

pub mod checksum;
mod group;

pub use checksum::{format_checksum, tags_checksum};
pub use group::{TagGroup, TagGroupId, MAX_VERSION};
