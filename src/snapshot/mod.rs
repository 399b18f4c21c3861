//! Version snapshots of tag groups
//!
//! A stored record keeps its snapshots in a `versions` object keyed by
//! version number. `VersionKey::Latest` names the snapshot that every save
//! overwrites.

mod builder;
mod key;

pub use builder::{BuiltSnapshot, SnapshotBuilder, SnapshotLoad, CRC32, TAGS};
pub use key::VersionKey;
