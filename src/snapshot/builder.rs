//! Version snapshot builder
//!
//! One snapshot holds a tag group at one version:
//!
//! ```text
//! { "crc32": 1234, "tags": { "<tag_id>": <tag document>, ... } }
//! ```
//!
//! Tags are written in the tag group's storage order. On load, order is not
//! significant; completeness is.

use serde_json::{Map, Value};

use crate::entity::EntityState;
use crate::tag::{TagId, TagLoad, TagSerializer};
use crate::taggroup::TagGroup;

use super::key::VersionKey;

pub const CRC32: &str = "crc32";
pub const TAGS: &str = "tags";

/// A snapshot document ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltSnapshot {
    /// Key inside the record's `versions` object
    pub key: String,
    pub document: Value,
    /// Tags whose values could not be written (type without document form)
    pub unsupported_tags: Vec<TagId>,
}

/// What loading a snapshot produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotLoad {
    /// Checksum recorded in the snapshot, if present
    pub stored_crc32: Option<u32>,
    /// Tags created in the tag group
    pub loaded_tags: usize,
    /// Keys of tag entries that were skipped as incomplete
    pub skipped_tags: Vec<String>,
    /// Tags created without values because their type is unsupported
    pub unsupported_tags: Vec<TagId>,
}

/// Builds and parses version snapshots
pub struct SnapshotBuilder;

impl SnapshotBuilder {
    /// Builds the snapshot of `tag_group` under `key`.
    pub fn save(tag_group: &TagGroup, key: VersionKey) -> BuiltSnapshot {
        let mut tags = Map::new();
        let mut unsupported_tags = Vec::new();

        for tag in tag_group.tags() {
            if !tag.value_type().is_persisted() {
                unsupported_tags.push(tag.id());
            }
            tags.insert(tag.id().to_string(), TagSerializer::save(tag));
        }

        let mut document = Map::new();
        document.insert(CRC32.to_string(), Value::from(tag_group.crc32()));
        document.insert(TAGS.to_string(), Value::Object(tags));

        BuiltSnapshot {
            key: key.as_key(),
            document: Value::Object(document),
            unsupported_tags,
        }
    }

    /// Creates the snapshot's tags in `tag_group`.
    ///
    /// Entries with an unparsable key, an incomplete header, or an id that
    /// already exists in the tag group are skipped and reported.
    pub fn load(snapshot: &Value, tag_group: &mut TagGroup) -> SnapshotLoad {
        let mut result = SnapshotLoad {
            stored_crc32: snapshot
                .get(CRC32)
                .and_then(Value::as_u64)
                .and_then(|c| u32::try_from(c).ok()),
            ..SnapshotLoad::default()
        };

        let Some(tags) = snapshot.get(TAGS).and_then(Value::as_object) else {
            return result;
        };

        for (key, tag_doc) in tags {
            let (tag_id, header) = match (key.parse::<TagId>(), TagSerializer::read_header(tag_doc)) {
                (Ok(id), Some(header)) => (id, header),
                _ => {
                    result.skipped_tags.push(key.clone());
                    continue;
                }
            };

            let tag = match tag_group.create_tag(
                tag_id,
                header.value_type,
                header.count,
                header.custom_type,
            ) {
                Ok(tag) => tag,
                Err(_) => {
                    result.skipped_tags.push(key.clone());
                    continue;
                }
            };

            tag.set_state(EntityState::Created);
            if TagSerializer::load(tag_doc, tag) == TagLoad::Unsupported {
                result.unsupported_tags.push(tag_id);
            }
            tag.mark_initialized();
            result.loaded_tags += 1;
        }

        result
    }
}
