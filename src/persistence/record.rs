//! Stored tag group record
//!
//! One document per tag group:
//!
//! ```text
//! {
//!   "store_key": "<uuid>",
//!   "node_id": 10,
//!   "taggroup_id": 3,
//!   "custom_type": 7,
//!   "current_version": 4,
//!   "versions": { "4294967295": <snapshot>, ... }
//! }
//! ```
//!
//! The identity fields are written once, on insert. Later saves only touch
//! `current_version` and entries under `versions`.

use serde_json::{Map, Value};

use crate::node::NodeId;
use crate::snapshot::{BuiltSnapshot, VersionKey};
use crate::store::{Criteria, StoreKey};
use crate::taggroup::{TagGroup, TagGroupId, MAX_VERSION};

pub const STORE_KEY: &str = "store_key";
pub const NODE_ID: &str = "node_id";
pub const TAGGROUP_ID: &str = "taggroup_id";
pub const CUSTOM_TYPE: &str = "custom_type";
pub const CURRENT_VERSION: &str = "current_version";
pub const VERSIONS: &str = "versions";

/// Tag group fields of a record needed to recreate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub current_version: u32,
    pub custom_type: i32,
}

/// Builds the document inserted on a tag group's first save.
pub fn new_record(
    store_key: &StoreKey,
    node_id: NodeId,
    tag_group: &TagGroup,
    snapshots: Vec<BuiltSnapshot>,
) -> Value {
    let versions: Map<String, Value> = snapshots
        .into_iter()
        .map(|snapshot| (snapshot.key, snapshot.document))
        .collect();

    let mut record = Map::new();
    record.insert(STORE_KEY.to_string(), store_key.to_value());
    record.insert(NODE_ID.to_string(), Value::from(node_id));
    record.insert(TAGGROUP_ID.to_string(), Value::from(tag_group.id()));
    record.insert(CUSTOM_TYPE.to_string(), Value::from(tag_group.custom_type()));
    record.insert(CURRENT_VERSION.to_string(), Value::from(tag_group.version()));
    record.insert(VERSIONS.to_string(), Value::Object(versions));
    Value::Object(record)
}

/// Criteria that pin an update to exactly one tag group's record.
pub fn identity_criteria(store_key: &StoreKey, node_id: NodeId, taggroup_id: TagGroupId) -> Criteria {
    Criteria::new()
        .eq(STORE_KEY, store_key.to_value())
        .eq(NODE_ID, node_id)
        .eq(TAGGROUP_ID, taggroup_id)
}

/// Whether a record found by store key belongs to this node and tag group.
pub fn identity_matches(record: &Value, node_id: NodeId, taggroup_id: TagGroupId) -> bool {
    record.get(NODE_ID).and_then(Value::as_u64) == Some(u64::from(node_id))
        && record.get(TAGGROUP_ID).and_then(Value::as_u64) == Some(u64::from(taggroup_id))
}

/// Reads `current_version` and `custom_type`; `None` if either is missing
/// or out of range.
pub fn read_header(record: &Value) -> Option<RecordHeader> {
    let current_version = record
        .get(CURRENT_VERSION)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .filter(|v| *v <= MAX_VERSION)?;
    let custom_type = record
        .get(CUSTOM_TYPE)
        .and_then(Value::as_i64)
        .and_then(|c| i32::try_from(c).ok())?;

    Some(RecordHeader {
        current_version,
        custom_type,
    })
}

pub fn snapshot(record: &Value, key: VersionKey) -> Option<&Value> {
    record.get(VERSIONS)?.get(key.as_key())
}

/// Versions present in the record, specific versions ascending, `Latest` last.
pub fn stored_versions(record: &Value) -> Vec<VersionKey> {
    let mut keys: Vec<VersionKey> = record
        .get(VERSIONS)
        .and_then(Value::as_object)
        .map(|versions| versions.keys().filter_map(|k| VersionKey::from_key(k)).collect())
        .unwrap_or_default();
    keys.sort_by_key(VersionKey::number);
    keys
}

/// Dotted update path of a snapshot key.
pub fn version_path(key: &str) -> String {
    format!("{}.{}", VERSIONS, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotBuilder;
    use serde_json::json;

    fn record() -> Value {
        json!({
            "store_key": "00000000-0000-4000-8000-000000000001",
            "node_id": 10,
            "taggroup_id": 3,
            "custom_type": 7,
            "current_version": 2,
            "versions": {
                "4294967295": {"crc32": 1, "tags": {}},
                "1": {"crc32": 2, "tags": {}},
                "garbage": {}
            }
        })
    }

    #[test]
    fn test_new_record_layout() {
        let mut tg = TagGroup::new(3, 7);
        tg.increment_version().unwrap();
        let key = StoreKey::generate();
        let snapshot = SnapshotBuilder::save(&tg, VersionKey::Latest);

        let doc = new_record(&key, 10, &tg, vec![snapshot]);
        assert_eq!(doc[STORE_KEY], key.to_value());
        assert_eq!(doc[NODE_ID], 10);
        assert_eq!(doc[TAGGROUP_ID], 3);
        assert_eq!(doc[CUSTOM_TYPE], 7);
        assert_eq!(doc[CURRENT_VERSION], 1);
        assert!(doc[VERSIONS]["4294967295"]["tags"].is_object());
    }

    #[test]
    fn test_identity_matches() {
        let doc = record();
        assert!(identity_matches(&doc, 10, 3));
        assert!(!identity_matches(&doc, 11, 3));
        assert!(!identity_matches(&doc, 10, 4));
        assert!(!identity_matches(&json!({"node_id": 10}), 10, 3));
    }

    #[test]
    fn test_read_header() {
        assert_eq!(
            read_header(&record()),
            Some(RecordHeader {
                current_version: 2,
                custom_type: 7
            })
        );
        assert_eq!(read_header(&json!({"custom_type": 7})), None);
        assert_eq!(read_header(&json!({"current_version": 1})), None);
        assert_eq!(
            read_header(&json!({"current_version": 4294967295u64, "custom_type": 0})),
            None
        );
        assert_eq!(
            read_header(&json!({"current_version": 1, "custom_type": 3000000000u64})),
            None
        );
        assert_eq!(
            read_header(&json!({"current_version": 1, "custom_type": -5})),
            Some(RecordHeader {
                current_version: 1,
                custom_type: -5
            })
        );
    }

    #[test]
    fn test_snapshot_lookup() {
        let doc = record();
        assert_eq!(snapshot(&doc, VersionKey::Latest).unwrap()["crc32"], 1);
        assert_eq!(snapshot(&doc, VersionKey::Specific(1)).unwrap()["crc32"], 2);
        assert!(snapshot(&doc, VersionKey::Specific(2)).is_none());
    }

    #[test]
    fn test_stored_versions_ignore_bad_keys() {
        assert_eq!(
            stored_versions(&record()),
            vec![VersionKey::Specific(1), VersionKey::Latest]
        );
    }

    #[test]
    fn test_version_path() {
        assert_eq!(version_path("4294967295"), "versions.4294967295");
    }

    #[test]
    fn test_identity_criteria() {
        let key = StoreKey::generate();
        let criteria = identity_criteria(&key, 10, 3);
        let mut doc = record();
        doc[STORE_KEY] = key.to_value();
        assert!(criteria.matches(&doc));
        doc[NODE_ID] = json!(11);
        assert!(!criteria.matches(&doc));
    }
}
