//! Tag serializer
//!
//! One tag maps to one document:
//!
//! ```text
//! { "data_type": 3, "count": 3, "custom_type": 0, "data": [5, 6, 7] }
//! ```
//!
//! A tag is only rebuilt once `data_type`, `count` and `custom_type` are all
//! present and valid.

use serde_json::{json, Value};

use crate::value::{self, Decoded, ValueType};

use super::model::Tag;

pub const DATA_TYPE: &str = "data_type";
pub const COUNT: &str = "count";
pub const CUSTOM_TYPE: &str = "custom_type";
pub const DATA: &str = "data";

/// Scalar fields of a tag document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagHeader {
    pub value_type: ValueType,
    pub count: u32,
    pub custom_type: i32,
}

/// What loading a tag payload restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagLoad {
    /// Number of values written into the tag, starting at index 0
    Restored(usize),
    /// The tag's type has no document form
    Unsupported,
}

/// Converts tags to and from documents
pub struct TagSerializer;

impl TagSerializer {
    /// Builds the document for `tag`, with `data` sized to the tag's count.
    pub fn save(tag: &Tag) -> Value {
        let data = value::encode(tag.value(), tag.count()).into_document();
        json!({
            DATA_TYPE: tag.value_type().code(),
            COUNT: tag.count(),
            CUSTOM_TYPE: tag.custom_type(),
            DATA: data,
        })
    }

    /// Reads the scalar fields. `None` when any is missing or out of range.
    pub fn read_header(document: &Value) -> Option<TagHeader> {
        let value_type = document
            .get(DATA_TYPE)
            .and_then(Value::as_i64)
            .and_then(ValueType::from_code)?;
        let count = document
            .get(COUNT)
            .and_then(Value::as_u64)
            .and_then(|c| u32::try_from(c).ok())?;
        let custom_type = document
            .get(CUSTOM_TYPE)
            .and_then(Value::as_i64)
            .and_then(|c| i32::try_from(c).ok())?;

        Some(TagHeader {
            value_type,
            count,
            custom_type,
        })
    }

    /// Fills the value buffer of `tag` from the document's `data` array.
    pub fn load(document: &Value, tag: &mut Tag) -> TagLoad {
        let data = document.get(DATA).unwrap_or(&Value::Null);

        match value::decode(tag.value_type(), data, tag.count() as usize) {
            Decoded::Values { value, consumed } => {
                if consumed == 0 {
                    return TagLoad::Restored(0);
                }
                match tag.set_values(0, &value) {
                    Ok(()) => TagLoad::Restored(consumed),
                    Err(_) => TagLoad::Restored(0),
                }
            }
            Decoded::Unsupported(_) => TagLoad::Unsupported,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::TagValue;

    fn uint32_tag() -> Tag {
        let mut tag = Tag::new(1, ValueType::UInt32, 3, 0);
        tag.set_values(0, &TagValue::UInt32(vec![5, 6, 7])).unwrap();
        tag
    }

    #[test]
    fn test_save_layout() {
        let doc = TagSerializer::save(&uint32_tag());
        assert_eq!(
            doc,
            json!({"data_type": 3, "count": 3, "custom_type": 0, "data": [5, 6, 7]})
        );
    }

    #[test]
    fn test_save_string_tag() {
        let mut tag = Tag::new(2, ValueType::String8, 1, -4);
        tag.set_values(0, &TagValue::String8("name".into())).unwrap();
        let doc = TagSerializer::save(&tag);
        assert_eq!(doc["data"], json!(["name"]));
        assert_eq!(doc["custom_type"], json!(-4));
    }

    #[test]
    fn test_save_real16_has_empty_data() {
        let tag = Tag::new(3, ValueType::Real16, 2, 0);
        let doc = TagSerializer::save(&tag);
        assert_eq!(doc["data_type"], json!(5));
        assert_eq!(doc["count"], json!(2));
        assert_eq!(doc["data"], json!([]));
    }

    #[test]
    fn test_read_header() {
        let doc = TagSerializer::save(&uint32_tag());
        assert_eq!(
            TagSerializer::read_header(&doc),
            Some(TagHeader {
                value_type: ValueType::UInt32,
                count: 3,
                custom_type: 0
            })
        );
    }

    #[test]
    fn test_read_header_incomplete() {
        assert_eq!(
            TagSerializer::read_header(&json!({"data_type": 3, "custom_type": 0})),
            None
        );
        assert_eq!(
            TagSerializer::read_header(&json!({"data_type": 3, "count": 1})),
            None
        );
        assert_eq!(
            TagSerializer::read_header(&json!({"count": 1, "custom_type": 0})),
            None
        );
    }

    #[test]
    fn test_read_header_invalid_values() {
        // unknown type code
        assert_eq!(
            TagSerializer::read_header(&json!({"data_type": 42, "count": 1, "custom_type": 0})),
            None
        );
        // count that does not fit u32
        assert_eq!(
            TagSerializer::read_header(
                &json!({"data_type": 1, "count": 5_000_000_000u64, "custom_type": 0})
            ),
            None
        );
        assert_eq!(
            TagSerializer::read_header(&json!({"data_type": 1, "count": "3", "custom_type": 0})),
            None
        );
    }

    #[test]
    fn test_load_fills_in_place() {
        let doc = json!({"data_type": 3, "count": 3, "custom_type": 0, "data": [5, 6, 7]});
        let mut tag = Tag::new(1, ValueType::UInt32, 3, 0);
        assert_eq!(TagSerializer::load(&doc, &mut tag), TagLoad::Restored(3));
        assert_eq!(tag.value(), &TagValue::UInt32(vec![5, 6, 7]));
    }

    #[test]
    fn test_load_short_data_keeps_count() {
        let doc = json!({"data_type": 2, "count": 4, "custom_type": 0, "data": [9]});
        let mut tag = Tag::new(1, ValueType::UInt16, 4, 0);
        assert_eq!(TagSerializer::load(&doc, &mut tag), TagLoad::Restored(1));
        assert_eq!(tag.count(), 4);
        assert_eq!(tag.value(), &TagValue::UInt16(vec![9, 0, 0, 0]));
    }

    #[test]
    fn test_load_missing_data() {
        let doc = json!({"data_type": 1, "count": 2, "custom_type": 0});
        let mut tag = Tag::new(1, ValueType::UInt8, 2, 0);
        assert_eq!(TagSerializer::load(&doc, &mut tag), TagLoad::Restored(0));
    }

    #[test]
    fn test_load_real16_unsupported() {
        let doc = json!({"data_type": 5, "count": 2, "custom_type": 0, "data": []});
        let mut tag = Tag::new(1, ValueType::Real16, 2, 0);
        assert_eq!(TagSerializer::load(&doc, &mut tag), TagLoad::Unsupported);
    }
}
