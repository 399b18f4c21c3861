//! Update operations
//!
//! Paths are dotted: `versions.4294967295` addresses key `4294967295` inside
//! the top-level `versions` object. Missing intermediate objects are created.
//! A set of operations is applied all-or-nothing.

use serde_json::{Map, Value};

use super::errors::{DocumentStoreError, DocumentStoreResult};

/// One field mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOp {
    /// Replace (or create) the value at `path`
    Set { path: String, value: Value },
}

impl UpdateOp {
    pub fn set(path: impl Into<String>, value: impl Into<Value>) -> Self {
        UpdateOp::Set {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            UpdateOp::Set { path, .. } => path,
        }
    }
}

/// Outcome of an update request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateResult {
    /// Documents that matched the criteria (0 or 1)
    pub matched: usize,
}

/// Applies `ops` to a copy of `document` and returns it.
///
/// `document` is left untouched when any operation fails.
pub fn apply_update(document: &Value, ops: &[UpdateOp]) -> DocumentStoreResult<Value> {
    let mut updated = document.clone();
    for op in ops {
        match op {
            UpdateOp::Set { path, value } => set_path(&mut updated, path, value.clone())?,
        }
    }
    Ok(updated)
}

fn set_path(document: &mut Value, path: &str, value: Value) -> DocumentStoreResult<()> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(DocumentStoreError::InvalidDocument(format!(
            "invalid update path '{}'",
            path
        )));
    }

    let (last, parents) = match segments.split_last() {
        Some(split) => split,
        None => {
            return Err(DocumentStoreError::InvalidDocument(
                "empty update path".to_string(),
            ))
        }
    };

    let mut current = document;
    for segment in parents {
        let object = as_object(current, path)?;
        current = object
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    as_object(current, path)?.insert(last.to_string(), value);
    Ok(())
}

fn as_object<'a>(value: &'a mut Value, path: &str) -> DocumentStoreResult<&'a mut Map<String, Value>> {
    value.as_object_mut().ok_or_else(|| {
        DocumentStoreError::InvalidDocument(format!(
            "update path '{}' crosses a non-object value",
            path
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_top_level() {
        let doc = json!({"current_version": 1});
        let updated = apply_update(&doc, &[UpdateOp::set("current_version", 2)]).unwrap();
        assert_eq!(updated, json!({"current_version": 2}));
    }

    #[test]
    fn test_set_nested_keeps_siblings() {
        let doc = json!({"versions": {"1": {"crc32": 1}}});
        let updated = apply_update(
            &doc,
            &[UpdateOp::set("versions.4294967295", json!({"crc32": 2}))],
        )
        .unwrap();
        assert_eq!(
            updated,
            json!({"versions": {"1": {"crc32": 1}, "4294967295": {"crc32": 2}}})
        );
    }

    #[test]
    fn test_set_creates_intermediate_objects() {
        let updated = apply_update(&json!({}), &[UpdateOp::set("a.b.c", 1)]).unwrap();
        assert_eq!(updated, json!({"a": {"b": {"c": 1}}}));
    }

    #[test]
    fn test_failure_is_all_or_nothing() {
        let doc = json!({"a": 1, "b": 5});
        let result = apply_update(
            &doc,
            &[UpdateOp::set("b", 6), UpdateOp::set("a.x", 2)],
        );
        assert!(matches!(result, Err(DocumentStoreError::InvalidDocument(_))));
        assert_eq!(doc, json!({"a": 1, "b": 5}));
    }

    #[test]
    fn test_rejects_empty_segments() {
        assert!(apply_update(&json!({}), &[UpdateOp::set("a..b", 1)]).is_err());
        assert!(apply_update(&json!({}), &[UpdateOp::set("", 1)]).is_err());
    }
}
