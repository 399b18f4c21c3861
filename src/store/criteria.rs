//! Match criteria for queries and updates
//!
//! A conjunction of exact-equality predicates on top-level fields.
//! No type coercion: `10` does not match `"10"`, and a missing or null field
//! never matches.

use serde_json::Value;

/// Equality predicates, all of which must hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    predicates: Vec<(String, Value)>,
}

impl Criteria {
    /// Criteria matching every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `field == value`.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.predicates.push((field.into(), value.into()));
        self
    }

    /// Checks if a document matches all predicates
    pub fn matches(&self, document: &Value) -> bool {
        self.predicates
            .iter()
            .all(|(field, expected)| match document.get(field) {
                Some(Value::Null) | None => false,
                Some(actual) => actual == expected,
            })
    }
}
