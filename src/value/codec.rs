//! Encode/decode between `TagValue` and JSON document values

use serde_json::{Number, Value};

use super::types::{TagValue, ValueType};

const NAN: &str = "NaN";
const POS_INF: &str = "Infinity";
const NEG_INF: &str = "-Infinity";

/// Result of encoding a value buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Encoded {
    /// The `data` array for the document.
    Payload(Value),
    /// The type has no document form; nothing was written.
    Unsupported(ValueType),
}

impl Encoded {
    /// The document form. Unsupported types become an empty array.
    pub fn into_document(self) -> Value {
        match self {
            Encoded::Payload(value) => value,
            Encoded::Unsupported(_) => Value::Array(Vec::new()),
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Encoded::Unsupported(_))
    }
}

/// Result of decoding a `data` array.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// Values restored, in document order, and how many entries were consumed.
    Values { value: TagValue, consumed: usize },
    /// The type has no document form; no values were restored.
    Unsupported(ValueType),
}

impl Decoded {
    pub fn consumed(&self) -> usize {
        match self {
            Decoded::Values { consumed, .. } => *consumed,
            Decoded::Unsupported(_) => 0,
        }
    }
}

/// Encodes the first `count` elements of `value`.
pub fn encode(value: &TagValue, count: u32) -> Encoded {
    let n = count as usize;
    let entries: Vec<Value> = match value {
        TagValue::UInt8(v) => v.iter().take(n).map(|x| Value::from(*x)).collect(),
        TagValue::UInt16(v) => v.iter().take(n).map(|x| Value::from(*x)).collect(),
        TagValue::UInt32(v) => v.iter().take(n).map(|x| Value::from(*x)).collect(),
        TagValue::UInt64(v) => v.iter().take(n).map(|x| Value::from(*x)).collect(),
        TagValue::Real16(_) => return Encoded::Unsupported(ValueType::Real16),
        TagValue::Real32(v) => v.iter().take(n).map(|x| encode_real(f64::from(*x))).collect(),
        TagValue::Real64(v) => v.iter().take(n).map(|x| encode_real(*x)).collect(),
        TagValue::String8(s) => vec![Value::String(s.clone())],
    };
    Encoded::Payload(Value::Array(entries))
}

/// Decodes at most `capacity` entries of `document` as `value_type`.
///
/// Entries are consumed in order until one does not fit the type; a
/// document that is not an array decodes to no values.
pub fn decode(value_type: ValueType, document: &Value, capacity: usize) -> Decoded {
    let entries: &[Value] = match document {
        Value::Array(entries) => entries,
        _ => &[],
    };

    let value = match value_type {
        ValueType::UInt8 => TagValue::UInt8(take(entries, capacity, |e| uint(e))),
        ValueType::UInt16 => TagValue::UInt16(take(entries, capacity, |e| uint(e))),
        ValueType::UInt32 => TagValue::UInt32(take(entries, capacity, |e| uint(e))),
        ValueType::UInt64 => TagValue::UInt64(take(entries, capacity, |e| e.as_u64())),
        ValueType::Real16 => return Decoded::Unsupported(ValueType::Real16),
        ValueType::Real32 => {
            TagValue::Real32(take(entries, capacity, |e| decode_real(e).and_then(real32)))
        }
        ValueType::Real64 => TagValue::Real64(take(entries, capacity, decode_real)),
        ValueType::String8 => match entries.first() {
            Some(Value::String(s)) => {
                return Decoded::Values {
                    value: TagValue::String8(s.clone()),
                    consumed: 1,
                }
            }
            _ => TagValue::empty(ValueType::String8),
        },
    };

    let consumed = match &value {
        TagValue::String8(_) => 0,
        other => other.len(),
    };
    Decoded::Values { value, consumed }
}

fn take<T>(entries: &[Value], capacity: usize, convert: impl Fn(&Value) -> Option<T>) -> Vec<T> {
    entries
        .iter()
        .take(capacity)
        .map_while(convert)
        .collect()
}

/// Unsigned integer that fits the target width exactly.
fn uint<T: TryFrom<u64>>(entry: &Value) -> Option<T> {
    entry.as_u64().and_then(|n| T::try_from(n).ok())
}

/// Narrows to f32; finite values beyond the f32 range do not fit.
fn real32(x: f64) -> Option<f32> {
    if x.is_finite() && x.abs() > f64::from(f32::MAX) {
        return None;
    }
    Some(x as f32)
}

fn encode_real(x: f64) -> Value {
    match Number::from_f64(x) {
        Some(n) => Value::Number(n),
        None if x.is_nan() => Value::String(NAN.to_string()),
        None if x > 0.0 => Value::String(POS_INF.to_string()),
        None => Value::String(NEG_INF.to_string()),
    }
}

fn decode_real(entry: &Value) -> Option<f64> {
    match entry {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.as_str() {
            NAN => Some(f64::NAN),
            POS_INF => Some(f64::INFINITY),
            NEG_INF => Some(f64::NEG_INFINITY),
            _ => None,
        },
        _ => None,
    }
}
