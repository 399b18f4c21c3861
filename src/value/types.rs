//! Value types carried by tags

use std::fmt;

/// Data type of a tag value, with its protocol wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValueType {
    UInt8 = 1,
    UInt16 = 2,
    UInt32 = 3,
    UInt64 = 4,
    /// Half-precision reals. Accepted as a tag type, never persisted.
    Real16 = 5,
    Real32 = 6,
    Real64 = 7,
    /// UTF-8 string, single value.
    String8 = 8,
}

impl ValueType {
    /// All value types, in wire-code order.
    pub const ALL: [ValueType; 8] = [
        ValueType::UInt8,
        ValueType::UInt16,
        ValueType::UInt32,
        ValueType::UInt64,
        ValueType::Real16,
        ValueType::Real32,
        ValueType::Real64,
        ValueType::String8,
    ];

    /// Creates a ValueType from its wire code.
    pub fn from_code(code: i64) -> Option<ValueType> {
        match code {
            1 => Some(ValueType::UInt8),
            2 => Some(ValueType::UInt16),
            3 => Some(ValueType::UInt32),
            4 => Some(ValueType::UInt64),
            5 => Some(ValueType::Real16),
            6 => Some(ValueType::Real32),
            7 => Some(ValueType::Real64),
            8 => Some(ValueType::String8),
            _ => None,
        }
    }

    /// Returns the wire code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether values of this type have a document form. Real16 does not.
    pub fn is_persisted(self) -> bool {
        self != ValueType::Real16
    }

    /// Lowercase name, also accepted by `from_name`.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::UInt8 => "uint8",
            ValueType::UInt16 => "uint16",
            ValueType::UInt32 => "uint32",
            ValueType::UInt64 => "uint64",
            ValueType::Real16 => "real16",
            ValueType::Real32 => "real32",
            ValueType::Real64 => "real64",
            ValueType::String8 => "string8",
        }
    }

    pub fn from_name(name: &str) -> Option<ValueType> {
        let lower = name.to_ascii_lowercase();
        ValueType::ALL.into_iter().find(|t| t.name() == lower)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A typed value buffer.
///
/// Array variants hold one element per slot. `Real16` holds raw half-float
/// bit patterns.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    UInt8(Vec<u8>),
    UInt16(Vec<u16>),
    UInt32(Vec<u32>),
    UInt64(Vec<u64>),
    Real16(Vec<u16>),
    Real32(Vec<f32>),
    Real64(Vec<f64>),
    String8(String),
}

impl TagValue {
    /// Allocates a zeroed buffer of `count` elements (an empty string for
    /// `String8`).
    pub fn zeroed(value_type: ValueType, count: u32) -> Self {
        let n = count as usize;
        match value_type {
            ValueType::UInt8 => TagValue::UInt8(vec![0; n]),
            ValueType::UInt16 => TagValue::UInt16(vec![0; n]),
            ValueType::UInt32 => TagValue::UInt32(vec![0; n]),
            ValueType::UInt64 => TagValue::UInt64(vec![0; n]),
            ValueType::Real16 => TagValue::Real16(vec![0; n]),
            ValueType::Real32 => TagValue::Real32(vec![0.0; n]),
            ValueType::Real64 => TagValue::Real64(vec![0.0; n]),
            ValueType::String8 => TagValue::String8(String::new()),
        }
    }

    /// Empty value of the given type.
    pub fn empty(value_type: ValueType) -> Self {
        Self::zeroed(value_type, 0)
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            TagValue::UInt8(_) => ValueType::UInt8,
            TagValue::UInt16(_) => ValueType::UInt16,
            TagValue::UInt32(_) => ValueType::UInt32,
            TagValue::UInt64(_) => ValueType::UInt64,
            TagValue::Real16(_) => ValueType::Real16,
            TagValue::Real32(_) => ValueType::Real32,
            TagValue::Real64(_) => ValueType::Real64,
            TagValue::String8(_) => ValueType::String8,
        }
    }

    /// Number of elements. A string always counts as one value.
    pub fn len(&self) -> usize {
        match self {
            TagValue::UInt8(v) => v.len(),
            TagValue::UInt16(v) | TagValue::Real16(v) => v.len(),
            TagValue::UInt32(v) => v.len(),
            TagValue::UInt64(v) => v.len(),
            TagValue::Real32(v) => v.len(),
            TagValue::Real64(v) => v.len(),
            TagValue::String8(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            TagValue::String8(s) => s.is_empty(),
            other => other.len() == 0,
        }
    }

    /// Copies `src` into this buffer starting at `index`.
    ///
    /// Returns false, leaving the buffer untouched, when the types differ or
    /// the write would run past the end. A string replaces the whole value
    /// and only accepts index 0.
    pub fn overwrite(&mut self, index: usize, src: &TagValue) -> bool {
        fn copy<T: Copy>(dst: &mut [T], index: usize, src: &[T]) -> bool {
            match index.checked_add(src.len()) {
                Some(end) if end <= dst.len() => {
                    dst[index..end].copy_from_slice(src);
                    true
                }
                _ => false,
            }
        }

        match (self, src) {
            (TagValue::UInt8(d), TagValue::UInt8(s)) => copy(d, index, s),
            (TagValue::UInt16(d), TagValue::UInt16(s)) => copy(d, index, s),
            (TagValue::UInt32(d), TagValue::UInt32(s)) => copy(d, index, s),
            (TagValue::UInt64(d), TagValue::UInt64(s)) => copy(d, index, s),
            (TagValue::Real16(d), TagValue::Real16(s)) => copy(d, index, s),
            (TagValue::Real32(d), TagValue::Real32(s)) => copy(d, index, s),
            (TagValue::Real64(d), TagValue::Real64(s)) => copy(d, index, s),
            (TagValue::String8(d), TagValue::String8(s)) if index == 0 => {
                d.clone_from(s);
                true
            }
            _ => false,
        }
    }

    /// Little-endian byte image of the buffer, used for checksums.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        match self {
            TagValue::UInt8(v) => v.clone(),
            TagValue::UInt16(v) | TagValue::Real16(v) => {
                v.iter().flat_map(|x| x.to_le_bytes()).collect()
            }
            TagValue::UInt32(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
            TagValue::UInt64(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
            TagValue::Real32(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
            TagValue::Real64(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
            TagValue::String8(s) => s.as_bytes().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_codes_roundtrip() {
        for t in ValueType::ALL {
            assert_eq!(ValueType::from_code(t.code() as i64), Some(t));
        }
        assert_eq!(ValueType::from_code(0), None);
        assert_eq!(ValueType::from_code(9), None);
        assert_eq!(ValueType::from_code(-1), None);
    }

    #[test]
    fn test_only_real16_is_not_persisted() {
        for t in ValueType::ALL {
            assert_eq!(t.is_persisted(), t != ValueType::Real16, "{}", t);
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(ValueType::from_name("UInt32"), Some(ValueType::UInt32));
        assert_eq!(ValueType::from_name("string8"), Some(ValueType::String8));
        assert_eq!(ValueType::from_name("int32"), None);
    }

    #[test]
    fn test_zeroed_sizes_buffer() {
        assert_eq!(TagValue::zeroed(ValueType::UInt16, 4), TagValue::UInt16(vec![0; 4]));
        assert_eq!(TagValue::zeroed(ValueType::String8, 12), TagValue::String8(String::new()));
        assert_eq!(TagValue::zeroed(ValueType::Real64, 0).len(), 0);
    }

    #[test]
    fn test_overwrite_bounds_and_types() {
        let mut buf = TagValue::zeroed(ValueType::UInt32, 3);
        assert!(buf.overwrite(1, &TagValue::UInt32(vec![7, 8])));
        assert_eq!(buf, TagValue::UInt32(vec![0, 7, 8]));

        assert!(!buf.overwrite(2, &TagValue::UInt32(vec![1, 2])));
        assert!(!buf.overwrite(0, &TagValue::UInt8(vec![1])));
        assert_eq!(buf, TagValue::UInt32(vec![0, 7, 8]));
    }

    #[test]
    fn test_overwrite_string() {
        let mut buf = TagValue::empty(ValueType::String8);
        assert!(buf.overwrite(0, &TagValue::String8("label".into())));
        assert!(!buf.overwrite(1, &TagValue::String8("x".into())));
        assert_eq!(buf, TagValue::String8("label".into()));
    }

    #[test]
    fn test_le_bytes() {
        assert_eq!(TagValue::UInt16(vec![0x0102]).to_le_bytes(), vec![0x02, 0x01]);
        assert_eq!(TagValue::String8("ab".into()).to_le_bytes(), b"ab".to_vec());
    }
}
