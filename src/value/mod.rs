//! Value codec for tag payloads
//!
//! Maps a typed value buffer to a JSON array of scalars and back.
//!
//! # Encoding
//!
//! - Numeric arrays: one array entry per element, in index order
//! - `String8`: a single entry at position 0 holding the whole string
//! - `Real16`: not supported; encodes to an empty array and decodes to
//!   nothing, reported as `Encoded::Unsupported` / `Decoded::Unsupported`
//!
//! Non-finite reals are written as the strings `"NaN"`, `"Infinity"` and
//! `"-Infinity"` since JSON numbers cannot hold them.

mod codec;
mod types;

pub use codec::{decode, encode, Decoded, Encoded};
pub use types::{TagValue, ValueType};
