//! Tags: typed attributes of a tag group
//!
//! - `Tag`: in-memory tag with a fixed-size value buffer
//! - `TagSerializer`: one tag to and from one document

mod errors;
mod model;
pub mod serializer;

pub use errors::{TagError, TagResult};
pub use model::{Tag, TagId};
pub use serializer::{TagHeader, TagLoad, TagSerializer};
