//! CRC32 checksum of a tag group's contents
//!
//! Uses CRC32 (IEEE polynomial) via the crc32fast crate. The checksum covers,
//! per tag in ascending id order: id, type code, count, custom type and the
//! little-endian value bytes. Id order keeps it stable across reloads, which
//! may rebuild tags in a different order. Value bytes of types that are never
//! persisted are left out, since a reload cannot restore them.

use crc32fast::Hasher;

use crate::tag::Tag;

/// Checksum over a set of tags.
pub fn tags_checksum<'a>(tags: impl IntoIterator<Item = &'a Tag>) -> u32 {
    let mut sorted: Vec<&Tag> = tags.into_iter().collect();
    sorted.sort_by_key(|tag| tag.id());

    let mut hasher = Hasher::new();
    for tag in sorted {
        hasher.update(&tag.id().to_le_bytes());
        hasher.update(&[tag.value_type().code()]);
        hasher.update(&tag.count().to_le_bytes());
        hasher.update(&tag.custom_type().to_le_bytes());
        if tag.value_type().is_persisted() {
            hasher.update(&tag.value().to_le_bytes());
        }
    }
    hasher.finalize()
}

/// Formats a checksum for display: `crc32:XXXXXXXX` (lowercase hex).
pub fn format_checksum(checksum: u32) -> String {
    format!("crc32:{:08x}", checksum)
}
