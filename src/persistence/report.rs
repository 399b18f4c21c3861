//! Save and load results

use std::fmt;

use crate::tag::TagId;
use crate::taggroup::TagGroup;

/// What a successful save did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// First save: a new record was inserted
    Inserted,
    /// The existing record was updated to the current version
    Updated,
    /// The store already held the current version
    Unchanged,
}

impl SaveOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaveOutcome::Inserted => "inserted",
            SaveOutcome::Updated => "updated",
            SaveOutcome::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for SaveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Details of a load that found its record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// The requested version's snapshot was present
    pub snapshot_found: bool,
    pub loaded_tags: usize,
    /// Keys of incomplete tag entries that were not rebuilt
    pub skipped_tags: Vec<String>,
    /// Tags rebuilt without values because their type has no stored form
    pub unsupported_tags: Vec<TagId>,
    /// Whether the rebuilt tags match the stored checksum. `None` when no
    /// snapshot or no checksum was stored.
    pub checksum_verified: Option<bool>,
}

impl LoadReport {
    /// Loaded without skipped tags or checksum mismatch.
    pub fn is_clean(&self) -> bool {
        self.skipped_tags.is_empty() && self.checksum_verified != Some(false)
    }
}

/// A tag group rebuilt on its node
#[derive(Debug)]
pub struct LoadedTagGroup<'n> {
    pub tag_group: &'n mut TagGroup,
    pub report: LoadReport,
}
