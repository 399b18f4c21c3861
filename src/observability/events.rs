//! Observable events
//!
//! Every log line emitted by the persistence layer names one of these.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Store configuration loaded
    ConfigLoaded,

    // Save
    /// New tag group record inserted
    TagGroupInserted,
    /// Existing record updated with a newer version
    TagGroupUpdated,
    /// Save skipped, store already holds the current version
    TagGroupUnchanged,
    /// Insert or update failed
    TagGroupSaveFailed,

    // Load
    /// Tag group rebuilt from the store
    TagGroupLoaded,
    /// No complete record matched the request
    TagGroupNotFound,
    /// The store could not be queried
    TagGroupLoadFailed,

    // Degraded content
    /// A tag entry was incomplete and not rebuilt
    TagSkipped,
    /// A tag's type has no stored form; its values were not persisted
    UnsupportedValueType,
    /// Rebuilt tags do not match the stored checksum
    ChecksumMismatch,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::TagGroupInserted => "TAGGROUP_INSERTED",
            Event::TagGroupUpdated => "TAGGROUP_UPDATED",
            Event::TagGroupUnchanged => "TAGGROUP_UNCHANGED",
            Event::TagGroupSaveFailed => "TAGGROUP_SAVE_FAILED",
            Event::TagGroupLoaded => "TAGGROUP_LOADED",
            Event::TagGroupNotFound => "TAGGROUP_NOT_FOUND",
            Event::TagGroupLoadFailed => "TAGGROUP_LOAD_FAILED",
            Event::TagSkipped => "TAG_SKIPPED",
            Event::UnsupportedValueType => "UNSUPPORTED_VALUE_TYPE",
            Event::ChecksumMismatch => "CHECKSUM_MISMATCH",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::TagGroupSaveFailed | Event::TagGroupLoadFailed => Severity::Error,
            Event::TagSkipped | Event::UnsupportedValueType | Event::ChecksumMismatch => {
                Severity::Warn
            }
            Event::TagGroupUnchanged | Event::TagGroupNotFound => Severity::Trace,
            Event::ConfigLoaded
            | Event::TagGroupInserted
            | Event::TagGroupUpdated
            | Event::TagGroupLoaded => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
