//! Version keys of stored snapshots

use std::fmt;
use std::str::FromStr;

/// Which snapshot of a tag group to write or read.
///
/// `Latest` is the snapshot rewritten on every save. In stored records it
/// lives under the key `"4294967295"` (`u32::MAX`), which no real version
/// ever reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VersionKey {
    Specific(u32),
    #[default]
    Latest,
}

impl VersionKey {
    /// Numeric value of the `Latest` key in stored records.
    pub const LATEST_NUMBER: u32 = u32::MAX;

    /// Key for version `n`; `u32::MAX` maps to `Latest`.
    pub fn specific(n: u32) -> Self {
        if n == Self::LATEST_NUMBER {
            VersionKey::Latest
        } else {
            VersionKey::Specific(n)
        }
    }

    pub fn number(&self) -> u32 {
        match self {
            VersionKey::Specific(n) => *n,
            VersionKey::Latest => Self::LATEST_NUMBER,
        }
    }

    /// Document key of this snapshot inside `versions`.
    pub fn as_key(&self) -> String {
        self.number().to_string()
    }

    /// Parses a document key back into a version key.
    pub fn from_key(key: &str) -> Option<Self> {
        key.parse::<u32>().ok().map(Self::specific)
    }

    pub fn is_latest(&self) -> bool {
        matches!(self, VersionKey::Latest)
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionKey::Specific(n) => write!(f, "{}", n),
            VersionKey::Latest => write!(f, "latest"),
        }
    }
}

impl FromStr for VersionKey {
    type Err = String;

    /// Accepts `latest` or a version number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("latest") {
            return Ok(VersionKey::Latest);
        }
        VersionKey::from_key(s).ok_or_else(|| format!("invalid version '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_key_matches_sentinel() {
        assert_eq!(VersionKey::Latest.as_key(), "4294967295");
        assert_eq!(VersionKey::from_key("4294967295"), Some(VersionKey::Latest));
    }

    #[test]
    fn test_specific_max_is_latest() {
        assert_eq!(VersionKey::specific(u32::MAX), VersionKey::Latest);
        assert_eq!(VersionKey::specific(7), VersionKey::Specific(7));
    }

    #[test]
    fn test_from_key() {
        assert_eq!(VersionKey::from_key("12"), Some(VersionKey::Specific(12)));
        assert_eq!(VersionKey::from_key("-1"), None);
        assert_eq!(VersionKey::from_key("abc"), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("latest".parse::<VersionKey>(), Ok(VersionKey::Latest));
        assert_eq!("LATEST".parse::<VersionKey>(), Ok(VersionKey::Latest));
        assert_eq!("3".parse::<VersionKey>(), Ok(VersionKey::Specific(3)));
        assert!("x".parse::<VersionKey>().is_err());
        assert_eq!(VersionKey::Latest.to_string(), "latest");
    }
}
