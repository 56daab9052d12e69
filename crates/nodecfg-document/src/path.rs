//! Key paths for addressing values inside a document
//!
//! Provides [`KeyPath`] for hierarchical addressing of tables and leaves.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Dotted path within a document tree
///
/// # Examples
/// - `["HTTP", "RosettaPort"]` → `HTTP.RosettaPort`
/// - `["Sync"]` → `Sync`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// Get number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if path has no segments
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterator over segments from root to leaf
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Display for KeyPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for KeyPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathError::Empty);
        }

        let segments: Vec<String> = s
            .split('.')
            .map(|seg| {
                if seg.is_empty() {
                    Err(PathError::EmptySegment)
                } else if seg.contains(|c: char| !c.is_ascii_alphanumeric() && c != '_' && c != '-') {
                    Err(PathError::InvalidSegment(seg.to_string()))
                } else {
                    Ok(seg.to_string())
                }
            })
            .collect::<Result<_, _>>()?;

        Ok(Self(segments))
    }
}

/// Errors related to key paths
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// No segments at all
    #[error("path is empty")]
    Empty,

    /// Empty segment in path
    #[error("path contains empty segment")]
    EmptySegment,

    /// Invalid segment characters
    #[error("invalid segment: {0} (must be a bare TOML key)")]
    InvalidSegment(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_parses_and_displays() {
        let path: KeyPath = "DNSSync.ServerPort".parse().unwrap();
        assert_eq!(path.len(), 2);
        assert!(!path.is_empty());
        assert_eq!(path.iter().last(), Some("ServerPort"));
        assert_eq!(path.to_string(), "DNSSync.ServerPort");
    }

    #[test]
    fn path_from_str_rejects_bad_input() {
        assert_eq!("".parse::<KeyPath>(), Err(PathError::Empty));
        assert_eq!("a..b".parse::<KeyPath>(), Err(PathError::EmptySegment));
        assert!(matches!(
            "P2P.IP address".parse::<KeyPath>(),
            Err(PathError::InvalidSegment(_))
        ));
    }

    #[test]
    fn path_allows_dashes_and_underscores() {
        let path: KeyPath = "log_folder.rotate-size".parse().unwrap();
        let collected: Vec<_> = path.iter().collect();
        assert_eq!(collected, vec!["log_folder", "rotate-size"]);
    }
}
