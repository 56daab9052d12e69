//! Version parsing and migration key resolution

use semver::Version;
use tracing::debug;

use crate::error::MigrationError;

/// Earliest version a migration step is registered for
///
/// Files declaring anything older are migrated as if stamped with it.
pub const LEGACY_BASELINE_VERSION: &str = "1.0.4";

/// Parse a declared version leniently
///
/// Accepts an optional leading `v` and pads missing minor/patch components
/// with zero, so `"1.0"` and `"v1.0.0"` both parse as `1.0.0`.
///
/// # Errors
/// Returns error if the string is not a dotted numeric version
pub fn parse_version(raw: &str) -> Result<Version, semver::Error> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);

    let split = trimmed.find(|c: char| c == '-' || c == '+').unwrap_or(trimmed.len());
    let (core, suffix) = trimmed.split_at(split);

    match core.split('.').count() {
        1 => Version::parse(&format!("{core}.0.0{suffix}")),
        2 => Version::parse(&format!("{core}.0{suffix}")),
        _ => Version::parse(trimmed),
    }
}

/// Canonical migration key for a declared version
///
/// # Errors
/// Returns [`MigrationError::InvalidVersion`] if the version cannot be parsed
pub fn canonical_key(raw: &str) -> Result<String, MigrationError> {
    parse_version(raw)
        .map(|version| version.to_string())
        .map_err(|source| MigrationError::InvalidVersion {
            version: raw.to_string(),
            source,
        })
}

/// Maps a declared version to the key its migration is registered under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionResolver {
    baseline: Version,
}

impl VersionResolver {
    /// Resolver clamping to [`LEGACY_BASELINE_VERSION`]
    #[inline]
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            baseline: Version::new(1, 0, 4),
        }
    }

    /// Baseline key
    #[inline]
    #[must_use]
    pub fn baseline(&self) -> &Version {
        &self.baseline
    }

    /// Resolve the lookup key for a declared version
    ///
    /// # Errors
    /// Returns [`MigrationError::InvalidVersion`] if the version cannot be parsed
    pub fn resolve(&self, declared: &str) -> Result<String, MigrationError> {
        let version = parse_version(declared).map_err(|source| MigrationError::InvalidVersion {
            version: declared.to_string(),
            source,
        })?;

        if version < self.baseline {
            debug!("Version {} predates baseline {}, clamping", version, self.baseline);
            return Ok(self.baseline.to_string());
        }
        Ok(version.to_string())
    }
}

impl Default for VersionResolver {
    fn default() -> Self {
        Self::legacy()
    }
}
