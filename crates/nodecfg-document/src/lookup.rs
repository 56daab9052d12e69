//! Three-way typed reads
//!
//! Legacy documents are loosely typed: a key can be missing, present with the
//! expected type, or present with some other type. [`Lookup`] keeps those
//! cases apart so callers branch on each one explicitly.

use toml::Value;

/// Outcome of reading a typed value at a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<T> {
    /// Value present with the requested type
    Present(T),

    /// Nothing stored at the path
    Absent,

    /// Something stored at the path, but not of the requested type
    Mismatched {
        /// TOML type name of the stored value
        found: &'static str,
    },
}

impl<T> Lookup<T> {
    /// Classify an optional raw value with a typed extractor
    #[inline]
    pub fn from_value<'a>(
        value: Option<&'a Value>,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Self {
        match value {
            None => Self::Absent,
            Some(raw) => match extract(raw) {
                Some(typed) => Self::Present(typed),
                None => Self::Mismatched {
                    found: raw.type_str(),
                },
            },
        }
    }

    /// Typed value, discarding the absent/mismatched distinction
    #[inline]
    #[must_use]
    pub fn present(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent | Self::Mismatched { .. } => None,
        }
    }

    /// `true` when nothing is stored at the path
    #[inline]
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Map the present value
    #[inline]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Present(value) => Lookup::Present(f(value)),
            Self::Absent => Lookup::Absent,
            Self::Mismatched { found } => Lookup::Mismatched { found },
        }
    }
}
