//! Error types for the migration engine
//!
//! Every failure is fatal for the load: nothing is retried and a partially
//! migrated document is never handed back.

use nodecfg_document::DocumentError;

/// Errors raised while upgrading a configuration document
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Raw content could not be parsed into a tree
    #[error("config file parse error: {0}")]
    Parse(#[source] DocumentError),

    /// No string `Version` entry at the top level
    #[error("config file invalid: no version entry found{}", .found.map(|t| format!(" (found {t})")).unwrap_or_default())]
    MissingVersion {
        /// Type of the non-string value stored under `Version`, if any
        found: Option<&'static str>,
    },

    /// Declared version is not a dotted numeric version
    #[error("invalid or missing config file version: '{version}'")]
    InvalidVersion {
        /// Version string as declared in the file
        version: String,
        /// Underlying parse failure
        #[source]
        source: semver::Error,
    },

    /// No step registered for the resolved key
    #[error("unrecognized config version: {version}")]
    UnrecognizedVersion {
        /// Resolved version key with no registered step
        version: String,
    },

    /// A field the step depends on has an unusable value
    #[error("field {path} must be a {expected}, found {}", .found.unwrap_or("nothing"))]
    InvalidField {
        /// Dotted path of the field
        path: &'static str,
        /// Type name the step requires
        expected: &'static str,
        /// Type actually stored, `None` if the field is missing
        found: Option<&'static str>,
    },

    /// A step returned a document whose version did not advance
    #[error("migration step for {from} stamped version {to}, which does not advance")]
    StalledStep {
        /// Version key the step was selected for
        from: String,
        /// Version the step stamped on its output
        to: String,
    },

    /// A backfill value could not be written into the tree
    #[error("cannot write migrated value: {0}")]
    Encode(#[source] DocumentError),

    /// The migrated tree does not match the current typed configuration
    #[error("migrated config does not match the current schema: {0}")]
    Unmarshal(#[source] DocumentError),

    /// The step registry could not be built
    #[error("migration registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Errors raised while building a [`crate::MigrationRegistry`]
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Two steps accept the same source version
    #[error("duplicate migration step for version {0}")]
    DuplicateStep(String),

    /// A step's target is not strictly greater than its source
    #[error("migration step {from} -> {to} does not advance the version")]
    NonIncreasingStep {
        /// Declared source version
        from: String,
        /// Declared target version
        to: String,
    },

    /// A step declares a version that cannot be parsed
    #[error("migration step declares invalid version '{version}'")]
    InvalidVersion {
        /// Version string the step declared
        version: String,
        /// Parser failure for the string
        #[source]
        source: semver::Error,
    },
}

/// Result type alias for migration operations
pub type MigrationResult<T> = Result<T, MigrationError>;
