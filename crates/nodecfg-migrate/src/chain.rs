//! Migration chain execution
//!
//! [`MigrationChain`] drives a document from its declared version to the
//! target by repeatedly applying the registered step for its current
//! version.
//!
//! # Termination
//!
//! The registry only accepts steps whose target exceeds their source, and
//! the chain rejects any step output that does not advance the version, so
//! the loop runs at most `registry.len()` times.

use nodecfg_document::{Document, Lookup};
use nodecfg_schema::CURRENT_VERSION;
use tracing::info;

use crate::error::MigrationError;
use crate::registry::MigrationRegistry;
use crate::version::{canonical_key, parse_version, VersionResolver};

/// One applied transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    /// Key the step was looked up under
    pub from: String,
    /// Version the step stamped
    pub to: String,
}

/// Result of running the chain on one document
#[derive(Debug, Clone)]
pub struct ChainRun {
    /// Document at the target version
    pub document: Document,
    /// Transitions applied, in order; empty when already current
    pub applied: Vec<StepRecord>,
}

/// Executes registered steps until a document reaches the target version
#[derive(Debug, Clone)]
pub struct MigrationChain {
    registry: MigrationRegistry,
    resolver: VersionResolver,
    target: String,
}

impl MigrationChain {
    /// Chain targeting [`CURRENT_VERSION`] with the legacy baseline resolver
    #[must_use]
    pub fn new(registry: MigrationRegistry) -> Self {
        Self {
            registry,
            resolver: VersionResolver::legacy(),
            target: CURRENT_VERSION.to_string(),
        }
    }

    /// Use a different target version
    ///
    /// # Errors
    /// Returns [`MigrationError::InvalidVersion`] if the target cannot be parsed
    pub fn with_target(mut self, target: &str) -> Result<Self, MigrationError> {
        self.target = canonical_key(target)?;
        Ok(self)
    }

    /// Target version key
    #[inline]
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Resolver mapping declared versions onto registry keys
    #[inline]
    #[must_use]
    pub fn resolver(&self) -> &VersionResolver {
        &self.resolver
    }

    /// Registry steps are looked up in
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &MigrationRegistry {
        &self.registry
    }

    /// Migrate a document to the target version
    ///
    /// A document already at the target is returned untouched.
    ///
    /// # Errors
    /// Returns error if the version is missing, unparsable or unregistered,
    /// if a step fails, or if a step does not advance the version
    pub fn run(&self, mut document: Document) -> Result<ChainRun, MigrationError> {
        let mut key = self.resolver.resolve(declared_version(&document)?)?;
        let mut applied = Vec::new();

        while key != self.target {
            let step = self.registry.get(&key)?;
            info!("Running config migration: {} -> {}", key, step.target_version());

            document = step.apply(document)?;
            let next = self.resolver.resolve(declared_version(&document)?)?;
            if !advances(&key, &next)? {
                return Err(MigrationError::StalledStep { from: key, to: next });
            }

            applied.push(StepRecord {
                from: std::mem::replace(&mut key, next.clone()),
                to: next,
            });
        }

        Ok(ChainRun { document, applied })
    }
}

/// Declared `Version` of a document
///
/// # Errors
/// Returns [`MigrationError::MissingVersion`] if absent or not a string
pub fn declared_version(document: &Document) -> Result<&str, MigrationError> {
    match document.version() {
        Lookup::Present(version) => Ok(version),
        Lookup::Absent => Err(MigrationError::MissingVersion { found: None }),
        Lookup::Mismatched { found } => Err(MigrationError::MissingVersion { found: Some(found) }),
    }
}

fn advances(from: &str, to: &str) -> Result<bool, MigrationError> {
    let parse = |raw: &str| {
        parse_version(raw).map_err(|source| MigrationError::InvalidVersion {
            version: raw.to_string(),
            source,
        })
    };
    Ok(parse(to)? > parse(from)?)
}
