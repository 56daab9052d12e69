//! Bytes-to-config entry point

use std::sync::Arc;

use nodecfg_document::Document;
use nodecfg_schema::{BuiltinDefaults, DefaultsProvider, NodeConfig};
use tracing::info;

use crate::chain::{declared_version, MigrationChain, StepRecord};
use crate::error::MigrationError;
use crate::registry::MigrationRegistry;

/// Outcome of loading a configuration file
#[derive(Debug, Clone)]
pub struct Migrated {
    /// Typed configuration at the current version
    pub config: NodeConfig,
    /// Version the input declared, verbatim
    pub migrated_from: String,
    /// Migrated tree, including keys the typed schema does not model
    pub document: Document,
    /// Transitions applied
    pub steps: Vec<StepRecord>,
}

impl Migrated {
    /// Check if any step ran
    #[inline]
    #[must_use]
    pub fn was_migrated(&self) -> bool {
        !self.steps.is_empty()
    }
}

/// Loads configuration files of any supported version
#[derive(Debug, Clone)]
pub struct ConfigMigrator {
    chain: MigrationChain,
}

impl ConfigMigrator {
    /// Create from a prepared chain
    #[must_use]
    pub fn new(chain: MigrationChain) -> Self {
        Self { chain }
    }

    /// Migrator with the builtin steps backfilling from `defaults`
    ///
    /// # Errors
    /// Returns [`MigrationError::Registry`] if the builtin steps are inconsistent
    pub fn with_defaults(defaults: Arc<dyn DefaultsProvider>) -> Result<Self, MigrationError> {
        let registry = MigrationRegistry::with_defaults(defaults)?;
        Ok(Self::new(MigrationChain::new(registry)))
    }

    /// Migrator targeting another version than the current one
    ///
    /// # Errors
    /// Returns [`MigrationError::InvalidVersion`] if the target cannot be parsed
    pub fn with_target(self, target: &str) -> Result<Self, MigrationError> {
        Ok(Self::new(self.chain.with_target(target)?))
    }

    /// Chain this migrator runs
    #[inline]
    #[must_use]
    pub fn chain(&self) -> &MigrationChain {
        &self.chain
    }

    /// Parse, migrate and decode raw file content
    ///
    /// # Errors
    /// Returns [`MigrationError::Parse`] if the content is not a TOML table,
    /// and any error from [`migrate_document`](Self::migrate_document)
    pub fn migrate_bytes(&self, bytes: &[u8]) -> Result<Migrated, MigrationError> {
        let document = Document::from_slice(bytes).map_err(MigrationError::Parse)?;
        self.migrate_document(document)
    }

    /// Migrate and decode a parsed document
    ///
    /// # Errors
    /// Returns error if migration fails or the result does not decode into
    /// [`NodeConfig`]
    pub fn migrate_document(&self, document: Document) -> Result<Migrated, MigrationError> {
        let migrated_from = declared_version(&document)?.to_string();

        let run = self.chain.run(document)?;
        if !run.applied.is_empty() {
            info!(
                "Migrated config from {} to {} in {} step(s)",
                migrated_from,
                self.chain.target(),
                run.applied.len()
            );
        }

        let config = run.document.decode().map_err(MigrationError::Unmarshal)?;
        Ok(Migrated {
            config,
            migrated_from,
            document: run.document,
            steps: run.applied,
        })
    }
}

/// Load raw content with the builtin steps and defaults
///
/// Returns the current configuration and the version the input declared.
///
/// # Errors
/// Returns error if the content cannot be parsed, migrated or decoded
pub fn migrate_config(bytes: &[u8]) -> Result<(NodeConfig, String), MigrationError> {
    let migrated = ConfigMigrator::with_defaults(Arc::new(BuiltinDefaults))?.migrate_bytes(bytes)?;
    Ok((migrated.config, migrated.migrated_from))
}
