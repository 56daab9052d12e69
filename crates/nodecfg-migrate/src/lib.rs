//! nodecfg Migrate
//!
//! Upgrades node configuration files written against any earlier schema
//! version to the current one, then decodes them into
//! [`nodecfg_schema::NodeConfig`].
//!
//! # Core Concepts
//!
//! - [`MigrationStep`]: one version-to-version transformation
//! - [`MigrationRegistry`]: immutable source-version → step mapping
//! - [`VersionResolver`]: maps declared versions onto registry keys
//! - [`MigrationChain`]: applies steps until the target version is reached
//! - [`ConfigMigrator`]: bytes in, typed configuration out
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use nodecfg_migrate::ConfigMigrator;
//! use nodecfg_schema::{BuiltinDefaults, NetworkType, NodeConfig};
//!
//! let migrator = ConfigMigrator::with_defaults(Arc::new(BuiltinDefaults)).unwrap();
//! let current = toml::to_string(&NodeConfig::default_for(&NetworkType::Testnet)).unwrap();
//!
//! let migrated = migrator.migrate_bytes(current.as_bytes()).unwrap();
//! assert!(!migrated.was_migrated());
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod chain;
mod error;
mod migrator;
mod registry;
mod step;
mod steps;
mod version;

pub use chain::{declared_version, ChainRun, MigrationChain, StepRecord};
pub use error::{MigrationError, MigrationResult, RegistryError};
pub use migrator::{migrate_config, ConfigMigrator, Migrated};
pub use registry::{MigrationRegistry, MigrationRegistryBuilder};
pub use step::{FnStep, MigrationStep};
pub use steps::{V2UpgradeStep, V2_VERSION};
pub use version::{canonical_key, parse_version, VersionResolver, LEGACY_BASELINE_VERSION};

/// Version every migration ends at
pub use nodecfg_schema::CURRENT_VERSION as TARGET_VERSION;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
