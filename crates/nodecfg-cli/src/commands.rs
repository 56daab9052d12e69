//! Subcommand implementations
//!
//! Each command returns the text to print so it can be tested without a
//! process boundary.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use nodecfg_document::{Document, KeyPath, Value};
use nodecfg_migrate::{ConfigMigrator, Migrated};
use nodecfg_schema::{BuiltinDefaults, NetworkType, NodeConfig};
use serde::Serialize;
use tracing::info;

/// Summary printed by `check`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Path as given on the command line
    pub file: String,
    /// Version the file declares, verbatim
    pub declared_version: String,
    /// Version the file is upgraded to
    pub target_version: String,
    /// Oldest version with a registered upgrade; older files start there
    pub baseline_version: String,
    /// Versions the registry has an upgrade step for, ascending
    pub upgradable_versions: Vec<String>,
    /// True when no step had to run
    pub up_to_date: bool,
    /// Transitions as `from -> to`
    pub steps: Vec<String>,
}

impl CheckReport {
    fn render_text(&self) -> String {
        let mut out = format!(
            "{}: version {} (target {})\n",
            self.file, self.declared_version, self.target_version
        );
        out.push_str(&format!(
            "upgrades from: {} (baseline {})\n",
            self.upgradable_versions.join(", "),
            self.baseline_version
        ));
        if self.up_to_date {
            out.push_str("up to date\n");
        } else {
            for step in &self.steps {
                out.push_str(&format!("  upgrade {step}\n"));
            }
        }
        out
    }
}

fn migrator() -> Result<ConfigMigrator> {
    ConfigMigrator::with_defaults(Arc::new(BuiltinDefaults)).context("building migration registry")
}

fn load(file: &Path) -> Result<Migrated> {
    let bytes = fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    migrator()?
        .migrate_bytes(&bytes)
        .with_context(|| format!("loading {}", file.display()))
}

/// Upgrade `file`; write to `output` if given, otherwise return the text
///
/// # Errors
/// Returns error if the file cannot be read, migrated or written
pub fn migrate(file: &Path, output: Option<&Path>) -> Result<String> {
    let migrated = load(file)?;
    let text = migrated
        .document
        .to_toml_string()
        .context("serializing upgraded config")?;

    match output {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("writing {}", path.display()))?;
            info!(
                "Wrote {} (version {} -> {})",
                path.display(),
                migrated.migrated_from,
                migrated.config.version
            );
            Ok(String::new())
        }
        None => Ok(text),
    }
}

/// Describe what loading `file` would do
///
/// # Errors
/// Returns error if the file cannot be read or migrated
pub fn check(file: &Path, json: bool) -> Result<String> {
    let migrator = migrator()?;
    let bytes = fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    let migrated = migrator
        .migrate_bytes(&bytes)
        .with_context(|| format!("loading {}", file.display()))?;

    let report = CheckReport {
        file: file.display().to_string(),
        declared_version: migrated.migrated_from.clone(),
        target_version: migrator.chain().target().to_string(),
        baseline_version: migrator.chain().resolver().baseline().to_string(),
        upgradable_versions: migrator
            .chain()
            .registry()
            .keys()
            .into_iter()
            .map(str::to_owned)
            .collect(),
        up_to_date: !migrated.was_migrated(),
        steps: migrated
            .steps
            .iter()
            .map(|step| format!("{} -> {}", step.from, step.to))
            .collect(),
    };

    if json {
        serde_json::to_string_pretty(&report).context("serializing report")
    } else {
        Ok(report.render_text())
    }
}

/// Value at a dotted path in the upgraded `file`
///
/// Strings print bare; everything else prints as TOML.
///
/// # Errors
/// Returns error if the path is malformed or absent, or loading fails
pub fn get(file: &Path, path: &str) -> Result<String> {
    let key: KeyPath = path.parse().with_context(|| format!("invalid key path '{path}'"))?;
    let migrated = load(file)?;

    let value = migrated
        .document
        .get_path(&key)
        .with_context(|| format!("{key} is not set in {}", file.display()))?;
    render_value(value)
}

fn render_value(value: &Value) -> Result<String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Table(table) => Document::from_table(table.clone())
            .to_toml_string()
            .context("serializing table"),
        other => Ok(other.to_string()),
    }
}

/// Fresh current-version config for a network
///
/// # Errors
/// Returns error if the config cannot be serialized
pub fn dump_default(network: &str) -> Result<String> {
    let config = NodeConfig::default_for(&NetworkType::parse(network));
    Document::from_typed(&config)
        .and_then(|doc| doc.to_toml_string())
        .context("serializing default config")
}
