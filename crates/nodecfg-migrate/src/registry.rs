//! Registry of migration steps
//!
//! Provides [`MigrationRegistry`], built once through
//! [`MigrationRegistryBuilder`] and read-only afterwards.

use std::collections::BTreeMap;
use std::sync::Arc;

use nodecfg_schema::DefaultsProvider;

use crate::error::{MigrationError, RegistryError};
use crate::step::MigrationStep;
use crate::steps::V2UpgradeStep;
use crate::version::parse_version;

/// Immutable mapping from source version key to step
///
/// Every step's target is strictly greater than its source, so following
/// the chain from any key terminates.
#[derive(Debug, Clone, Default)]
pub struct MigrationRegistry {
    steps: BTreeMap<String, Arc<dyn MigrationStep>>,
}

impl MigrationRegistry {
    /// Start building a registry
    #[inline]
    #[must_use]
    pub fn builder() -> MigrationRegistryBuilder {
        MigrationRegistryBuilder::default()
    }

    /// Registry with every step shipped with the node
    ///
    /// # Errors
    /// Returns error if the builtin steps are inconsistent
    pub fn with_defaults(defaults: Arc<dyn DefaultsProvider>) -> Result<Self, RegistryError> {
        Self::builder()
            .register(V2UpgradeStep::new(defaults))
            .build()
    }

    /// Step registered for a version key
    ///
    /// # Errors
    /// Returns [`MigrationError::UnrecognizedVersion`] if no step is registered
    pub fn get(&self, key: &str) -> Result<&dyn MigrationStep, MigrationError> {
        match self.steps.get(key) {
            Some(step) => Ok(&**step),
            None => Err(MigrationError::UnrecognizedVersion {
                version: key.to_string(),
            }),
        }
    }

    /// Check if a step is registered for a key
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.steps.contains_key(key)
    }

    /// Registered source keys in ascending version order
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.steps.keys().map(String::as_str).collect();
        keys.sort_by_cached_key(|key| parse_version(key).ok());
        keys
    }

    /// Get number of registered steps
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Collects steps before freezing them into a [`MigrationRegistry`]
#[derive(Debug, Default)]
pub struct MigrationRegistryBuilder {
    steps: Vec<Arc<dyn MigrationStep>>,
}

impl MigrationRegistryBuilder {
    /// Register a step
    #[must_use]
    pub fn register(mut self, step: impl MigrationStep + 'static) -> Self {
        self.steps.push(Arc::new(step));
        self
    }

    /// Validate and freeze the registered steps
    ///
    /// # Errors
    /// Returns error on duplicate source versions, unparsable versions, or a
    /// step whose target does not exceed its source
    pub fn build(self) -> Result<MigrationRegistry, RegistryError> {
        let mut steps = BTreeMap::new();

        for step in self.steps {
            let source = parse_declared(step.source_version())?;
            let target = parse_declared(step.target_version())?;
            if target <= source {
                return Err(RegistryError::NonIncreasingStep {
                    from: source.to_string(),
                    to: target.to_string(),
                });
            }

            let key = source.to_string();
            if steps.contains_key(&key) {
                return Err(RegistryError::DuplicateStep(key));
            }
            steps.insert(key, step);
        }

        Ok(MigrationRegistry { steps })
    }
}

fn parse_declared(raw: &str) -> Result<semver::Version, RegistryError> {
    parse_version(raw).map_err(|source| RegistryError::InvalidVersion {
        version: raw.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::FnStep;
    use nodecfg_document::Document;
    use nodecfg_schema::BuiltinDefaults;

    fn stamp_1_1(mut doc: Document) -> Result<Document, MigrationError> {
        doc.set_version("1.1.0");
        Ok(doc)
    }

    #[test]
    fn registry_with_defaults() {
        let registry = MigrationRegistry::with_defaults(Arc::new(BuiltinDefaults)).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("1.0.4"));
        assert_eq!(registry.get("1.0.4").unwrap().target_version(), "2.0.0");
    }

    #[test]
    fn registry_new_empty() {
        let registry = MigrationRegistry::builder().build().unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registry_get_unknown() {
        let registry = MigrationRegistry::default();
        let err = registry.get("9.9.9").unwrap_err();
        assert!(matches!(err, MigrationError::UnrecognizedVersion { ref version } if version == "9.9.9"));
    }

    #[test]
    fn registry_keys_are_canonical_and_ordered() {
        let registry = MigrationRegistry::builder()
            .register(FnStep::new("1.1", "1.10.0", stamp_1_1))
            .register(FnStep::new("1.0.4", "1.1.0", stamp_1_1))
            .build()
            .unwrap();
        assert_eq!(registry.keys(), vec!["1.0.4", "1.1.0"]);
    }

    #[test]
    fn registry_rejects_duplicates() {
        let result = MigrationRegistry::builder()
            .register(FnStep::new("1.0.4", "1.1.0", stamp_1_1))
            .register(FnStep::new("1.0.4", "1.2.0", stamp_1_1))
            .build();
        assert!(matches!(result, Err(RegistryError::DuplicateStep(ref key)) if key == "1.0.4"));
    }

    #[test]
    fn registry_rejects_non_increasing_step() {
        let result = MigrationRegistry::builder()
            .register(FnStep::new("2.0.0", "2.0.0", stamp_1_1))
            .build();
        assert!(matches!(result, Err(RegistryError::NonIncreasingStep { .. })));

        let backwards = MigrationRegistry::builder()
            .register(FnStep::new("2.0.0", "1.9.0", stamp_1_1))
            .build();
        assert!(matches!(backwards, Err(RegistryError::NonIncreasingStep { .. })));
    }

    #[test]
    fn registry_rejects_unparsable_versions() {
        let result = MigrationRegistry::builder()
            .register(FnStep::new("next", "2.0.0", stamp_1_1))
            .build();
        assert!(matches!(result, Err(RegistryError::InvalidVersion { .. })));
    }
}
