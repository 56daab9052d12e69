//! Migration step abstraction

use std::fmt;

use nodecfg_document::Document;

use crate::error::MigrationError;

/// One version-to-version transformation
///
/// A step accepts documents declaring [`source_version`](Self::source_version)
/// and must return a document stamped with
/// [`target_version`](Self::target_version), which is strictly greater.
pub trait MigrationStep: Send + Sync + fmt::Debug {
    /// Version key this step accepts
    fn source_version(&self) -> &str;

    /// Version the returned document declares
    fn target_version(&self) -> &str;

    /// Transform a document
    ///
    /// # Errors
    /// Returns error if a field the step depends on is unusable
    fn apply(&self, document: Document) -> Result<Document, MigrationError>;
}

/// Step backed by a plain function
///
/// The function is responsible for stamping the target version.
#[derive(Debug, Clone)]
pub struct FnStep {
    source: String,
    target: String,
    apply: fn(Document) -> Result<Document, MigrationError>,
}

impl FnStep {
    /// Create a step from a transformation function
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        apply: fn(Document) -> Result<Document, MigrationError>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            apply,
        }
    }
}

impl MigrationStep for FnStep {
    fn source_version(&self) -> &str {
        &self.source
    }

    fn target_version(&self) -> &str {
        &self.target
    }

    fn apply(&self, document: Document) -> Result<Document, MigrationError> {
        (self.apply)(document)
    }
}
