//! Error types for document parsing, encoding and decoding

/// Errors raised by [`crate::Document`]
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Raw content is not UTF-8
    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Raw content is not valid TOML
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value could not be represented in TOML
    #[error("cannot encode value: {0}")]
    Encode(#[from] toml::ser::Error),

    /// The tree does not match the requested typed structure
    #[error("cannot decode document: {0}")]
    Decode(#[source] toml::de::Error),

    /// A typed value serialized to something other than a table
    #[error("expected a table at the document root, got {0}")]
    NotATable(&'static str),
}
