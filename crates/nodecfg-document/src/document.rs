//! Configuration document tree
//!
//! An owned TOML table addressed by dotted key paths. Reads go through
//! [`Lookup`] so loosely-typed legacy values are never coerced silently.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{de::DeserializeOwned, Serialize};
use toml::{Table, Value};

use crate::error::DocumentError;
use crate::lookup::Lookup;
use crate::path::KeyPath;

/// Top-level key holding the schema version of a document
pub const VERSION_KEY: &str = "Version";

/// Configuration document
///
/// Owned value: migration steps consume one document and return the next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Table,
}

impl Document {
    /// Create from an already-parsed table
    #[inline]
    #[must_use]
    pub fn from_table(root: Table) -> Self {
        Self { root }
    }

    /// Parse raw file content
    ///
    /// # Errors
    /// Returns error if the bytes are not UTF-8 or not valid TOML
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DocumentError> {
        std::str::from_utf8(bytes)?.parse()
    }

    /// Create from a typed struct
    ///
    /// # Errors
    /// Returns error if the value does not serialize to a table
    pub fn from_typed<T: Serialize>(value: &T) -> Result<Self, DocumentError> {
        match Value::try_from(value)? {
            Value::Table(root) => Ok(Self { root }),
            other => Err(DocumentError::NotATable(other.type_str())),
        }
    }

    /// Raw value at a dotted path
    ///
    /// # Examples
    /// ```
    /// # use nodecfg_document::Document;
    /// let doc: Document = "[HTTP]\nPort = 9500".parse().unwrap();
    /// assert_eq!(doc.get("HTTP.Port").and_then(|v| v.as_integer()), Some(9500));
    /// assert!(doc.get("HTTP.RosettaPort").is_none());
    /// ```
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.get_segments(path.split('.'))
    }

    /// Raw value at a validated key path
    #[must_use]
    pub fn get_path(&self, path: &KeyPath) -> Option<&Value> {
        self.get_segments(path.iter())
    }

    /// Check whether anything is stored at a path, whatever its type
    #[inline]
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// String read
    #[inline]
    #[must_use]
    pub fn lookup_str(&self, path: &str) -> Lookup<&str> {
        Lookup::from_value(self.get(path), Value::as_str)
    }

    /// Boolean read
    #[inline]
    #[must_use]
    pub fn lookup_bool(&self, path: &str) -> Lookup<bool> {
        Lookup::from_value(self.get(path), Value::as_bool)
    }

    /// Integer read
    #[inline]
    #[must_use]
    pub fn lookup_int(&self, path: &str) -> Lookup<i64> {
        Lookup::from_value(self.get(path), Value::as_integer)
    }

    /// Nested table read
    #[inline]
    #[must_use]
    pub fn lookup_table(&self, path: &str) -> Lookup<&Table> {
        Lookup::from_value(self.get(path), Value::as_table)
    }

    /// Declared schema version
    #[inline]
    #[must_use]
    pub fn version(&self) -> Lookup<&str> {
        self.lookup_str(VERSION_KEY)
    }

    /// Stamp the schema version
    #[inline]
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.set(VERSION_KEY, version.into());
    }

    /// Set a value at a dotted path
    ///
    /// Intermediate tables are created as needed; a non-table value in the
    /// way is replaced by a table.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        let segments: Vec<&str> = path.split('.').collect();
        insert_at(&mut self.root, &segments, value.into());
    }

    /// Serialize a typed value and set it at a dotted path
    ///
    /// # Errors
    /// Returns error if the value cannot be represented in TOML
    pub fn set_serialized<T: Serialize>(&mut self, path: &str, value: &T) -> Result<(), DocumentError> {
        let value = Value::try_from(value)?;
        self.set(path, value);
        Ok(())
    }

    /// Remove and return the value at a dotted path
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let segments: Vec<&str> = path.split('.').collect();
        remove_at(&mut self.root, &segments)
    }

    /// Decode into a typed struct
    ///
    /// # Errors
    /// Returns error if the tree does not match the target type
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, DocumentError> {
        Value::Table(self.root.clone())
            .try_into()
            .map_err(DocumentError::Decode)
    }

    /// Root table
    #[inline]
    #[must_use]
    pub fn as_table(&self) -> &Table {
        &self.root
    }

    /// Consume into the root table
    #[inline]
    #[must_use]
    pub fn into_table(self) -> Table {
        self.root
    }

    /// Serialize back to TOML text
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_toml_string(&self) -> Result<String, DocumentError> {
        Ok(toml::to_string_pretty(&self.root)?)
    }

    fn get_segments<'s>(&self, mut segments: impl Iterator<Item = &'s str>) -> Option<&Value> {
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            current = current.as_table()?.get(segment)?;
        }
        Some(current)
    }
}

impl FromStr for Document {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let root: Table = toml::from_str(s)?;
        Ok(Self { root })
    }
}

impl From<Table> for Document {
    fn from(root: Table) -> Self {
        Self::from_table(root)
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = toml::to_string_pretty(&self.root).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

fn insert_at(table: &mut Table, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [leaf] => {
            table.insert((*leaf).to_string(), value);
        }
        [head, rest @ ..] => {
            let child = table
                .entry((*head).to_string())
                .or_insert_with(|| Value::Table(Table::new()));
            if let Value::Table(inner) = child {
                insert_at(inner, rest, value);
            } else {
                let mut inner = Table::new();
                insert_at(&mut inner, rest, value);
                *child = Value::Table(inner);
            }
        }
    }
}

fn remove_at(table: &mut Table, segments: &[&str]) -> Option<Value> {
    match segments {
        [] => None,
        [leaf] => table.remove(*leaf),
        [head, rest @ ..] => match table.get_mut(*head)? {
            Value::Table(inner) => remove_at(inner, rest),
            _ => None,
        },
    }
}
