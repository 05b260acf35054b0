//! Persistence of user-defined property mappings.
//!
//! Mappings live under a fixed key of a key-value document, as a JSON array
//! of `{name, mappedTo, description?}`. Built-in defaults are never written.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    error::StoreError,
    mapping::{PropertyMapping, PropertyRegistry},
};

pub const STORAGE_KEY: &str = "customCssProperties";

pub trait MappingStore {
    /// User mappings only; an empty store yields an empty list.
    fn load(&self) -> Result<Vec<PropertyMapping>, StoreError>;
    fn save(&self, registry: &PropertyRegistry) -> Result<(), StoreError>;
}

/// A JSON object on disk standing in for a key-value store. Keys other than
/// [`STORAGE_KEY`] are preserved on save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}
impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    fn read_document(&self) -> Result<Map<String, Value>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&text).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }
}
impl MappingStore for JsonFileStore {
    fn load(&self) -> Result<Vec<PropertyMapping>, StoreError> {
        let mut document = self.read_document()?;
        let Some(entries) = document.remove(STORAGE_KEY) else {
            return Ok(Vec::new());
        };
        let mappings: Vec<PropertyMapping> =
            serde_json::from_value(entries).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), count = mappings.len(), "loaded property mappings");
        Ok(mappings)
    }
    fn save(&self, registry: &PropertyRegistry) -> Result<(), StoreError> {
        let mut document = self.read_document().unwrap_or_default();
        let persisted = registry.persistable();
        let count = persisted.len();
        let malformed = |source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        };
        document.insert(
            STORAGE_KEY.to_string(),
            serde_json::to_value(persisted).map_err(malformed)?,
        );
        let text = serde_json::to_string_pretty(&document).map_err(malformed)?;
        fs::write(&self.path, text).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count, "saved property mappings");
        Ok(())
    }
}
