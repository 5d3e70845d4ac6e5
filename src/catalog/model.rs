//! Deserializable representation of a mapping catalog.
//!
//! The types mirror `schema/mapping_catalog.schema.json`. Use `CatalogIndex`
//! for validation; these structs carry no invariants of their own.

use crate::mapping::support::DEFAULT_PRIORITY;
use crate::mapping::{Flavour, MappingSupport, ModelReader, ModelWriter, Priority, Properties};
use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;

pub const CATALOG_SCHEMA_VERSION: &str = "mapping_catalog_v1";

#[derive(Clone, Debug, Deserialize)]
/// Full mapping catalog as stored on disk.
pub struct MappingCatalog {
    pub schema_version: String,
    #[serde(default)]
    pub description: Option<String>,
    pub mappings: Vec<MappingEntry>,
}

#[derive(Clone, Debug, Deserialize)]
/// One declared descriptor format.
pub struct MappingEntry {
    pub flavour: Flavour,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    pub descriptor_names: Vec<String>,
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub option_keys: Vec<String>,
    #[serde(default)]
    pub properties: Option<Properties>,
}

fn default_priority() -> Priority {
    DEFAULT_PRIORITY
}

impl MappingEntry {
    /// Build the mapping this entry declares around the given codecs.
    pub fn to_support(
        &self,
        reader: Arc<dyn ModelReader>,
        writer: Arc<dyn ModelWriter>,
    ) -> MappingSupport {
        let support = MappingSupport::new(self.flavour.clone(), reader, writer)
            .with_priority(self.priority)
            .with_descriptor_names(self.descriptor_names.iter().cloned())
            .with_extensions(self.extensions.iter().cloned())
            .with_option_keys(self.option_keys.iter().cloned());
        match &self.properties {
            Some(properties) => support.with_properties(properties.clone()),
            None => support,
        }
    }
}

/// Read and parse a mapping catalog from disk without additional validation.
pub fn load_catalog_from_path(path: &Path) -> Result<MappingCatalog> {
    let data = fs::read_to_string(path)?;
    let catalog: MappingCatalog = serde_json::from_str(&data)?;
    Ok(catalog)
}
