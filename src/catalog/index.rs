//! Validated view of a mapping catalog.
//!
//! The index enforces the catalog schema and the invariants JSON Schema cannot
//! express (unique flavours, finite priorities, bare file names), and keeps
//! entries in file order because registration order decides discovery ties.

use crate::catalog::model::{CATALOG_SCHEMA_VERSION, MappingCatalog, MappingEntry};
use crate::mapping::{Flavour, ModelReader, ModelWriter};
use crate::registry::RegistryBuilder;
use crate::schema_loader::{SchemaLoadOptions, load_json_schema, validate_instance};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

const CATALOG_ENV: &str = "POLYGLOT_MAPPING_CATALOG";
const SCHEMA_FILE: &str = "mapping_catalog.schema.json";

#[derive(Debug)]
/// Mapping catalog plus a derived index keyed by flavour.
pub struct CatalogIndex {
    catalog: MappingCatalog,
    by_flavour: BTreeMap<Flavour, usize>,
}

impl CatalogIndex {
    /// Load and validate the catalog from disk.
    pub fn load(path: &Path) -> Result<Self> {
        validate_against_schema(path)?;

        let catalog = crate::catalog::load_catalog_from_path(path)
            .with_context(|| format!("loading {}", path.display()))?;
        Self::from_catalog(catalog).with_context(|| format!("validating {}", path.display()))
    }

    /// Validate an in-memory catalog.
    pub fn from_catalog(catalog: MappingCatalog) -> Result<Self> {
        validate_schema_version(&catalog.schema_version)?;
        let by_flavour = build_index(&catalog)?;
        Ok(Self {
            catalog,
            by_flavour,
        })
    }

    pub fn entry(&self, flavour: &Flavour) -> Option<&MappingEntry> {
        self.by_flavour
            .get(flavour)
            .map(|idx| &self.catalog.mappings[*idx])
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[MappingEntry] {
        &self.catalog.mappings
    }

    /// Iterates flavours in stable (sorted) order.
    pub fn flavours(&self) -> impl Iterator<Item = &Flavour> {
        self.by_flavour.keys()
    }

    /// Register every entry, in file order, with codecs chosen per entry.
    pub fn to_builder<F>(&self, mut codecs: F) -> Result<RegistryBuilder>
    where
        F: FnMut(&MappingEntry) -> Result<(Arc<dyn ModelReader>, Arc<dyn ModelWriter>)>,
    {
        let mut builder = RegistryBuilder::new();
        for entry in &self.catalog.mappings {
            let (reader, writer) =
                codecs(entry).with_context(|| format!("no codec for flavour {}", entry.flavour))?;
            builder.register(entry.to_support(reader, writer));
        }
        Ok(builder)
    }
}

/// Locate the catalog to load.
///
/// Honors `POLYGLOT_MAPPING_CATALOG` when it names an existing file, then falls
/// back to the catalog bundled with the crate (recorded at build time).
pub fn default_catalog_path() -> Result<PathBuf> {
    if let Ok(raw) = env::var(CATALOG_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            let path = PathBuf::from(trimmed);
            if !path.is_file() {
                bail!("{CATALOG_ENV} points at {}, which is not a file", path.display());
            }
            return Ok(path);
        }
    }

    if let Some(hint) = option_env!("POLYGLOT_CATALOG_HINT") {
        let path = PathBuf::from(hint);
        if path.is_file() {
            return Ok(path);
        }
    }

    bail!("Unable to locate a mapping catalog. Set {CATALOG_ENV} to a catalog JSON file.")
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version != CATALOG_SCHEMA_VERSION {
        bail!(
            "schema_version '{}' not supported (expected {})",
            schema_version,
            CATALOG_SCHEMA_VERSION
        );
    }
    Ok(())
}

fn build_index(catalog: &MappingCatalog) -> Result<BTreeMap<Flavour, usize>> {
    let mut map = BTreeMap::new();
    for (idx, entry) in catalog.mappings.iter().enumerate() {
        let flavour = &entry.flavour;
        if flavour.as_str().trim().is_empty() {
            bail!("encountered mapping with no flavour");
        }
        if map.contains_key(flavour) {
            bail!("duplicate flavour {}", flavour);
        }
        if !entry.priority.is_finite() {
            bail!("mapping {} has non-finite priority", flavour);
        }
        if entry.descriptor_names.is_empty() {
            bail!("mapping {} declares no descriptor names", flavour);
        }
        let mut seen = BTreeSet::new();
        for name in &entry.descriptor_names {
            if name.trim().is_empty() {
                bail!("mapping {} has an empty descriptor name", flavour);
            }
            if name.contains('/') || name.contains('\\') {
                bail!(
                    "mapping {} descriptor name '{}' must be a bare file name",
                    flavour,
                    name
                );
            }
            if !seen.insert(name.as_str()) {
                bail!("mapping {} repeats descriptor name '{}'", flavour, name);
            }
        }
        if entry.extensions.iter().any(|ext| ext.trim().is_empty()) {
            bail!("mapping {} has an empty extension", flavour);
        }
        map.insert(flavour.clone(), idx);
    }
    Ok(map)
}

fn validate_against_schema(catalog_path: &Path) -> Result<()> {
    let catalog_file = File::open(catalog_path)
        .with_context(|| format!("opening catalog {}", catalog_path.display()))?;
    let catalog_value: Value = serde_json::from_reader(BufReader::new(catalog_file))
        .with_context(|| format!("parsing catalog {}", catalog_path.display()))?;

    let schema_path = resolve_catalog_schema_path(catalog_path);
    let allowed = BTreeSet::from([CATALOG_SCHEMA_VERSION.to_string()]);
    let schema = load_json_schema(
        &schema_path,
        SchemaLoadOptions {
            allowed_versions: Some(&allowed),
            ..Default::default()
        },
    )
    .with_context(|| format!("loading catalog schema {}", schema_path.display()))?;
    debug!(
        catalog = %catalog_path.display(),
        schema = %schema_path.display(),
        schema_version = %schema.schema_version,
        "validating mapping catalog"
    );

    validate_instance(
        &schema.compiled,
        &catalog_value,
        &format!("mapping catalog {}", catalog_path.display()),
    )
}

/// Prefer a schema shipped next to the catalog, else the bundled one.
fn resolve_catalog_schema_path(catalog_path: &Path) -> PathBuf {
    if let Some(base) = catalog_path.parent() {
        let candidate = base.join(SCHEMA_FILE);
        if candidate.is_file() {
            return candidate;
        }
    }

    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("schema")
        .join(SCHEMA_FILE)
}
