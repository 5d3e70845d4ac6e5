//! Descriptor-format routing for polyglot build tools.
//!
//! A build tool that accepts several syntaxes for its project descriptor
//! registers one `Mapping` per format, then asks the `Registry` which mapping
//! governs a request (by options context) or a project directory (by which
//! descriptor file is present). The registry only ranks and dispatches;
//! parsing and serialization stay behind the `ModelReader`/`ModelWriter`
//! capabilities each mapping hands out.
//!
//! Mappings can be written by hand or declared in a JSON catalog (see
//! `catalog`), which is how the `detect-flavour` helper bootstraps.

pub mod catalog;
pub mod codec;
pub mod error;
pub mod logging;
pub mod mapping;
pub mod registry;
mod schema_loader;

pub use catalog::{CatalogIndex, MappingCatalog, MappingEntry, default_catalog_path};
pub use codec::JsonCodec;
pub use error::ResolveError;
pub use mapping::{
    Direction, Flavour, LOCATION_KEY, Mapping, MappingSupport, ModelReader, ModelWriter, Options,
    Priority, Properties,
};
pub use registry::{Registry, RegistryBuilder};
