//! Mapping catalog wiring.
//!
//! A catalog is a JSON file listing descriptor formats declaratively (flavour,
//! priority, descriptor names, selection hints). `CatalogIndex` loads and
//! validates one, then turns its entries into `MappingSupport` registrations
//! in file order.

pub mod index;
pub mod model;

pub use index::{CatalogIndex, default_catalog_path};
pub use model::{CATALOG_SCHEMA_VERSION, MappingCatalog, MappingEntry, load_catalog_from_path};
