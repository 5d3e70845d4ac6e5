//! Mapping capability definition.
//!
//! A mapping describes one supported descriptor format: how strongly it is
//! preferred, whether it applies to a request, where its descriptor lives in a
//! project directory, and which reader/writer handle the format. The registry
//! ranks mappings; it never invokes readers or writers itself.

pub mod identity;
pub mod options;
pub mod support;

pub use identity::{Direction, Flavour, Priority};
pub use options::{LOCATION_KEY, Options, Properties};
pub use support::MappingSupport;

use anyhow::Result;
use serde_json::Value;
use std::fmt;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Parses a descriptor document into its model tree.
pub trait ModelReader: Send + Sync {
    fn read(&self, input: &mut dyn Read, options: &Options) -> Result<Value>;
}

/// Serializes a model tree back into a descriptor document.
pub trait ModelWriter: Send + Sync {
    fn write(&self, output: &mut dyn Write, options: &Options, model: &Value) -> Result<()>;
}

/// One registered descriptor format.
///
/// Implementations must not change `priority` or `flavour` once registered;
/// the registry relies on both being stable for the lifetime of the process.
pub trait Mapping: Send + Sync {
    fn priority(&self) -> Priority;

    fn flavour(&self) -> &Flavour;

    /// Whether this mapping applies to the given request context.
    fn accept(&self, options: &Options) -> bool;

    /// Look for this format's descriptor file directly inside `dir`.
    ///
    /// Must not create files. I/O failures are returned as-is.
    fn locate(&self, dir: &Path) -> io::Result<Option<PathBuf>>;

    fn reader(&self) -> Arc<dyn ModelReader>;

    fn writer(&self) -> Arc<dyn ModelWriter>;

    fn enhancement_properties(&self, _options: &Options) -> Option<Properties> {
        None
    }
}

impl fmt::Debug for dyn Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapping")
            .field("flavour", self.flavour())
            .field("priority", &self.priority())
            .finish()
    }
}
