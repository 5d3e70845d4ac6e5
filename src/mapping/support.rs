//! Declarative mapping driven by descriptor names, extensions, and option keys.
//!
//! Most formats only need to say which file names they own and which request
//! hints select them; `MappingSupport` covers that without a bespoke impl.

use crate::mapping::{
    Flavour, Mapping, ModelReader, ModelWriter, Options, Priority, Properties,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DEFAULT_PRIORITY: Priority = 1.0;

#[derive(Clone)]
pub struct MappingSupport {
    flavour: Flavour,
    priority: Priority,
    descriptor_names: Vec<String>,
    extensions: Vec<String>,
    option_keys: Vec<String>,
    properties: Option<Properties>,
    reader: Arc<dyn ModelReader>,
    writer: Arc<dyn ModelWriter>,
}

impl MappingSupport {
    pub fn new(
        flavour: impl Into<Flavour>,
        reader: Arc<dyn ModelReader>,
        writer: Arc<dyn ModelWriter>,
    ) -> Self {
        Self {
            flavour: flavour.into(),
            priority: DEFAULT_PRIORITY,
            descriptor_names: Vec::new(),
            extensions: Vec::new(),
            option_keys: Vec::new(),
            properties: None,
            reader,
            writer,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// File names checked, in order, by `locate`.
    pub fn with_descriptor_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.descriptor_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Location suffixes (e.g. `.yaml`) that make `accept` succeed.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Option keys that select this mapping when set to a truthy value.
    pub fn with_option_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.option_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn descriptor_names(&self) -> &[String] {
        &self.descriptor_names
    }
}

impl Mapping for MappingSupport {
    fn priority(&self) -> Priority {
        self.priority
    }

    fn flavour(&self) -> &Flavour {
        &self.flavour
    }

    fn accept(&self, options: &Options) -> bool {
        if self.option_keys.iter().any(|key| options.is_truthy(key)) {
            return true;
        }
        match options.location() {
            Some(location) => self
                .extensions
                .iter()
                .any(|ext| location.ends_with(ext.as_str())),
            None => false,
        }
    }

    fn locate(&self, dir: &Path) -> io::Result<Option<PathBuf>> {
        for name in &self.descriptor_names {
            let candidate = dir.join(name);
            if candidate.try_exists()? {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }

    fn reader(&self) -> Arc<dyn ModelReader> {
        Arc::clone(&self.reader)
    }

    fn writer(&self) -> Arc<dyn ModelWriter> {
        Arc::clone(&self.writer)
    }

    fn enhancement_properties(&self, _options: &Options) -> Option<Properties> {
        self.properties.clone()
    }
}
