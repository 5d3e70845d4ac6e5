//! Registry of descriptor mappings and the resolution rules layered on top.
//!
//! Request-based lookups (reader, writer, flavour, properties) walk mappings in
//! descending priority and take the first that accepts. Directory discovery
//! walks mappings in registration order instead: the first mapping that
//! locates a file sets the baseline, and only a strictly higher priority later
//! on displaces it. Both directory lookups share `locate_with`, so the file and
//! the flavour they report always come from the same mapping.

use crate::error::ResolveError;
use crate::mapping::identity::descending;
use crate::mapping::{
    Direction, Flavour, Mapping, ModelReader, ModelWriter, Options, Priority, Properties,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

/// Collects mappings during bootstrap. Call `build` to freeze them.
#[derive(Default)]
pub struct RegistryBuilder {
    mappings: Vec<Arc<dyn Mapping>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mapping. Duplicates are kept; no ordering happens here.
    pub fn add_mapping(&mut self, mapping: Arc<dyn Mapping>) -> &mut Self {
        trace!(
            flavour = %mapping.flavour(),
            priority = mapping.priority(),
            "registering mapping"
        );
        self.mappings.push(mapping);
        self
    }

    /// Owned-value convenience over `add_mapping`.
    pub fn register<M: Mapping + 'static>(&mut self, mapping: M) -> &mut Self {
        self.add_mapping(Arc::new(mapping))
    }

    pub fn extend<I>(&mut self, mappings: I) -> &mut Self
    where
        I: IntoIterator<Item = Arc<dyn Mapping>>,
    {
        for mapping in mappings {
            self.add_mapping(mapping);
        }
        self
    }

    pub fn build(self) -> Registry {
        debug!(count = self.mappings.len(), "mapping registry frozen");
        Registry {
            mappings: self.mappings.into(),
        }
    }
}

/// Frozen, shareable set of mappings in registration order.
#[derive(Clone, Default)]
pub struct Registry {
    mappings: Arc<[Arc<dyn Mapping>]>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Mappings in registration order.
    pub fn mappings(&self) -> &[Arc<dyn Mapping>] {
        &self.mappings
    }

    /// Mappings by descending priority; equal priorities keep registration order.
    pub fn sorted_mappings(&self) -> Vec<Arc<dyn Mapping>> {
        let mut sorted = self.mappings.to_vec();
        // `sort_by` is stable.
        sorted.sort_by(|a, b| descending(a.priority(), b.priority()));
        sorted
    }

    pub fn resolve_reader(&self, options: &Options) -> Result<Arc<dyn ModelReader>, ResolveError> {
        self.first_accepting(options)
            .map(|mapping| mapping.reader())
            .ok_or_else(|| no_match(Direction::Input, options))
    }

    pub fn resolve_writer(&self, options: &Options) -> Result<Arc<dyn ModelWriter>, ResolveError> {
        self.first_accepting(options)
            .map(|mapping| mapping.writer())
            .ok_or_else(|| no_match(Direction::Output, options))
    }

    pub fn resolve_flavour(&self, options: &Options) -> Result<Flavour, ResolveError> {
        self.first_accepting(options)
            .map(|mapping| mapping.flavour().clone())
            .ok_or_else(|| no_match(Direction::Input, options))
    }

    /// Override properties of the first accepting mapping.
    ///
    /// Advisory: `None` covers both "nothing accepted" and "the accepting
    /// mapping has no properties".
    pub fn resolve_enhancement_properties(&self, options: &Options) -> Option<Properties> {
        self.first_accepting(options)?
            .enhancement_properties(options)
    }

    /// The descriptor file of the winning mapping for `dir`, if any.
    pub fn locate_descriptor_file(&self, dir: &Path) -> io::Result<Option<PathBuf>> {
        self.locate_with(dir, |_, file| file)
    }

    /// The flavour of the winning mapping for `dir`, if any.
    pub fn locate_flavour(&self, dir: &Path) -> io::Result<Option<Flavour>> {
        self.locate_with(dir, |mapping, _| mapping.flavour().clone())
    }

    /// Directory discovery shared by every locate-based lookup.
    ///
    /// Walks mappings in registration order. The first located file is adopted
    /// whatever its priority; afterwards a located file only replaces the
    /// incumbent when its mapping's priority is strictly greater, so ties go to
    /// the earliest registrant. `extract` sees only the winning mapping.
    pub fn locate_with<T, F>(&self, dir: &Path, extract: F) -> io::Result<Option<T>>
    where
        F: FnOnce(&dyn Mapping, PathBuf) -> T,
    {
        let mut best: Option<(&Arc<dyn Mapping>, PathBuf)> = None;
        let mut best_priority = Priority::MIN;

        for mapping in self.mappings.iter() {
            let Some(file) = mapping.locate(dir)? else {
                continue;
            };
            if best.is_none() || mapping.priority() > best_priority {
                trace!(
                    flavour = %mapping.flavour(),
                    priority = mapping.priority(),
                    file = %file.display(),
                    "descriptor candidate adopted"
                );
                best_priority = mapping.priority();
                best = Some((mapping, file));
            }
        }

        match best {
            Some((mapping, file)) => {
                debug!(
                    flavour = %mapping.flavour(),
                    file = %file.display(),
                    dir = %dir.display(),
                    "located descriptor"
                );
                Ok(Some(extract(mapping.as_ref(), file)))
            }
            None => {
                debug!(dir = %dir.display(), "no descriptor located");
                Ok(None)
            }
        }
    }

    fn first_accepting(&self, options: &Options) -> Option<Arc<dyn Mapping>> {
        for mapping in self.sorted_mappings() {
            if mapping.accept(options) {
                debug!(
                    flavour = %mapping.flavour(),
                    priority = mapping.priority(),
                    "mapping accepted request"
                );
                return Some(mapping);
            }
            trace!(
                flavour = %mapping.flavour(),
                priority = mapping.priority(),
                "mapping rejected request"
            );
        }
        debug!(%options, "no mapping accepted request");
        None
    }
}

fn no_match(direction: Direction, options: &Options) -> ResolveError {
    ResolveError::NoMatchingFormat {
        direction,
        options: options.clone(),
    }
}
