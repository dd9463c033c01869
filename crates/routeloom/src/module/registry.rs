//! Source-path → export table used to load discovered files.
//!
//! A discovered file resolves to the entry whose source path is the longest
//! component-wise suffix of the file's canonical path. Entries recorded with
//! `file!()` are relative to the workspace the binary was built in, which is
//! always a suffix of the absolute path discovery produces.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::Export;

/// Factory producing a fresh export each time its file is loaded.
pub type ExportFactory = Arc<dyn Fn() -> Export + Send + Sync>;

/// Link-time registration submitted by [`crate::register_module!`].
pub struct ModuleEntry {
    source: &'static str,
    build: fn() -> Export,
}

impl ModuleEntry {
    pub const fn new(source: &'static str, build: fn() -> Export) -> Self {
        Self { source, build }
    }
}

inventory::collect!(ModuleEntry);

/// Table of loadable modules, keyed by source path.
#[derive(Clone, Default)]
pub struct ModuleRegistry {
    entries: Vec<(PathBuf, ExportFactory)>,
}

impl ModuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The framework's own config and route modules.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        crate::builtin::register(&mut registry);
        registry
    }

    /// Builtin modules plus every module registered with
    /// [`crate::register_module!`] in the running binary.
    pub fn collect() -> Self {
        let mut registry = Self::builtin();
        for entry in inventory::iter::<ModuleEntry> {
            registry.register(entry.source, entry.build);
        }
        debug!(modules = registry.len(), "module registry collected");
        registry
    }

    /// Register `factory` for `source`, replacing an earlier entry for the
    /// same source path.
    pub fn register<P, F>(&mut self, source: P, factory: F) -> &mut Self
    where
        P: Into<PathBuf>,
        F: Fn() -> Export + Send + Sync + 'static,
    {
        let source = source.into();
        let factory: ExportFactory = Arc::new(factory);
        match self.entries.iter_mut().find(|(s, _)| *s == source) {
            Some(entry) => entry.1 = factory,
            None => self.entries.push((source, factory)),
        }
        self
    }

    /// Build the export registered for `file`, if any entry matches it.
    pub fn resolve(&self, file: &Path) -> Option<Export> {
        self.entries
            .iter()
            .filter(|(source, _)| source.components().next().is_some() && file.ends_with(source))
            .max_by_key(|(source, _)| source.components().count())
            .map(|(_, factory)| factory())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(source, _)| source))
            .finish()
    }
}
