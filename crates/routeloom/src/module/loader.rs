//! Discovery pass: roots in, normalized modules out.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Module, ModuleRegistry};
use crate::builtin;
use crate::discovery::{self, FileSource, FsSource, DEFAULT_EXTENSION};
use crate::error::LoadError;
use crate::path::derive_route;

/// A discovered file after loading and normalization.
#[derive(Debug, Clone)]
pub struct LoadedModule {
    /// Canonical absolute path of the source file.
    pub absolute_path: PathBuf,
    /// Route path derived from the file path and the search roots.
    pub route: String,
    /// The normalized module.
    pub instance: Module,
}

/// Loads modules from search roots through a [`ModuleRegistry`].
pub struct Loader {
    registry: ModuleRegistry,
    source: Box<dyn FileSource>,
    extension: String,
    builtin_root: PathBuf,
}

impl Loader {
    /// A loader over the local file system, with the framework's own tree as
    /// the builtin root.
    pub fn new(registry: ModuleRegistry) -> Self {
        Self {
            registry,
            source: Box::new(FsSource),
            extension: DEFAULT_EXTENSION.to_owned(),
            builtin_root: builtin::root(),
        }
    }

    /// Enumerate files through `source` instead of the file system walker.
    pub fn with_source(mut self, source: impl FileSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Directory holding the framework's `config/` and `routes/` trees.
    pub fn with_builtin_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.builtin_root = root.into();
        self
    }

    pub fn builtin_root(&self) -> &Path {
        &self.builtin_root
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Discover, load and normalize every module under `roots`.
    ///
    /// # Errors
    ///
    /// Fails on the first file that cannot be enumerated, has no registered
    /// module, or whose constructor fails. Nothing is returned partially.
    pub fn discover(&self, roots: &[PathBuf]) -> Result<Vec<LoadedModule>, LoadError> {
        let files = discovery::enumerate(self.source.as_ref(), roots, &self.extension)?;

        files
            .into_iter()
            .map(|file| {
                let export = self
                    .registry
                    .resolve(&file.path)
                    .ok_or_else(|| LoadError::Unregistered(file.path.clone()))?;

                let instance = export.normalize().map_err(|source| LoadError::Construct {
                    path: file.path.clone(),
                    source,
                })?;

                let route = derive_route(&file.found_at, roots);
                debug!(
                    file = %file.path.display(),
                    route = %route,
                    roots = file.roots.len(),
                    "module loaded"
                );

                Ok(LoadedModule {
                    absolute_path: file.path,
                    route,
                    instance,
                })
            })
            .collect()
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("registry", &self.registry)
            .field("extension", &self.extension)
            .field("builtin_root", &self.builtin_root)
            .finish_non_exhaustive()
    }
}
