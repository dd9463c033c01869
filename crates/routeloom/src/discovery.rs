//! File enumeration under search roots.
//!
//! # Responsibilities
//! - Walk every root recursively for files with the source extension.
//! - Deduplicate by canonical path across roots, keeping first-seen order.
//!
//! A root that does not exist contributes nothing; any other walk failure is
//! fatal for the whole pass.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::LoadError;

/// Extension of discoverable module files.
pub const DEFAULT_EXTENSION: &str = "rs";

/// Enumerates candidate module files below a root.
pub trait FileSource: Send + Sync {
    /// All files below `root` whose extension is `extension`, recursively.
    fn files(&self, root: &Path, extension: &str) -> Result<Vec<PathBuf>, LoadError>;
}

/// [`FileSource`] backed by the local file system.
///
/// Entries are sorted by file name within each directory so the order is
/// stable across platforms.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl FileSource for FsSource {
    fn files(&self, root: &Path, extension: &str) -> Result<Vec<PathBuf>, LoadError> {
        if !root.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|source| LoadError::Enumerate {
                root: root.to_path_buf(),
                source,
            })?;
            let matches = entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == extension);
            if matches {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

/// A file found under one or more roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Canonical absolute path; the dedup key.
    pub path: PathBuf,
    /// Path as first yielded by the source, still prefixed by its root.
    pub found_at: PathBuf,
    /// Every root that yielded this file, in root order.
    pub roots: Vec<PathBuf>,
}

/// Enumerate `roots` in order and merge the results.
///
/// A file reachable from several roots appears once, at the position where
/// it was first seen.
pub fn enumerate(
    source: &dyn FileSource,
    roots: &[PathBuf],
    extension: &str,
) -> Result<Vec<DiscoveredFile>, LoadError> {
    let mut files: Vec<DiscoveredFile> = Vec::new();
    let mut seen: HashMap<PathBuf, usize> = HashMap::new();

    for root in roots {
        for found in source.files(root, extension)? {
            let canonical = std::fs::canonicalize(&found).map_err(|source| {
                LoadError::Canonicalize {
                    path: found.clone(),
                    source,
                }
            })?;

            match seen.get(&canonical) {
                Some(&i) => files[i].roots.push(root.clone()),
                None => {
                    seen.insert(canonical.clone(), files.len());
                    files.push(DiscoveredFile {
                        path: canonical,
                        found_at: found,
                        roots: vec![root.clone()],
                    });
                }
            }
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "// module").unwrap();
    }

    #[test]
    fn walks_recursively_and_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "ping.rs");
        touch(dir.path(), "users/index.rs");
        touch(dir.path(), "users/create.rs");
        touch(dir.path(), "README.md");
        touch(dir.path(), "users/schema.json");

        let files = FsSource.files(dir.path(), DEFAULT_EXTENSION).unwrap();
        let rel: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            rel,
            vec![
                PathBuf::from("ping.rs"),
                PathBuf::from("users/create.rs"),
                PathBuf::from("users/index.rs"),
            ]
        );
    }

    #[test]
    fn missing_root_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let files = FsSource.files(&dir.path().join("absent"), DEFAULT_EXTENSION).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn same_file_under_two_roots_is_listed_once() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "routes/ping.rs");
        let routes = dir.path().join("routes");
        let roots = vec![routes.clone(), routes.join(".")];

        let files = enumerate(&FsSource, &roots, DEFAULT_EXTENSION).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].roots, roots);
        assert!(files[0].path.is_absolute());
    }

    #[test]
    fn first_seen_order_is_kept_across_roots() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "framework/health.rs");
        touch(dir.path(), "app/ping.rs");
        let roots = vec![dir.path().join("framework"), dir.path().join("app")];

        let files = enumerate(&FsSource, &roots, DEFAULT_EXTENSION).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, ["health.rs", "ping.rs"]);
    }
}
