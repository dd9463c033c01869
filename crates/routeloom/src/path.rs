//! Route path derivation from discovered file paths.
//!
//! ```text
//! <root>/index.rs            → /
//! <root>/users/index.rs      → /users
//! <root>/users/create.rs     → /users/create
//! <root>/users/indexed.rs    → /users/indexed
//! ```
//!
//! Output is always `/`-separated with a leading `/`, whatever the host path
//! separator and whether or not the root was spelled with a trailing slash.

use std::path::{Component, Path};

/// File stem that maps a file onto its parent directory's route.
pub const INDEX_STEM: &str = "index";

/// Derive the route path for `file` discovered under `roots`.
///
/// Every root that is a component-wise prefix of what remains is stripped,
/// in list order. Roots are expected not to overlap: a root that happens to
/// be a prefix of another root's remainder is stripped as well.
pub fn derive_route<P: AsRef<Path>>(file: &Path, roots: &[P]) -> String {
    let mut fragment = file;
    for root in roots {
        if let Ok(rest) = fragment.strip_prefix(root.as_ref()) {
            fragment = rest;
        }
    }

    let mut segments: Vec<String> = fragment
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_owned()),
            Component::RootDir | Component::CurDir | Component::Prefix(_) => None,
        })
        .collect();

    if let Some(last) = segments.last_mut() {
        if let Some(stem) = Path::new(last.as_str()).file_stem() {
            *last = stem.to_string_lossy().into_owned();
        }
    }

    normalize_route(&segments.join("/"))
}

/// Normalize an extension-free route fragment.
///
/// Drops empty and `.` segments and a trailing `index` segment, then joins
/// with `/` behind a leading `/`. Idempotent on its own output.
pub fn normalize_route(fragment: &str) -> String {
    let mut segments: Vec<&str> = fragment
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    if segments.last() == Some(&INDEX_STEM) {
        segments.pop();
    }

    format!("/{}", segments.join("/"))
}
