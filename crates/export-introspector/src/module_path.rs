//! File path to module path mapping.

use std::path::{Component, Path};

/// File stems that name their parent module rather than a child.
const PARENT_MODULE_STEMS: &[&str] = &["lib", "main", "mod"];

/// Derives the module path of `file` relative to the source `root`.
///
/// `lib.rs`, `main.rs`, and `mod.rs` map to their parent directory. Returns
/// an empty string for the crate root.
///
/// # Examples
///
/// ```
/// use client_export_introspector::module_path::module_path_for;
/// use std::path::Path;
///
/// let root = Path::new("/app/src");
/// assert_eq!(module_path_for(Path::new("/app/src/lib.rs"), root), "");
/// assert_eq!(module_path_for(Path::new("/app/src/api/orders.rs"), root), "api::orders");
/// assert_eq!(module_path_for(Path::new("/app/src/api/mod.rs"), root), "api");
/// ```
#[must_use]
pub fn module_path_for(file: &Path, root: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let mut segments: Vec<String> = relative
        .with_extension("")
        .components()
        .filter_map(|c| match c {
            Component::Normal(segment) => segment.to_str().map(ToString::to_string),
            _ => None,
        })
        .collect();

    if let Some(last) = segments.last()
        && PARENT_MODULE_STEMS.contains(&last.as_str())
    {
        segments.pop();
    }

    segments.join("::")
}

/// Joins a parent module path and a child segment.
#[must_use]
pub fn join(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}::{child}")
    }
}
