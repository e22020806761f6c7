//! Strong domain types for generated interfaces.
//!
//! Package identifiers are dotted paths (`com.example.external`). They map to
//! directories under the export source root and to `crate::` module paths in
//! generated `use` statements.
//!
//! # Examples
//!
//! ```
//! use client_export_core::PackageName;
//! use std::path::PathBuf;
//!
//! let package = PackageName::new("com.example.external");
//! assert_eq!(package.base().as_str(), "com.example.external.base");
//! assert_eq!(package.to_relative_path(), PathBuf::from("com/example/external"));
//! assert_eq!(package.module_path(), "crate::com::example::external");
//! ```

use std::fmt;
use std::path::PathBuf;

/// Sub-segment appended to the export package for base interfaces.
pub const BASE_PACKAGE_SEGMENT: &str = "base";

/// Dotted package identifier (newtype over String).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageName(String);

impl PackageName {
    /// Creates a package name.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the package name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the package holding base interfaces.
    #[must_use]
    pub fn base(&self) -> Self {
        if self.0.is_empty() {
            Self(BASE_PACKAGE_SEGMENT.to_string())
        } else {
            Self(format!("{}.{BASE_PACKAGE_SEGMENT}", self.0))
        }
    }

    fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|s| !s.is_empty())
    }

    /// Directory path relative to the export source root.
    #[must_use]
    pub fn to_relative_path(&self) -> PathBuf {
        self.segments().collect()
    }

    /// Absolute module path used in generated `use` statements.
    #[must_use]
    pub fn module_path(&self) -> String {
        std::iter::once("crate")
            .chain(self.segments())
            .collect::<Vec<_>>()
            .join("::")
    }
}

/// Resolves a `crate::`, `self::`, or `super::` prefixed path against the
/// declaring `module`.
///
/// Each leading `super::` drops one segment of `module`. Paths without one
/// of these prefixes are returned trimmed and otherwise unchanged. Returns
/// `None` when `super::` climbs above the crate root.
///
/// # Examples
///
/// ```
/// use client_export_core::resolve_module_path;
///
/// assert_eq!(resolve_module_path("a::sub", "super::Orders").as_deref(), Some("a::Orders"));
/// assert_eq!(resolve_module_path("a", "self::Orders").as_deref(), Some("a::Orders"));
/// assert_eq!(resolve_module_path("a", "crate::b::Orders").as_deref(), Some("b::Orders"));
/// assert_eq!(resolve_module_path("a", "Orders").as_deref(), Some("Orders"));
/// assert_eq!(resolve_module_path("", "super::Orders"), None);
/// ```
#[must_use]
pub fn resolve_module_path(module: &str, path: &str) -> Option<String> {
    let path = path.trim();
    if let Some(rest) = path.strip_prefix("crate::") {
        return Some(rest.to_string());
    }

    let mut segments: Vec<&str> = module.split("::").filter(|s| !s.is_empty()).collect();
    let mut rest = path;
    let mut anchored = false;

    if let Some(tail) = rest.strip_prefix("self::") {
        rest = tail;
        anchored = true;
    }
    while let Some(tail) = rest.strip_prefix("super::") {
        segments.pop()?;
        rest = tail;
        anchored = true;
    }

    if !anchored {
        return Some(rest.to_string());
    }
    segments.push(rest);
    Some(segments.join("::"))
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PackageName {
    fn from(s: String) -> Self {
        Self(s)
    }
}
