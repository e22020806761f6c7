//! Name, package, and path derivation for generated interfaces.
//!
//! # Examples
//!
//! ```
//! use client_export_codegen::naming::derive_extract_name;
//!
//! assert_eq!(derive_extract_name("OrderController"), "OrderClient");
//! assert_eq!(derive_extract_name("Reports"), "ReportsClient");
//! ```

use client_export_core::{CandidateType, Error, GENERATED_FILE_EXTENSION, PackageName, Result};
use std::path::{Path, PathBuf};

const CONTROLLER_SUFFIX: &str = "Controller";
const CLIENT_SUFFIX: &str = "Client";
const BASE_SUFFIX: &str = "Base";

/// Derives the default extraction name from a simple type name.
///
/// Every literal `Controller` substring is removed and `Client` is appended.
#[must_use]
pub fn derive_extract_name(simple_name: &str) -> String {
    format!("{}{CLIENT_SUFFIX}", simple_name.replace(CONTROLLER_SUFFIX, ""))
}

/// Path of a generated file below the export source root.
#[must_use]
pub fn interface_file_path(source_root: &Path, package: &PackageName, name: &str) -> PathBuf {
    source_root
        .join(package.to_relative_path())
        .join(format!("{name}.{GENERATED_FILE_EXTENSION}"))
}

/// Names and locations resolved for one extraction target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionNames {
    extract_name: String,
    base_name: String,
    package: PackageName,
    base_package: PackageName,
    base_path: String,
}

impl ExtractionNames {
    /// Resolves the names of `ty`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MetadataInconsistency`] if the type carries no
    /// export package or a blank one.
    ///
    /// # Examples
    ///
    /// ```
    /// use client_export_codegen::naming::ExtractionNames;
    /// use client_export_core::{Attribute, AttributeValue, CandidateType, TypeKind};
    ///
    /// let ty = CandidateType::builder("api::OrderController", TypeKind::Struct)
    ///     .attribute(
    ///         Attribute::new("client_export")
    ///             .with_member("export_package", AttributeValue::str("clients")),
    ///     )
    ///     .build();
    ///
    /// let names = ExtractionNames::resolve(&ty).unwrap();
    /// assert_eq!(names.extract_name(), "OrderClient");
    /// assert_eq!(names.base_name(), "OrderClientBase");
    /// assert_eq!(names.base_package().as_str(), "clients.base");
    /// ```
    pub fn resolve(ty: &CandidateType) -> Result<Self> {
        let package = ty
            .export_package()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| Error::inconsistent(ty.qualified_name(), "export package is missing"))?;
        let package = PackageName::new(package);

        let extract_name = ty
            .extract_name()
            .map_or_else(|| derive_extract_name(ty.simple_name()), str::to_string);

        Ok(Self {
            base_name: format!("{extract_name}{BASE_SUFFIX}"),
            extract_name,
            base_package: package.base(),
            package,
            base_path: ty.base_route().unwrap_or_default().to_string(),
        })
    }

    /// Leaf interface name.
    #[must_use]
    pub fn extract_name(&self) -> &str {
        &self.extract_name
    }

    /// Base interface name.
    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Leaf package.
    #[must_use]
    pub const fn package(&self) -> &PackageName {
        &self.package
    }

    /// Base package.
    #[must_use]
    pub const fn base_package(&self) -> &PackageName {
        &self.base_package
    }

    /// Type-level route prefix; empty if none.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Path of the base interface file.
    #[must_use]
    pub fn base_file(&self, source_root: &Path) -> PathBuf {
        interface_file_path(source_root, &self.base_package, &self.base_name)
    }

    /// Path of the leaf interface file.
    #[must_use]
    pub fn leaf_file(&self, source_root: &Path) -> PathBuf {
        interface_file_path(source_root, &self.package, &self.extract_name)
    }
}
