//! Per-type interface planning.
//!
//! An [`InterfacePlan`] bundles everything known about one extraction
//! target before any file is touched: resolved names, the base interface
//! description, and a constructor for the leaf description.

use crate::collector::{ancestry, collect};
use crate::filter::is_extraction_target;
use crate::naming::ExtractionNames;
use crate::translator::translate;
use crate::types::{GeneratedInterfaceSpec, InterfaceKind, InterfaceRef};
use client_export_core::{Attribute, AttributeValue, CandidateType, Result, TypeRegistry, names};
use std::collections::BTreeSet;

/// Planned output of one extraction target.
#[derive(Debug, Clone)]
pub struct InterfacePlan {
    qualified_name: String,
    names: ExtractionNames,
    base: GeneratedInterfaceSpec,
}

impl InterfacePlan {
    /// Qualified name of the handler type.
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Resolved names and paths.
    #[must_use]
    pub const fn names(&self) -> &ExtractionNames {
        &self.names
    }

    /// Base interface description.
    #[must_use]
    pub const fn base(&self) -> &GeneratedInterfaceSpec {
        &self.base
    }

    /// Number of methods in the base interface.
    #[must_use]
    pub fn method_count(&self) -> usize {
        self.base.methods.len()
    }

    /// Builds the leaf interface description.
    ///
    /// The leaf has no methods of its own. It extends the base interface and
    /// carries `remote_client(name = ..., path = ...)`, where `path` is
    /// omitted when the base path is blank.
    #[must_use]
    pub fn leaf(&self, application_name: &str) -> GeneratedInterfaceSpec {
        let mut head = Attribute::new(names::REMOTE_CLIENT)
            .with_member(names::NAME_MEMBER, AttributeValue::str(application_name));
        if !self.names.base_path().trim().is_empty() {
            head.set_member(
                names::PATH_MEMBER,
                AttributeValue::str(self.names.base_path()),
            );
        }

        let supertrait = InterfaceRef {
            package: self.names.base_package().clone(),
            name: self.names.base_name().to_string(),
        };

        GeneratedInterfaceSpec {
            name: self.names.extract_name().to_string(),
            package: self.names.package().clone(),
            kind: InterfaceKind::Leaf,
            origin: self.qualified_name.clone(),
            methods: Vec::new(),
            imports: vec![supertrait.import_path()],
            supertrait: Some(supertrait),
            head_attribute: Some(head),
        }
    }
}

/// Plans the interfaces of one extraction target.
///
/// # Errors
///
/// Returns [`client_export_core::Error::MetadataInconsistency`] if names
/// cannot be resolved or the ancestry walk fails.
pub fn plan(registry: &TypeRegistry, ty: &CandidateType) -> Result<InterfacePlan> {
    let names = ExtractionNames::resolve(ty)?;
    let collected = collect(registry, ty, ty.exports_all())?;

    let methods = collected
        .methods()
        .map(|method| {
            let translated = translate(method);
            tracing::debug!("{}: {translated}", ty.simple_name());
            translated
        })
        .collect();

    let base = GeneratedInterfaceSpec {
        name: names.base_name().to_string(),
        package: names.base_package().clone(),
        kind: InterfaceKind::Base,
        origin: ty.qualified_name().to_string(),
        methods,
        supertrait: None,
        head_attribute: None,
        imports: chain_imports(&ancestry(registry, ty)?),
    };

    Ok(InterfacePlan {
        qualified_name: ty.qualified_name().to_string(),
        names,
        base,
    })
}

/// Plans every extraction target of the registry, in registry order.
///
/// # Errors
///
/// Fails on the first target that cannot be planned.
pub fn plan_round(registry: &TypeRegistry) -> Result<Vec<InterfacePlan>> {
    registry
        .iter()
        .filter(|ty| is_extraction_target(ty))
        .map(|ty| plan(registry, ty))
        .collect()
}

// Relative paths cannot resolve from the export module.
fn chain_imports(chain: &[&CandidateType]) -> Vec<String> {
    chain
        .iter()
        .flat_map(|ty| ty.imports())
        .filter(|import| !import.starts_with("self::") && !import.starts_with("super::"))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
