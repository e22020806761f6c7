//! Ancestry walk assembling a type's exported method set.
//!
//! Methods are keyed by [`SignatureIdentity`]. The walk starts at the leaf
//! type and recurses toward the root; ancestor entries only fill in
//! identities not already seen, so the most-derived declaration always wins.
//!
//! # Examples
//!
//! ```
//! use client_export_codegen::collector::collect;
//! use client_export_core::{
//!     Attribute, AttributeValue, CandidateType, MethodDescriptor, Supertype, TypeKind,
//!     TypeRegistry,
//! };
//!
//! let route = |path: &str| Attribute::new("get_mapping").with_value(AttributeValue::str(path));
//!
//! let mut registry = TypeRegistry::new();
//! registry.insert(
//!     CandidateType::builder("Base", TypeKind::Struct)
//!         .method(MethodDescriptor::new("health").with_attribute(route("/health")))
//!         .method(MethodDescriptor::new("list").with_attribute(route("/base")))
//!         .build(),
//! );
//! registry.insert(
//!     CandidateType::builder("Orders", TypeKind::Struct)
//!         .supertype(Supertype::named("Base"))
//!         .method(MethodDescriptor::new("list").with_attribute(route("/orders")))
//!         .build(),
//! );
//!
//! let collected = collect(&registry, registry.get("Orders").unwrap(), true).unwrap();
//! let names: Vec<_> = collected.methods().map(|m| m.name()).collect();
//! assert_eq!(names, ["list", "health"]);
//! ```

use crate::filter::is_extraction_candidate_method;
use client_export_core::{
    CandidateType, Error, MethodDescriptor, Result, SignatureIdentity, TypeRegistry,
};
use std::collections::{HashMap, HashSet};

/// Ordered mapping from signature identity to the winning declaration.
///
/// Iteration order is the leaf's methods in declaration order, followed by
/// each ancestor's unseen methods.
#[derive(Debug, Default)]
pub struct CollectedMethods<'a> {
    entries: Vec<(SignatureIdentity, &'a MethodDescriptor)>,
    index: HashMap<SignatureIdentity, usize>,
}

impl<'a> CollectedMethods<'a> {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `method` unless its identity is already present.
    ///
    /// Returns `true` if the method was inserted.
    pub fn insert_if_absent(&mut self, method: &'a MethodDescriptor) -> bool {
        let identity = method.signature_identity();
        if self.index.contains_key(&identity) {
            return false;
        }
        self.index.insert(identity.clone(), self.entries.len());
        self.entries.push((identity, method));
        true
    }

    /// Merges ancestor entries without overwriting existing identities.
    pub fn merge_ancestors(&mut self, ancestors: Self) {
        for (_, method) in ancestors.entries {
            self.insert_if_absent(method);
        }
    }

    /// Looks up the winning declaration for an identity.
    #[must_use]
    pub fn get(&self, identity: &SignatureIdentity) -> Option<&'a MethodDescriptor> {
        self.index.get(identity).map(|&i| self.entries[i].1)
    }

    /// Returns `true` if the identity is present.
    #[must_use]
    pub fn contains(&self, identity: &SignatureIdentity) -> bool {
        self.index.contains_key(identity)
    }

    /// Iterates `(identity, method)` pairs in collection order.
    pub fn iter(&self) -> impl Iterator<Item = (&SignatureIdentity, &'a MethodDescriptor)> {
        self.entries.iter().map(|(id, m)| (id, *m))
    }

    /// Iterates methods in collection order.
    pub fn methods(&self) -> impl Iterator<Item = &'a MethodDescriptor> + '_ {
        self.entries.iter().map(|(_, m)| *m)
    }

    /// Number of collected methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects the exported methods of `ty` and all of its ancestors.
///
/// `export_all` is the blanket export flag of the leaf type and applies to
/// every level of the walk.
///
/// # Errors
///
/// Returns [`Error::MetadataInconsistency`] if a supertype cannot be
/// resolved, resolves to an enum, or the chain is cyclic.
pub fn collect<'a>(
    registry: &'a TypeRegistry,
    ty: &'a CandidateType,
    export_all: bool,
) -> Result<CollectedMethods<'a>> {
    let collected = collect_level(registry, ty, export_all, 0)?;

    let mut seen = HashSet::new();
    for method in collected.methods() {
        if !seen.insert(method.name()) {
            tracing::warn!(
                "Type {} exports several methods named '{}'; the generated trait will not compile",
                ty.qualified_name(),
                method.name()
            );
        }
    }

    tracing::debug!(
        "Collected {} methods for {}",
        collected.len(),
        ty.qualified_name()
    );

    Ok(collected)
}

fn collect_level<'a>(
    registry: &'a TypeRegistry,
    ty: &'a CandidateType,
    export_all: bool,
    depth: usize,
) -> Result<CollectedMethods<'a>> {
    check_depth(registry, ty, depth)?;

    let mut result = CollectedMethods::new();
    for method in ty.methods() {
        if is_extraction_candidate_method(method, export_all) && !result.insert_if_absent(method)
        {
            tracing::debug!(
                "Skipping duplicate declaration {} on {}",
                method.signature_identity(),
                ty.qualified_name()
            );
        }
    }

    if let Some(parent) = registry.resolve_supertype(ty)? {
        let ancestors = collect_level(registry, parent, export_all, depth + 1)?;
        result.merge_ancestors(ancestors);
    }

    Ok(result)
}

/// Returns the ancestry chain of `ty`, starting with `ty` itself.
///
/// # Errors
///
/// Same conditions as [`collect`].
pub fn ancestry<'a>(
    registry: &'a TypeRegistry,
    ty: &'a CandidateType,
) -> Result<Vec<&'a CandidateType>> {
    let mut chain = vec![ty];
    let mut current = ty;
    while let Some(parent) = registry.resolve_supertype(current)? {
        check_depth(registry, ty, chain.len())?;
        chain.push(parent);
        current = parent;
    }
    Ok(chain)
}

// A chain longer than the registry must revisit a type.
fn check_depth(registry: &TypeRegistry, ty: &CandidateType, depth: usize) -> Result<()> {
    if depth > registry.len() {
        return Err(Error::inconsistent(
            ty.qualified_name(),
            "supertype chain is cyclic",
        ));
    }
    Ok(())
}
