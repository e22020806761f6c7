//! Metadata model of candidate handler types.
//!
//! A [`TypeRegistry`] is a read-only snapshot of every type discovered in one
//! build round. Types point at their direct supertype by name, and the
//! registry resolves those names to the next node of the ancestry chain,
//! terminating at [`Supertype::Root`].
//!
//! # Examples
//!
//! ```
//! use client_export_core::{
//!     Attribute, AttributeValue, CandidateType, MethodDescriptor, Supertype, TypeKind,
//!     TypeRegistry,
//! };
//!
//! let base = CandidateType::builder("api::BaseController", TypeKind::Struct).build();
//! let orders = CandidateType::builder("api::OrderController", TypeKind::Struct)
//!     .supertype(Supertype::named("BaseController"))
//!     .method(
//!         MethodDescriptor::new("list")
//!             .returns("Vec<Order>")
//!             .with_attribute(Attribute::new("get_mapping").with_value(AttributeValue::str("/"))),
//!     )
//!     .build();
//!
//! let mut registry = TypeRegistry::new();
//! registry.insert(base);
//! registry.insert(orders);
//!
//! let orders = registry.get("api::OrderController").unwrap();
//! let parent = registry.resolve_supertype(orders).unwrap().unwrap();
//! assert_eq!(parent.simple_name(), "BaseController");
//! ```

use crate::attributes::{Attribute, AttributeSet, names};
use crate::types::resolve_module_path;
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of a discovered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A struct; the only kind that can be an extraction target
    Struct,
    /// A trait
    Trait,
    /// An enum; never valid in an ancestry chain
    Enum,
}

/// Reference from a type to its direct supertype.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Supertype {
    /// The universal root; contributes no members
    #[default]
    Root,
    /// A path naming another registered type, as written in source
    Named(String),
}

impl Supertype {
    /// Creates a named supertype reference.
    #[must_use]
    pub fn named(path: impl Into<String>) -> Self {
        Self::Named(path.into())
    }
}

/// Key used to deduplicate methods and decide override precedence.
///
/// Two methods share an identity iff they have the same name and the same
/// ordered parameter types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignatureIdentity {
    name: String,
    parameter_types: Vec<String>,
}

impl SignatureIdentity {
    /// Creates an identity from a name and ordered parameter types.
    #[must_use]
    pub fn new(name: impl Into<String>, parameter_types: Vec<String>) -> Self {
        Self {
            name: name.into(),
            parameter_types,
        }
    }

    /// Method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordered parameter types.
    #[must_use]
    pub fn parameter_types(&self) -> &[String] {
        &self.parameter_types
    }
}

impl fmt::Display for SignatureIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.parameter_types.join(", "))
    }
}

/// One declared parameter of a handler method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    name: String,
    ty: String,
    attributes: AttributeSet,
}

impl ParameterDescriptor {
    /// Creates a parameter with no attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            attributes: AttributeSet::new(),
        }
    }

    /// Attaches an attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter type as source text.
    #[must_use]
    pub fn ty(&self) -> &str {
        &self.ty
    }

    /// Attributes attached to the parameter.
    #[must_use]
    pub const fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }
}

/// One declared handler method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    name: String,
    parameters: Vec<ParameterDescriptor>,
    return_type: String,
    attributes: AttributeSet,
}

impl MethodDescriptor {
    /// Creates a method with no parameters returning unit.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: String::new(),
            attributes: AttributeSet::new(),
        }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Sets the return type; an empty string means unit.
    #[must_use]
    pub fn returns(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = return_type.into();
        self
    }

    /// Attaches an attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameters in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// Return type as source text; empty for unit.
    #[must_use]
    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    /// Attributes attached to the method.
    #[must_use]
    pub const fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Computes the signature identity of this method.
    ///
    /// # Examples
    ///
    /// ```
    /// use client_export_core::{MethodDescriptor, ParameterDescriptor};
    ///
    /// let method = MethodDescriptor::new("find")
    ///     .with_parameter(ParameterDescriptor::new("id", "u64"))
    ///     .with_parameter(ParameterDescriptor::new("verbose", "bool"));
    /// assert_eq!(method.signature_identity().to_string(), "find(u64, bool)");
    /// ```
    #[must_use]
    pub fn signature_identity(&self) -> SignatureIdentity {
        SignatureIdentity::new(
            self.name.clone(),
            self.parameters.iter().map(|p| p.ty.clone()).collect(),
        )
    }
}

/// A discovered type, eligible or not for client interface extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateType {
    qualified_name: String,
    kind: TypeKind,
    supertype: Supertype,
    methods: Vec<MethodDescriptor>,
    attributes: AttributeSet,
    imports: Vec<String>,
}

impl CandidateType {
    /// Starts building a type with the given fully-qualified name.
    #[must_use]
    pub fn builder(qualified_name: impl Into<String>, kind: TypeKind) -> CandidateTypeBuilder {
        CandidateTypeBuilder {
            inner: Self {
                qualified_name: qualified_name.into(),
                kind,
                supertype: Supertype::Root,
                methods: Vec::new(),
                attributes: AttributeSet::new(),
                imports: Vec::new(),
            },
        }
    }

    /// Fully-qualified name; the identity of the type.
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Last path segment of the qualified name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit("::")
            .next()
            .unwrap_or(&self.qualified_name)
    }

    /// Module path of the declaring module; empty at the crate root.
    #[must_use]
    pub fn module_path(&self) -> &str {
        self.qualified_name
            .rsplit_once("::")
            .map_or("", |(module, _)| module)
    }

    /// Kind of the type.
    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Direct supertype reference.
    #[must_use]
    pub const fn supertype(&self) -> &Supertype {
        &self.supertype
    }

    /// Declared methods in declaration order.
    #[must_use]
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Type-level attributes.
    #[must_use]
    pub const fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// `use` trees visible in the declaring module.
    #[must_use]
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Explicit extraction name, if supplied and non-blank.
    #[must_use]
    pub fn extract_name(&self) -> Option<&str> {
        self.attributes
            .str_member(names::CLIENT_EXPORT, names::EXTRACT_NAME_MEMBER)
            .filter(|name| !name.trim().is_empty())
    }

    /// Target package of the generated interfaces.
    #[must_use]
    pub fn export_package(&self) -> Option<&str> {
        self.attributes
            .str_member(names::CLIENT_EXPORT, names::EXPORT_PACKAGE_MEMBER)
    }

    /// First value of the type-level route prefix, if present and non-empty.
    #[must_use]
    pub fn base_route(&self) -> Option<&str> {
        self.attributes
            .get(names::REQUEST_MAPPING)
            .and_then(|a| a.member(names::VALUE_MEMBER))
            .and_then(crate::AttributeValue::first_str)
            .filter(|path| !path.is_empty())
    }

    /// `true` if the type carries the blanket export marker.
    #[must_use]
    pub fn exports_all(&self) -> bool {
        self.attributes.contains(names::EXPORT)
    }
}

/// Builder for [`CandidateType`].
#[derive(Debug)]
pub struct CandidateTypeBuilder {
    inner: CandidateType,
}

impl CandidateTypeBuilder {
    /// Sets the direct supertype.
    #[must_use]
    pub fn supertype(mut self, supertype: Supertype) -> Self {
        self.inner.supertype = supertype;
        self
    }

    /// Appends a declared method.
    #[must_use]
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.inner.methods.push(method);
        self
    }

    /// Appends several declared methods.
    #[must_use]
    pub fn methods(mut self, methods: impl IntoIterator<Item = MethodDescriptor>) -> Self {
        self.inner.methods.extend(methods);
        self
    }

    /// Attaches a type-level attribute.
    #[must_use]
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.inner.attributes.push(attribute);
        self
    }

    /// Records a `use` tree of the declaring module.
    #[must_use]
    pub fn import(mut self, import: impl Into<String>) -> Self {
        self.inner.imports.push(import.into());
        self
    }

    /// Finishes the type.
    #[must_use]
    pub fn build(self) -> CandidateType {
        self.inner
    }
}

/// Read-only snapshot of every type discovered in one round.
///
/// Iteration is ordered by qualified name so rounds are deterministic.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeMap<String, CandidateType>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// Registers a type, returning a previously registered type of the same
    /// qualified name.
    pub fn insert(&mut self, ty: CandidateType) -> Option<CandidateType> {
        self.types.insert(ty.qualified_name.clone(), ty)
    }

    /// Looks up a type by qualified name.
    #[must_use]
    pub fn get(&self, qualified_name: &str) -> Option<&CandidateType> {
        self.types.get(qualified_name)
    }

    /// Iterates types ordered by qualified name.
    pub fn iter(&self) -> impl Iterator<Item = &CandidateType> {
        self.types.values()
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no type is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Resolves the direct supertype of `ty`.
    ///
    /// Returns `Ok(None)` at the root. Named references are tried as a
    /// qualified path, then relative to the declaring module, then by a
    /// unique simple name anywhere in the registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MetadataInconsistency`] if the name matches no type,
    /// matches several, names the type itself, or resolves to an enum.
    pub fn resolve_supertype(&self, ty: &CandidateType) -> Result<Option<&CandidateType>> {
        let Supertype::Named(path) = &ty.supertype else {
            return Ok(None);
        };

        let resolved = self.lookup_path(ty, path)?;

        if resolved.qualified_name == ty.qualified_name {
            return Err(Error::inconsistent(
                &ty.qualified_name,
                "type names itself as its supertype",
            ));
        }

        if resolved.kind == TypeKind::Enum {
            return Err(Error::inconsistent(
                &ty.qualified_name,
                format!(
                    "supertype '{}' is neither a struct nor a trait",
                    resolved.qualified_name
                ),
            ));
        }

        Ok(Some(resolved))
    }

    fn lookup_path(&self, ty: &CandidateType, path: &str) -> Result<&CandidateType> {
        let module = ty.module_path();
        let normalized = resolve_module_path(module, path).ok_or_else(|| {
            Error::inconsistent(
                &ty.qualified_name,
                format!("supertype '{path}' climbs above the crate root"),
            )
        })?;

        if let Some(found) = self.types.get(&normalized) {
            return Ok(found);
        }

        if !module.is_empty()
            && let Some(found) = self.types.get(&format!("{module}::{normalized}"))
        {
            return Ok(found);
        }

        let simple = normalized.rsplit("::").next().unwrap_or(&normalized);
        let mut matches = self.types.values().filter(|t| t.simple_name() == simple);

        match (matches.next(), matches.next()) {
            (Some(found), None) => Ok(found),
            (None, _) => Err(Error::inconsistent(
                &ty.qualified_name,
                format!("supertype '{path}' cannot be resolved"),
            )),
            (Some(_), Some(_)) => Err(Error::inconsistent(
                &ty.qualified_name,
                format!("supertype '{path}' is ambiguous"),
            )),
        }
    }
}
