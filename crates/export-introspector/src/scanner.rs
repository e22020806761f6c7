//! Source scanner building a [`TypeRegistry`] from Rust files.
//!
//! Structs, traits, and enums are registered with their attributes. Methods
//! of inherent `impl` blocks are attached to the type they name once the
//! whole source set has been seen, so an `impl` may precede its struct or
//! live in another file. Trait `impl` blocks are ignored.
//!
//! # Examples
//!
//! ```
//! use client_export_introspector::SourceScanner;
//!
//! let mut scanner = SourceScanner::new();
//! scanner
//!     .scan_source(
//!         "api",
//!         r#"
//!         #[rest_controller]
//!         #[client_export(export_package = "clients")]
//!         pub struct OrderController;
//!
//!         impl OrderController {
//!             #[get_mapping("/orders")]
//!             pub fn list(&self) -> Vec<String> { vec![] }
//!         }
//!         "#,
//!     )
//!     .unwrap();
//!
//! let registry = scanner.finish();
//! let orders = registry.get("api::OrderController").unwrap();
//! assert_eq!(orders.methods()[0].return_type(), "Vec<String>");
//! ```

use crate::module_path::{join, module_path_for};
use crate::syntax::{convert_attributes, type_to_string};
use client_export_core::{
    Attribute, AttributeValue, CandidateType, Error, MethodDescriptor, ParameterDescriptor,
    Result, Supertype, TypeKind, TypeRegistry, names, resolve_module_path,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use syn::{FnArg, ImplItem, Item, Pat, ReturnType, Signature, TraitItem, UseTree};
use walkdir::WalkDir;

/// Directory names skipped while walking a source root.
const SKIPPED_DIRECTORIES: &[&str] = &["target"];

#[derive(Debug)]
struct PendingType {
    kind: TypeKind,
    attributes: Vec<Attribute>,
    imports: Vec<String>,
    methods: Vec<MethodDescriptor>,
}

#[derive(Debug)]
struct PendingImpl {
    module: String,
    self_ty: String,
    methods: Vec<MethodDescriptor>,
}

/// Discovers candidate types in Rust source files.
#[derive(Debug, Default)]
pub struct SourceScanner {
    types: BTreeMap<String, PendingType>,
    impls: Vec<PendingImpl>,
    files_scanned: usize,
}

impl SourceScanner {
    /// Creates an empty scanner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files scanned so far.
    #[must_use]
    pub const fn files_scanned(&self) -> usize {
        self.files_scanned
    }

    /// Scans every `.rs` file below `root`, in file-name order.
    ///
    /// Module paths are derived relative to `root`. Hidden directories and
    /// `target` are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceParseError`] if the directory cannot be walked
    /// or a file cannot be read or parsed.
    pub fn scan_dir(&mut self, root: &Path) -> Result<usize> {
        tracing::info!("Scanning sources under {}", root.display());
        let before = self.files_scanned;

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry));

        for entry in walker {
            let entry = entry.map_err(|e| Error::SourceParseError {
                path: e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf),
                message: e.to_string(),
            })?;

            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "rs") {
                continue;
            }

            self.scan_file(path, &module_path_for(path, root))?;
        }

        Ok(self.files_scanned - before)
    }

    /// Scans one file as the module `module_path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceParseError`] if the file cannot be read or
    /// parsed.
    pub fn scan_file(&mut self, file: &Path, module_path: &str) -> Result<()> {
        let content = std::fs::read_to_string(file).map_err(|e| Error::SourceParseError {
            path: file.to_path_buf(),
            message: e.to_string(),
        })?;
        self.scan_parsed(&content, file, module_path)
    }

    /// Scans in-memory source as the module `module_path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceParseError`] if the source does not parse.
    pub fn scan_source(&mut self, module_path: &str, source: &str) -> Result<()> {
        let label = PathBuf::from(format!("<{module_path}>"));
        self.scan_parsed(source, &label, module_path)
    }

    fn scan_parsed(&mut self, source: &str, file: &Path, module_path: &str) -> Result<()> {
        let ast = syn::parse_file(source).map_err(|e| Error::SourceParseError {
            path: file.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::debug!("Scanning {} as module '{module_path}'", file.display());
        self.scan_items(&ast.items, module_path);
        self.files_scanned += 1;
        Ok(())
    }

    fn scan_items(&mut self, items: &[Item], module: &str) {
        let imports: Vec<String> = items
            .iter()
            .filter_map(|item| match item {
                Item::Use(item) => Some(flatten_use_tree(&item.tree, "")),
                _ => None,
            })
            .flatten()
            .collect();

        for item in items {
            match item {
                Item::Struct(item) => self.register(
                    module,
                    &item.ident,
                    TypeKind::Struct,
                    &item.attrs,
                    &imports,
                    Vec::new(),
                ),
                Item::Enum(item) => self.register(
                    module,
                    &item.ident,
                    TypeKind::Enum,
                    &item.attrs,
                    &imports,
                    Vec::new(),
                ),
                Item::Trait(item) => {
                    let methods = item
                        .items
                        .iter()
                        .filter_map(|member| match member {
                            TraitItem::Fn(f) => Some(method_from_signature(&f.sig, &f.attrs)),
                            _ => None,
                        })
                        .collect();
                    self.register(
                        module,
                        &item.ident,
                        TypeKind::Trait,
                        &item.attrs,
                        &imports,
                        methods,
                    );
                }
                Item::Impl(item) if item.trait_.is_none() => {
                    let Some(self_ty) = impl_target(&item.self_ty) else {
                        continue;
                    };
                    let methods = item
                        .items
                        .iter()
                        .filter_map(|member| match member {
                            ImplItem::Fn(f) => Some(method_from_signature(&f.sig, &f.attrs)),
                            _ => None,
                        })
                        .collect();
                    self.impls.push(PendingImpl {
                        module: module.to_string(),
                        self_ty,
                        methods,
                    });
                }
                Item::Mod(item) => {
                    if let Some((_, content)) = &item.content {
                        self.scan_items(content, &join(module, &item.ident.to_string()));
                    }
                }
                _ => {}
            }
        }
    }

    fn register(
        &mut self,
        module: &str,
        ident: &syn::Ident,
        kind: TypeKind,
        attrs: &[syn::Attribute],
        imports: &[String],
        methods: Vec<MethodDescriptor>,
    ) {
        let qualified_name = join(module, &ident.to_string());
        let pending = PendingType {
            kind,
            attributes: convert_attributes(attrs),
            imports: imports.to_vec(),
            methods,
        };

        if self.types.insert(qualified_name.clone(), pending).is_some() {
            tracing::warn!("Type {qualified_name} declared more than once; keeping the last");
        }
    }

    /// Attaches `impl` methods and returns the registry snapshot.
    #[must_use]
    pub fn finish(mut self) -> TypeRegistry {
        for pending in std::mem::take(&mut self.impls) {
            match self.impl_owner(&pending.module, &pending.self_ty) {
                Some(owner) => {
                    if let Some(ty) = self.types.get_mut(&owner) {
                        ty.methods.extend(pending.methods);
                    }
                }
                None => tracing::warn!(
                    "Ignoring impl block for unresolved type '{}' in '{}'",
                    pending.self_ty,
                    pending.module
                ),
            }
        }

        let mut registry = TypeRegistry::new();
        for (qualified_name, pending) in self.types {
            registry.insert(build_type(qualified_name, pending));
        }

        tracing::info!(
            "Discovered {} types in {} files",
            registry.len(),
            self.files_scanned
        );
        registry
    }

    fn impl_owner(&self, module: &str, self_ty: &str) -> Option<String> {
        let normalized = resolve_module_path(module, self_ty)?;

        let local = join(module, &normalized);
        if self.types.contains_key(&local) {
            return Some(local);
        }
        if self.types.contains_key(&normalized) {
            return Some(normalized);
        }

        let simple = normalized.rsplit("::").next().unwrap_or(&normalized);
        let mut matches = self
            .types
            .keys()
            .filter(|key| key.rsplit("::").next() == Some(simple));
        match (matches.next(), matches.next()) {
            (Some(found), None) => Some(found.clone()),
            _ => None,
        }
    }
}

fn is_skipped(entry: &walkdir::DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    entry.file_type().is_dir()
        && (name.starts_with('.') || SKIPPED_DIRECTORIES.contains(&name.as_ref()))
}

fn build_type(qualified_name: String, pending: PendingType) -> CandidateType {
    let supertype = pending
        .attributes
        .iter()
        .find(|a| a.name() == names::EXTENDS)
        .and_then(|a| a.member(names::VALUE_MEMBER))
        .and_then(|value| match value {
            AttributeValue::Str(path) | AttributeValue::Raw(path) => {
                Some(Supertype::named(path.clone()))
            }
            _ => None,
        })
        .unwrap_or_default();

    let mut builder = CandidateType::builder(qualified_name, pending.kind)
        .supertype(supertype)
        .methods(pending.methods);
    for attribute in pending.attributes {
        builder = builder.attribute(attribute);
    }
    for import in pending.imports {
        builder = builder.import(import);
    }
    builder.build()
}

fn impl_target(ty: &syn::Type) -> Option<String> {
    match ty {
        syn::Type::Path(path) if path.qself.is_none() => Some(
            path.path
                .segments
                .iter()
                .map(|s| s.ident.to_string())
                .collect::<Vec<_>>()
                .join("::"),
        ),
        _ => None,
    }
}

fn method_from_signature(sig: &Signature, attrs: &[syn::Attribute]) -> MethodDescriptor {
    let mut method = MethodDescriptor::new(sig.ident.to_string());

    for (index, input) in sig.inputs.iter().enumerate() {
        let FnArg::Typed(arg) = input else {
            continue;
        };
        let mut parameter = ParameterDescriptor::new(
            parameter_name(&arg.pat).unwrap_or_else(|| format!("arg{index}")),
            type_to_string(&arg.ty),
        );
        for attribute in convert_attributes(&arg.attrs) {
            parameter = parameter.with_attribute(attribute);
        }
        method = method.with_parameter(parameter);
    }

    if let ReturnType::Type(_, ty) = &sig.output {
        method = method.returns(type_to_string(ty));
    }

    for attribute in convert_attributes(attrs) {
        method = method.with_attribute(attribute);
    }
    method
}

// `Json(body)` binds `body`.
fn parameter_name(pat: &Pat) -> Option<String> {
    match pat {
        Pat::Ident(ident) => Some(ident.ident.to_string()),
        Pat::TupleStruct(tuple) => tuple.elems.first().and_then(parameter_name),
        Pat::Type(typed) => parameter_name(&typed.pat),
        _ => None,
    }
}

fn flatten_use_tree(tree: &UseTree, prefix: &str) -> Vec<String> {
    match tree {
        UseTree::Path(path) => flatten_use_tree(&path.tree, &join(prefix, &path.ident.to_string())),
        UseTree::Name(name) => vec![join(prefix, &name.ident.to_string())],
        UseTree::Rename(rename) => vec![format!(
            "{} as {}",
            join(prefix, &rename.ident.to_string()),
            rename.rename
        )],
        UseTree::Glob(_) => vec![join(prefix, "*")],
        UseTree::Group(group) => group
            .items
            .iter()
            .flat_map(|item| flatten_use_tree(item, prefix))
            .collect(),
    }
}
