//! Code printer for generated interfaces.
//!
//! [`InterfaceRenderer`] is the seam between planning and persistence: it
//! turns a [`GeneratedInterfaceSpec`] into Rust source. The default
//! implementation, [`HandlebarsRenderer`], flattens the description into an
//! [`InterfaceContext`] of plain strings and renders the built-in templates.
//!
//! # Examples
//!
//! ```
//! use client_export_codegen::renderer::{HandlebarsRenderer, InterfaceRenderer};
//! use client_export_codegen::types::{GeneratedInterfaceSpec, InterfaceKind, TranslatedMethod};
//! use client_export_core::{Attribute, AttributeValue, PackageName};
//!
//! let spec = GeneratedInterfaceSpec {
//!     name: "PingClientBase".to_string(),
//!     package: PackageName::new("clients.base"),
//!     kind: InterfaceKind::Base,
//!     origin: "api::PingController".to_string(),
//!     methods: vec![TranslatedMethod {
//!         name: "ping".to_string(),
//!         attributes: vec![Attribute::new("get_mapping").with_value(AttributeValue::str("/ping"))],
//!         parameters: vec![],
//!         return_type: "String".to_string(),
//!     }],
//!     supertrait: None,
//!     head_attribute: None,
//!     imports: vec![],
//! };
//!
//! let source = HandlebarsRenderer::new().unwrap().render(&spec).unwrap();
//! assert!(source.contains("pub trait PingClientBase {"));
//! assert!(source.contains("fn ping(&self) -> String;"));
//! ```

use crate::template_engine::{BASE_TEMPLATE, LEAF_TEMPLATE, TemplateEngine};
use crate::types::{GeneratedInterfaceSpec, InterfaceKind, TranslatedMethod, TranslatedParameter};
use client_export_core::Result;
use serde::Serialize;

/// Serializes an interface description to source text.
pub trait InterfaceRenderer {
    /// Renders one interface.
    ///
    /// # Errors
    ///
    /// Returns [`client_export_core::Error::TemplateError`] if rendering fails.
    fn render(&self, spec: &GeneratedInterfaceSpec) -> Result<String>;
}

/// Template context for one interface file.
#[derive(Debug, Clone, Serialize)]
pub struct InterfaceContext {
    /// Trait name
    pub name: String,
    /// Qualified name of the source handler
    pub origin: String,
    /// `use` paths
    pub imports: Vec<String>,
    /// Rendered head attribute, or empty
    pub head_attribute: String,
    /// Supertrait name, or empty
    pub supertrait: String,
    /// Trait methods
    pub methods: Vec<MethodContext>,
}

/// Template context for one trait method.
#[derive(Debug, Clone, Serialize)]
pub struct MethodContext {
    /// Method name
    pub name: String,
    /// Rendered route attributes
    pub attributes: Vec<String>,
    /// Parameters after the receiver
    pub parameters: Vec<ParameterContext>,
    /// `-> T`, or empty for unit
    pub return_clause: String,
}

/// Template context for one parameter.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterContext {
    /// Rendered binding attributes
    pub attributes: Vec<String>,
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub ty: String,
}

impl From<&GeneratedInterfaceSpec> for InterfaceContext {
    fn from(spec: &GeneratedInterfaceSpec) -> Self {
        Self {
            name: spec.name.clone(),
            origin: spec.origin.clone(),
            imports: spec.imports.clone(),
            head_attribute: spec
                .head_attribute
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            supertrait: spec
                .supertrait
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            methods: spec.methods.iter().map(MethodContext::from).collect(),
        }
    }
}

impl From<&TranslatedMethod> for MethodContext {
    fn from(method: &TranslatedMethod) -> Self {
        Self {
            name: method.name.clone(),
            attributes: method.attributes.iter().map(ToString::to_string).collect(),
            parameters: method.parameters.iter().map(ParameterContext::from).collect(),
            return_clause: method.return_clause(),
        }
    }
}

impl From<&TranslatedParameter> for ParameterContext {
    fn from(parameter: &TranslatedParameter) -> Self {
        Self {
            attributes: parameter.attributes.iter().map(ToString::to_string).collect(),
            name: parameter.name.clone(),
            ty: parameter.ty.clone(),
        }
    }
}

/// Handlebars-backed [`InterfaceRenderer`].
#[derive(Debug)]
pub struct HandlebarsRenderer<'a> {
    engine: TemplateEngine<'a>,
}

impl<'a> HandlebarsRenderer<'a> {
    /// Creates a renderer over the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns error if template registration fails.
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
        })
    }

    /// Creates a renderer over a customized engine.
    #[must_use]
    pub const fn with_engine(engine: TemplateEngine<'a>) -> Self {
        Self { engine }
    }
}

impl InterfaceRenderer for HandlebarsRenderer<'_> {
    fn render(&self, spec: &GeneratedInterfaceSpec) -> Result<String> {
        let template = match spec.kind {
            InterfaceKind::Base => BASE_TEMPLATE,
            InterfaceKind::Leaf => LEAF_TEMPLATE,
        };
        self.engine.render(template, &InterfaceContext::from(spec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InterfaceRef;
    use client_export_core::{Attribute, AttributeValue, PackageName};

    fn base_spec(methods: Vec<TranslatedMethod>) -> GeneratedInterfaceSpec {
        GeneratedInterfaceSpec {
            name: "OrderClientBase".to_string(),
            package: PackageName::new("clients.base"),
            kind: InterfaceKind::Base,
            origin: "api::OrderController".to_string(),
            methods,
            supertrait: None,
            head_attribute: None,
            imports: vec!["crate::model::Order".to_string()],
        }
    }

    fn find_method() -> TranslatedMethod {
        TranslatedMethod {
            name: "find".to_string(),
            attributes: vec![
                Attribute::new("get_mapping").with_value(AttributeValue::str("/{id}")),
            ],
            parameters: vec![
                TranslatedParameter {
                    name: "id".to_string(),
                    ty: "u64".to_string(),
                    attributes: vec![
                        Attribute::new("path_variable").with_value(AttributeValue::str("id")),
                    ],
                },
                TranslatedParameter {
                    name: "verbose".to_string(),
                    ty: "bool".to_string(),
                    attributes: vec![],
                },
            ],
            return_type: "Option<Order>".to_string(),
        }
    }

    #[test]
    fn test_render_base_interface() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let source = renderer.render(&base_spec(vec![find_method()])).unwrap();

        assert!(source.starts_with("// @generated by client-export from `api::OrderController`."));
        assert!(source.contains("regenerated on every build"));
        assert!(source.contains("use crate::model::Order;\n"));
        assert!(source.contains("pub trait OrderClientBase {\n"));
        assert!(source.contains("    #[get_mapping(\"/{id}\")]\n"));
        assert!(source.contains(
            "    fn find(&self, #[path_variable(\"id\")] id: u64, verbose: bool) -> Option<Order>;\n"
        ));
        assert!(source.ends_with("}\n"));
    }

    #[test]
    fn test_render_empty_base_interface() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let mut spec = base_spec(vec![]);
        spec.imports.clear();
        let source = renderer.render(&spec).unwrap();

        assert!(!source.contains("use "));
        assert!(source.contains("pub trait OrderClientBase {\n}"));
    }

    #[test]
    fn test_render_leaf_interface() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let base = InterfaceRef {
            package: PackageName::new("clients.base"),
            name: "OrderClientBase".to_string(),
        };
        let spec = GeneratedInterfaceSpec {
            name: "OrderClient".to_string(),
            package: PackageName::new("clients"),
            kind: InterfaceKind::Leaf,
            origin: "api::OrderController".to_string(),
            methods: vec![],
            imports: vec![base.import_path()],
            supertrait: Some(base),
            head_attribute: Some(
                Attribute::new("remote_client").with_member("name", AttributeValue::str("orders")),
            ),
        };

        let source = renderer.render(&spec).unwrap();
        assert!(source.contains("Generated once"));
        assert!(source.contains("use crate::clients::base::OrderClientBase;\n"));
        assert!(source.contains(
            "#[remote_client(name = \"orders\")]\npub trait OrderClient: OrderClientBase {}\n"
        ));
    }

    #[test]
    fn test_context_flattens_optional_parts() {
        let context = InterfaceContext::from(&base_spec(vec![find_method()]));
        assert_eq!(context.head_attribute, "");
        assert_eq!(context.supertrait, "");
        assert_eq!(context.methods[0].return_clause, " -> Option<Order>");
        assert_eq!(context.methods[0].parameters[0].attributes, [r#"#[path_variable("id")]"#]);
    }

    #[test]
    fn test_custom_template_override() {
        let mut engine = TemplateEngine::new().unwrap();
        engine
            .register_template_string(BASE_TEMPLATE, "trait {{name}};")
            .unwrap();
        let renderer = HandlebarsRenderer::with_engine(engine);
        assert_eq!(
            renderer.render(&base_spec(vec![])).unwrap(),
            "trait OrderClientBase;"
        );
    }
}
