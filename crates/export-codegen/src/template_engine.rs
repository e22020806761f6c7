//! Template engine for code generation using Handlebars.
//!
//! Provides a wrapper around Handlebars with pre-registered templates
//! for Rust client interface generation.
//!
//! # Examples
//!
//! ```
//! use client_export_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let mut engine = TemplateEngine::new().unwrap();
//! engine.register_template_string("greeting", "// {{name}}").unwrap();
//! let rendered = engine.render("greeting", &json!({"name": "<T>"})).unwrap();
//! assert_eq!(rendered, "// <T>");
//! ```

use client_export_core::{Error, Result};
use handlebars::Handlebars;
use serde::Serialize;

/// Name of the base interface template.
pub const BASE_TEMPLATE: &str = "interface/base";

/// Name of the leaf interface template.
pub const LEAF_TEMPLATE: &str = "interface/leaf";

/// Template engine for code generation.
///
/// Wraps Handlebars in strict mode with HTML escaping disabled, since the
/// output is Rust source.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Creates a new template engine with registered templates.
    ///
    /// # Errors
    ///
    /// Returns error if template registration fails.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        Self::register_interface_templates(&mut handlebars)?;

        Ok(Self { handlebars })
    }

    fn register_interface_templates(handlebars: &mut Handlebars<'a>) -> Result<()> {
        handlebars
            .register_template_string(
                BASE_TEMPLATE,
                include_str!("../templates/interface/base.rs.hbs"),
            )
            .map_err(|e| Error::TemplateError {
                message: format!("Failed to register base interface template: {e}"),
            })?;

        handlebars
            .register_template_string(
                LEAF_TEMPLATE,
                include_str!("../templates/interface/leaf.rs.hbs"),
            )
            .map_err(|e| Error::TemplateError {
                message: format!("Failed to register leaf interface template: {e}"),
            })?;

        Ok(())
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Template name is not registered
    /// - Context cannot be serialized
    /// - Template rendering fails
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::TemplateError {
                message: format!("Template rendering failed: {e}"),
            })
    }

    /// Registers a custom template.
    ///
    /// Registering under a built-in name replaces that template.
    ///
    /// # Errors
    ///
    /// Returns error if template string is invalid.
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::TemplateError {
                message: format!("Failed to register template '{name}': {e}"),
            })
    }

    /// Returns `true` if a template with this name is registered.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}
