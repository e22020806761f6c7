//! Handler method to client method translation.
//!
//! Route attributes are copied verbatim. Binding attributes are copied and,
//! for query parameters and path variables, completed with an explicit
//! `value` naming the parameter, since client proxies cannot recover
//! parameter names at runtime. Everything else is dropped.

use crate::types::{TranslatedMethod, TranslatedParameter};
use client_export_core::{
    Attribute, AttributeValue, BindingKind, MethodDescriptor, ParameterDescriptor, RouteKind, names,
};

/// Translates a collected handler method into a client method description.
///
/// # Examples
///
/// ```
/// use client_export_codegen::translator::translate;
/// use client_export_core::{Attribute, AttributeValue, MethodDescriptor, ParameterDescriptor};
///
/// let method = MethodDescriptor::new("search")
///     .with_attribute(Attribute::new("export"))
///     .with_attribute(Attribute::new("get_mapping").with_value(AttributeValue::str("/search")))
///     .with_parameter(
///         ParameterDescriptor::new("q", "String").with_attribute(Attribute::new("request_param")),
///     )
///     .returns("Vec<Order>");
///
/// let translated = translate(&method);
/// assert_eq!(translated.attributes.len(), 1);
/// assert_eq!(
///     translated.parameters[0].attributes[0].to_string(),
///     r#"#[request_param("q")]"#
/// );
/// ```
#[must_use]
pub fn translate(method: &MethodDescriptor) -> TranslatedMethod {
    let attributes = method
        .attributes()
        .iter()
        .filter(|a| RouteKind::from_attribute_name(a.name()).is_some())
        .cloned()
        .collect();

    let parameters = method.parameters().iter().map(translate_parameter).collect();

    TranslatedMethod {
        name: method.name().to_string(),
        attributes,
        parameters,
        return_type: method.return_type().to_string(),
    }
}

fn translate_parameter(parameter: &ParameterDescriptor) -> TranslatedParameter {
    let attributes = parameter
        .attributes()
        .iter()
        .filter_map(|attribute| {
            let kind = BindingKind::from_attribute_name(attribute.name())?;
            Some(bind(kind, attribute, parameter.name()))
        })
        .collect();

    TranslatedParameter {
        name: parameter.name().to_string(),
        ty: parameter.ty().to_string(),
        attributes,
    }
}

fn bind(kind: BindingKind, attribute: &Attribute, parameter_name: &str) -> Attribute {
    let mut attribute = attribute.clone();
    if kind.requires_explicit_value() && !attribute.has_member(names::VALUE_MEMBER) {
        attribute.set_member(names::VALUE_MEMBER, AttributeValue::str(parameter_name));
    }
    attribute
}
