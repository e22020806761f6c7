//! Structured interface descriptions handed to the code printer.
//!
//! A [`GeneratedInterfaceSpec`] is everything the printer needs to emit one
//! trait: its name and package, translated methods, an optional supertrait,
//! an optional head attribute, and the imports the file needs.

use client_export_core::{Attribute, PackageName};
use std::fmt;

/// A translated parameter of a client method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedParameter {
    /// Parameter name, copied from the handler
    pub name: String,
    /// Parameter type as source text, copied from the handler
    pub ty: String,
    /// Binding attributes, at most one in well-formed input
    pub attributes: Vec<Attribute>,
}

/// A translated client method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedMethod {
    /// Method name
    pub name: String,
    /// Route attributes in declaration order
    pub attributes: Vec<Attribute>,
    /// Parameters in declaration order, receiver excluded
    pub parameters: Vec<TranslatedParameter>,
    /// Return type as source text; empty for unit
    pub return_type: String,
}

impl TranslatedMethod {
    /// The `-> T` clause, or an empty string for unit.
    #[must_use]
    pub fn return_clause(&self) -> String {
        if self.return_type.trim().is_empty() {
            String::new()
        } else {
            format!(" -> {}", self.return_type)
        }
    }
}

impl fmt::Display for TranslatedMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for attribute in &self.attributes {
            write!(f, "{attribute} ")?;
        }
        write!(f, "fn {}(&self", self.name)?;
        for parameter in &self.parameters {
            f.write_str(", ")?;
            for attribute in &parameter.attributes {
                write!(f, "{attribute} ")?;
            }
            write!(f, "{}: {}", parameter.name, parameter.ty)?;
        }
        write!(f, "){}", self.return_clause())
    }
}

/// Which of the two artifacts an interface is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceKind {
    /// Regenerated on every round
    Base,
    /// Written once, then owned by the user
    Leaf,
}

/// Reference to a generated trait by package and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceRef {
    /// Package of the referenced trait
    pub package: PackageName,
    /// Trait name
    pub name: String,
}

impl InterfaceRef {
    /// `use` path of the referenced trait inside the export module.
    ///
    /// # Examples
    ///
    /// ```
    /// use client_export_codegen::types::InterfaceRef;
    /// use client_export_core::PackageName;
    ///
    /// let base = InterfaceRef {
    ///     package: PackageName::new("clients.base"),
    ///     name: "OrderClientBase".to_string(),
    /// };
    /// assert_eq!(base.import_path(), "crate::clients::base::OrderClientBase");
    /// ```
    #[must_use]
    pub fn import_path(&self) -> String {
        format!("{}::{}", self.package.module_path(), self.name)
    }
}

/// Description of one generated trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedInterfaceSpec {
    /// Trait name
    pub name: String,
    /// Target package
    pub package: PackageName,
    /// Base or leaf artifact
    pub kind: InterfaceKind,
    /// Qualified name of the handler type the trait was derived from
    pub origin: String,
    /// Translated methods; signature identities are pairwise distinct
    pub methods: Vec<TranslatedMethod>,
    /// Supertrait, if any
    pub supertrait: Option<InterfaceRef>,
    /// Head attribute placed on the trait
    pub head_attribute: Option<Attribute>,
    /// `use` paths, sorted and deduplicated
    pub imports: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_export_core::AttributeValue;

    #[test]
    fn test_method_display() {
        let method = TranslatedMethod {
            name: "find".to_string(),
            attributes: vec![
                Attribute::new("get_mapping").with_value(AttributeValue::str("/{id}")),
            ],
            parameters: vec![TranslatedParameter {
                name: "id".to_string(),
                ty: "u64".to_string(),
                attributes: vec![
                    Attribute::new("path_variable").with_value(AttributeValue::str("id")),
                ],
            }],
            return_type: "Order".to_string(),
        };

        assert_eq!(
            method.to_string(),
            r#"#[get_mapping("/{id}")] fn find(&self, #[path_variable("id")] id: u64) -> Order"#
        );
    }

    #[test]
    fn test_unit_return_has_no_clause() {
        let method = TranslatedMethod {
            name: "ping".to_string(),
            attributes: vec![],
            parameters: vec![],
            return_type: String::new(),
        };
        assert_eq!(method.return_clause(), "");
        assert_eq!(method.to_string(), "fn ping(&self)");
    }
}
