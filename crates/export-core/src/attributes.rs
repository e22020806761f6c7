//! Attribute model for handler metadata.
//!
//! Every marker, route, and binding lookup is a query against an
//! [`AttributeSet`] attached to a type, method, or parameter. An attribute is
//! a name plus ordered `member = value` pairs. Positional arguments are stored
//! under the `value` member.
//!
//! # Examples
//!
//! ```
//! use client_export_core::{Attribute, AttributeSet, AttributeValue, RouteKind};
//!
//! let attrs: AttributeSet = [
//!     Attribute::new("get_mapping").with_value(AttributeValue::str("/orders/{id}")),
//!     Attribute::new("export"),
//! ]
//! .into_iter()
//! .collect();
//!
//! assert!(attrs.contains("export"));
//! assert_eq!(attrs.str_member("get_mapping", "value"), Some("/orders/{id}"));
//! assert_eq!(RouteKind::from_attribute_name("get_mapping"), Some(RouteKind::Get));
//! assert_eq!(attrs.get("get_mapping").unwrap().to_string(), r#"#[get_mapping("/orders/{id}")]"#);
//! ```

use std::fmt;

/// Well-known attribute and member names.
pub mod names {
    /// Extraction marker on a handler struct.
    pub const CLIENT_EXPORT: &str = "client_export";
    /// Export marker on a struct (all methods) or a single method.
    pub const EXPORT: &str = "export";
    /// REST-style controller marker.
    pub const REST_CONTROLLER: &str = "rest_controller";
    /// Plain controller marker; qualifies only together with [`RESPONSE_BODY`].
    pub const CONTROLLER: &str = "controller";
    /// Response-body marker.
    pub const RESPONSE_BODY: &str = "response_body";
    /// Supertype reference, `#[extends(path::To::Base)]`.
    pub const EXTENDS: &str = "extends";
    /// Generic route mapping; on a struct it is the route prefix.
    pub const REQUEST_MAPPING: &str = "request_mapping";
    /// Head attribute of a generated leaf interface.
    pub const REMOTE_CLIENT: &str = "remote_client";

    /// `client_export` member overriding the generated name.
    pub const EXTRACT_NAME_MEMBER: &str = "extract_name";
    /// `client_export` member naming the target package.
    pub const EXPORT_PACKAGE_MEMBER: &str = "export_package";
    /// Member holding positional arguments.
    pub const VALUE_MEMBER: &str = "value";
    /// `remote_client` member holding the remote-target name.
    pub const NAME_MEMBER: &str = "name";
    /// `remote_client` member holding the base path.
    pub const PATH_MEMBER: &str = "path";
}

/// Value of a single attribute member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// String literal
    Str(String),
    /// Integer literal
    Int(i64),
    /// Boolean literal
    Bool(bool),
    /// Array of values
    List(Vec<AttributeValue>),
    /// Any other expression, kept as source text
    Raw(String),
}

impl AttributeValue {
    /// Creates a string value.
    #[must_use]
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    /// Returns the string content if this is a string literal.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the first string of a list, or the string itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use client_export_core::AttributeValue;
    ///
    /// let list = AttributeValue::List(vec![AttributeValue::str("/a"), AttributeValue::str("/b")]);
    /// assert_eq!(list.first_str(), Some("/a"));
    /// assert_eq!(AttributeValue::str("/c").first_str(), Some("/c"));
    /// assert_eq!(AttributeValue::List(vec![]).first_str(), None);
    /// ```
    #[must_use]
    pub fn first_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::List(items) => items.first().and_then(Self::as_str),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Debug formatting of a str is a valid Rust string literal
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Raw(source) => f.write_str(source),
        }
    }
}

/// A named attribute with ordered members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    members: Vec<(String, AttributeValue)>,
}

impl Attribute {
    /// Creates an attribute with no members.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Sets a member, replacing an existing member of the same name in place.
    #[must_use]
    pub fn with_member(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.set_member(name, value);
        self
    }

    /// Sets the `value` member.
    #[must_use]
    pub fn with_value(self, value: AttributeValue) -> Self {
        self.with_member(names::VALUE_MEMBER, value)
    }

    /// Sets a member in place.
    pub fn set_member(&mut self, name: impl Into<String>, value: AttributeValue) {
        let name = name.into();
        if let Some(slot) = self.members.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.members.push((name, value));
        }
    }

    /// Attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in declaration order.
    #[must_use]
    pub fn members(&self) -> &[(String, AttributeValue)] {
        &self.members
    }

    /// Looks up a member by name.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&AttributeValue> {
        self.members
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Returns `true` if the member is present.
    #[must_use]
    pub fn has_member(&self, name: &str) -> bool {
        self.member(name).is_some()
    }

    /// Returns a string member.
    #[must_use]
    pub fn str_member(&self, name: &str) -> Option<&str> {
        self.member(name).and_then(AttributeValue::as_str)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#[{}", self.name)?;
        match self.members.as_slice() {
            [] => {}
            [(name, value)] if name == names::VALUE_MEMBER => write!(f, "({value})")?,
            members => {
                f.write_str("(")?;
                for (i, (name, value)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name} = {value}")?;
                }
                f.write_str(")")?;
            }
        }
        f.write_str("]")
    }
}

/// Ordered, read-only collection of attributes attached to one metadata node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet(Vec<Attribute>);

impl AttributeSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends an attribute.
    pub fn push(&mut self, attribute: Attribute) {
        self.0.push(attribute);
    }

    /// Returns the first attribute with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.0.iter().find(|a| a.name == name)
    }

    /// Returns `true` if an attribute with the given name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns a string member of the named attribute.
    #[must_use]
    pub fn str_member(&self, attribute: &str, member: &str) -> Option<&str> {
        self.get(attribute).and_then(|a| a.str_member(member))
    }

    /// Iterates attributes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.0.iter()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set holds no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Recognized route attribute kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    /// `get_mapping`
    Get,
    /// `post_mapping`
    Post,
    /// `put_mapping`
    Put,
    /// `delete_mapping`
    Delete,
    /// `patch_mapping`
    Patch,
    /// `request_mapping`
    Request,
}

impl RouteKind {
    /// All recognized route kinds.
    pub const ALL: [Self; 6] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Delete,
        Self::Patch,
        Self::Request,
    ];

    /// Attribute name of this route kind.
    #[must_use]
    pub const fn attribute_name(self) -> &'static str {
        match self {
            Self::Get => "get_mapping",
            Self::Post => "post_mapping",
            Self::Put => "put_mapping",
            Self::Delete => "delete_mapping",
            Self::Patch => "patch_mapping",
            Self::Request => names::REQUEST_MAPPING,
        }
    }

    /// Maps an attribute name to a route kind.
    #[must_use]
    pub fn from_attribute_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.attribute_name() == name)
    }
}

/// Recognized parameter binding kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// `request_header`
    Header,
    /// `request_param`
    Param,
    /// `request_body`
    Body,
    /// `path_variable`
    PathVariable,
    /// `model_attribute`
    ModelAttribute,
}

impl BindingKind {
    /// All recognized binding kinds.
    pub const ALL: [Self; 5] = [
        Self::Header,
        Self::Param,
        Self::Body,
        Self::PathVariable,
        Self::ModelAttribute,
    ];

    /// Attribute name of this binding kind.
    #[must_use]
    pub const fn attribute_name(self) -> &'static str {
        match self {
            Self::Header => "request_header",
            Self::Param => "request_param",
            Self::Body => "request_body",
            Self::PathVariable => "path_variable",
            Self::ModelAttribute => "model_attribute",
        }
    }

    /// Maps an attribute name to a binding kind.
    #[must_use]
    pub fn from_attribute_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.attribute_name() == name)
    }

    /// Client proxies cannot bind these by name-matching, so an explicit
    /// `value` member must be present on the generated side.
    #[must_use]
    pub const fn requires_explicit_value(self) -> bool {
        matches!(self, Self::Param | Self::PathVariable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_renders_bare() {
        assert_eq!(Attribute::new("request_body").to_string(), "#[request_body]");
    }

    #[test]
    fn test_single_value_uses_shorthand() {
        let attr = Attribute::new("get_mapping").with_value(AttributeValue::str("/test"));
        assert_eq!(attr.to_string(), r#"#[get_mapping("/test")]"#);
    }

    #[test]
    fn test_named_members_keep_order() {
        let attr = Attribute::new("request_param")
            .with_member("required", AttributeValue::Bool(false))
            .with_value(AttributeValue::str("q"));
        assert_eq!(
            attr.to_string(),
            r#"#[request_param(required = false, value = "q")]"#
        );
    }

    #[test]
    fn test_set_member_replaces_in_place() {
        let attr = Attribute::new("remote_client")
            .with_member("name", AttributeValue::str("a"))
            .with_member("path", AttributeValue::str("/x"))
            .with_member("name", AttributeValue::str("b"));
        assert_eq!(attr.members().len(), 2);
        assert_eq!(attr.str_member("name"), Some("b"));
        assert_eq!(attr.members()[0].0, "name");
    }

    #[test]
    fn test_list_and_raw_values_render() {
        let attr = Attribute::new("post_mapping")
            .with_member(
                "value",
                AttributeValue::List(vec![AttributeValue::str("/a"), AttributeValue::str("/b")]),
            )
            .with_member("consumes", AttributeValue::Raw("MediaType::JSON".to_string()))
            .with_member("timeout", AttributeValue::Int(30));
        assert_eq!(
            attr.to_string(),
            r#"#[post_mapping(value = ["/a", "/b"], consumes = MediaType::JSON, timeout = 30)]"#
        );
    }

    #[test]
    fn test_string_escaping() {
        let value = AttributeValue::str("say \"hi\"");
        assert_eq!(value.to_string(), r#""say \"hi\"""#);
    }

    #[test]
    fn test_attribute_set_lookup() {
        let attrs: AttributeSet = vec![
            Attribute::new("rest_controller"),
            Attribute::new("client_export")
                .with_member("export_package", AttributeValue::str("com.example.external")),
        ]
        .into_iter()
        .collect();

        assert_eq!(attrs.len(), 2);
        assert!(attrs.contains("rest_controller"));
        assert!(!attrs.contains("controller"));
        assert_eq!(
            attrs.str_member("client_export", "export_package"),
            Some("com.example.external")
        );
        assert_eq!(attrs.str_member("client_export", "extract_name"), None);
    }

    #[test]
    fn test_route_kind_names_round_trip() {
        for kind in RouteKind::ALL {
            assert_eq!(RouteKind::from_attribute_name(kind.attribute_name()), Some(kind));
        }
        assert_eq!(RouteKind::from_attribute_name("cache_control"), None);
    }

    #[test]
    fn test_binding_kinds_requiring_value() {
        assert!(BindingKind::Param.requires_explicit_value());
        assert!(BindingKind::PathVariable.requires_explicit_value());
        assert!(!BindingKind::Header.requires_explicit_value());
        assert!(!BindingKind::Body.requires_explicit_value());
        assert!(!BindingKind::ModelAttribute.requires_explicit_value());
    }
}
