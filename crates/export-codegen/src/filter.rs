//! Qualification predicates.
//!
//! Decides which types are extraction targets and, within a target's
//! ancestry, which methods are exported. Both predicates are pure.

use client_export_core::{CandidateType, MethodDescriptor, RouteKind, TypeKind, names};

/// Returns `true` if `ty` should produce client interfaces.
///
/// A target is a struct carrying `client_export` that is recognized as a
/// request handler: either `rest_controller`, or `controller` combined with
/// `response_body`.
///
/// # Examples
///
/// ```
/// use client_export_codegen::filter::is_extraction_target;
/// use client_export_core::{Attribute, CandidateType, TypeKind};
///
/// let ty = CandidateType::builder("api::OrderController", TypeKind::Struct)
///     .attribute(Attribute::new("rest_controller"))
///     .attribute(Attribute::new("client_export"))
///     .build();
/// assert!(is_extraction_target(&ty));
/// ```
#[must_use]
pub fn is_extraction_target(ty: &CandidateType) -> bool {
    let attrs = ty.attributes();
    let is_handler = attrs.contains(names::REST_CONTROLLER)
        || (attrs.contains(names::CONTROLLER) && attrs.contains(names::RESPONSE_BODY));

    ty.kind() == TypeKind::Struct && attrs.contains(names::CLIENT_EXPORT) && is_handler
}

/// Returns `true` if the method carries at least one recognized route attribute.
#[must_use]
pub fn has_route_attribute(method: &MethodDescriptor) -> bool {
    method
        .attributes()
        .iter()
        .any(|a| RouteKind::from_attribute_name(a.name()).is_some())
}

/// Returns `true` if `method` belongs in the generated interface.
///
/// Requires a recognized route attribute, and either the blanket export flag
/// of the target type or an individual `export` marker on the method.
#[must_use]
pub fn is_extraction_candidate_method(method: &MethodDescriptor, export_all: bool) -> bool {
    has_route_attribute(method) && (export_all || method.attributes().contains(names::EXPORT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_export_core::{Attribute, AttributeValue};

    fn handler(markers: &[&str], kind: TypeKind) -> CandidateType {
        markers
            .iter()
            .fold(CandidateType::builder("api::Handler", kind), |b, m| {
                b.attribute(Attribute::new(*m))
            })
            .build()
    }

    fn get(path: &str) -> Attribute {
        Attribute::new("get_mapping").with_value(AttributeValue::str(path))
    }

    #[test]
    fn test_rest_controller_with_marker_qualifies() {
        let ty = handler(&["rest_controller", "client_export"], TypeKind::Struct);
        assert!(is_extraction_target(&ty));
    }

    #[test]
    fn test_controller_needs_response_body() {
        let plain = handler(&["controller", "client_export"], TypeKind::Struct);
        assert!(!is_extraction_target(&plain));

        let with_body = handler(
            &["controller", "response_body", "client_export"],
            TypeKind::Struct,
        );
        assert!(is_extraction_target(&with_body));
    }

    #[test]
    fn test_missing_extraction_marker() {
        let ty = handler(&["rest_controller"], TypeKind::Struct);
        assert!(!is_extraction_target(&ty));
    }

    #[test]
    fn test_traits_never_qualify() {
        let ty = handler(&["rest_controller", "client_export"], TypeKind::Trait);
        assert!(!is_extraction_target(&ty));
    }

    #[test]
    fn test_export_all_accepts_any_routed_method() {
        let method = MethodDescriptor::new("list").with_attribute(get("/"));
        assert!(is_extraction_candidate_method(&method, true));
        assert!(!is_extraction_candidate_method(&method, false));
    }

    #[test]
    fn test_individual_marker_without_export_all() {
        let method = MethodDescriptor::new("list")
            .with_attribute(Attribute::new("export"))
            .with_attribute(get("/"));
        assert!(is_extraction_candidate_method(&method, false));
    }

    #[test]
    fn test_unrouted_method_never_qualifies() {
        let method = MethodDescriptor::new("helper")
            .with_attribute(Attribute::new("export"))
            .with_attribute(Attribute::new("inline"));
        assert!(!has_route_attribute(&method));
        assert!(!is_extraction_candidate_method(&method, true));
    }

    #[test]
    fn test_every_route_kind_is_recognized() {
        for kind in RouteKind::ALL {
            let method =
                MethodDescriptor::new("m").with_attribute(Attribute::new(kind.attribute_name()));
            assert!(has_route_attribute(&method), "{kind:?} not recognized");
        }
    }
}
