//! End-to-end tests for client-export-codegen.
//!
//! Builds registries with the metadata builders, plans every target, and
//! renders both interfaces.

use client_export_codegen::{HandlebarsRenderer, InterfaceRenderer, plan_round};
use client_export_core::{
    Attribute, AttributeValue, CandidateType, MethodDescriptor, ParameterDescriptor, Supertype,
    TypeKind, TypeRegistry,
};

fn marker(package: &str) -> Attribute {
    Attribute::new("client_export").with_member("export_package", AttributeValue::str(package))
}

fn route(kind: &str, path: &str) -> Attribute {
    Attribute::new(kind).with_value(AttributeValue::str(path))
}

#[test]
fn test_minimal_controller_renders_base_and_leaf() {
    let mut registry = TypeRegistry::new();
    registry.insert(
        CandidateType::builder("web::TestController", TypeKind::Struct)
            .attribute(Attribute::new("rest_controller"))
            .attribute(marker("com.example.external"))
            .method(
                MethodDescriptor::new("test")
                    .with_attribute(Attribute::new("export"))
                    .with_attribute(route("get_mapping", "/test"))
                    .returns("String"),
            )
            .build(),
    );

    let plans = plan_round(&registry).unwrap();
    assert_eq!(plans.len(), 1);

    let renderer = HandlebarsRenderer::new().unwrap();
    let base = renderer.render(plans[0].base()).unwrap();
    let leaf = renderer.render(&plans[0].leaf("test-app")).unwrap();

    assert!(base.contains("pub trait TestClientBase {"));
    assert!(base.contains("    #[get_mapping(\"/test\")]\n    fn test(&self) -> String;"));

    assert!(leaf.contains("use crate::com::example::external::base::TestClientBase;"));
    assert!(leaf.contains("#[remote_client(name = \"test-app\")]"));
    assert!(leaf.contains("pub trait TestClient: TestClientBase {}"));
}

#[test]
fn test_inherited_routes_and_bindings() {
    let mut registry = TypeRegistry::new();
    registry.insert(
        CandidateType::builder("web::CrudController", TypeKind::Trait)
            .method(
                MethodDescriptor::new("find")
                    .with_parameter(
                        ParameterDescriptor::new("id", "u64")
                            .with_attribute(Attribute::new("path_variable")),
                    )
                    .with_attribute(route("get_mapping", "/{id}"))
                    .returns("Order"),
            )
            .method(
                MethodDescriptor::new("delete")
                    .with_parameter(
                        ParameterDescriptor::new("id", "u64")
                            .with_attribute(Attribute::new("path_variable")),
                    )
                    .with_attribute(route("delete_mapping", "/{id}")),
            )
            .build(),
    );
    registry.insert(
        CandidateType::builder("web::OrderController", TypeKind::Struct)
            .supertype(Supertype::named("CrudController"))
            .attribute(Attribute::new("controller"))
            .attribute(Attribute::new("response_body"))
            .attribute(Attribute::new("export"))
            .attribute(marker("clients"))
            .attribute(route("request_mapping", "/orders"))
            .method(
                MethodDescriptor::new("search")
                    .with_parameter(
                        ParameterDescriptor::new("q", "String")
                            .with_attribute(Attribute::new("request_param")),
                    )
                    .with_parameter(
                        ParameterDescriptor::new("token", "String")
                            .with_attribute(Attribute::new("request_header")),
                    )
                    .with_attribute(route("get_mapping", "/search"))
                    .returns("Vec<Order>"),
            )
            .build(),
    );

    let plans = plan_round(&registry).unwrap();
    let plan = &plans[0];
    assert_eq!(plan.method_count(), 3);

    let base = HandlebarsRenderer::new().unwrap().render(plan.base()).unwrap();
    let search = base.find("fn search").unwrap();
    let find = base.find("fn find").unwrap();
    let delete = base.find("fn delete").unwrap();
    assert!(search < find && find < delete);

    assert!(base.contains(
        "fn search(&self, #[request_param(\"q\")] q: String, #[request_header] token: String) -> Vec<Order>;"
    ));
    assert!(base.contains("fn delete(&self, #[path_variable(\"id\")] id: u64);"));

    let leaf = HandlebarsRenderer::new()
        .unwrap()
        .render(&plan.leaf("orders"))
        .unwrap();
    assert!(leaf.contains("#[remote_client(name = \"orders\", path = \"/orders\")]"));
}

#[test]
fn test_missing_package_fails_round() {
    let mut registry = TypeRegistry::new();
    registry.insert(
        CandidateType::builder("web::OrderController", TypeKind::Struct)
            .attribute(Attribute::new("rest_controller"))
            .attribute(Attribute::new("client_export"))
            .build(),
    );

    let err = plan_round(&registry).unwrap_err();
    assert!(err.is_metadata_inconsistency());
}

#[test]
fn test_rendering_is_deterministic() {
    let mut registry = TypeRegistry::new();
    registry.insert(
        CandidateType::builder("Reports", TypeKind::Struct)
            .attribute(Attribute::new("rest_controller"))
            .attribute(Attribute::new("export"))
            .attribute(marker("clients"))
            .method(MethodDescriptor::new("daily").with_attribute(route("get_mapping", "/daily")))
            .method(MethodDescriptor::new("weekly").with_attribute(route("get_mapping", "/weekly")))
            .build(),
    );

    let renderer = HandlebarsRenderer::new().unwrap();
    let first = renderer.render(plan_round(&registry).unwrap()[0].base()).unwrap();
    let second = renderer.render(plan_round(&registry).unwrap()[0].base()).unwrap();
    assert_eq!(first, second);
    assert!(first.contains("pub trait ReportsClientBase {"));
}
