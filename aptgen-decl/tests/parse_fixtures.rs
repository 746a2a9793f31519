use aptgen_decl::parse::{load_graph, parse_graph_file};
use aptgen_decl::prelude::list_of_string;
use aptgen_decl::{DeclId, DeclarationQuery, RoundEnvironment, TypeKind, TypeRef};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_parse_app_fixture() {
    let doc = parse_graph_file(fixture_path("app.json")).expect("should parse app.json");
    assert_eq!(doc.packages.len(), 1);
    assert_eq!(
        doc.packages[0].declarations.len(),
        3,
        "app should declare App, Thing1 and Thing2"
    );
}

#[test]
fn test_app_fixture_queries() {
    let graph = load_graph(fixture_path("app.json")).expect("should load app.json");
    let templates = graph.elements_annotated_with("aptgen.annotation.Sample");
    assert_eq!(templates, vec![DeclId::new("app.App")]);

    let members = graph.members_of(&templates[0]);
    let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Thing1", "Thing2", "main"]);
    assert!(members[0].is_abstract);
    assert!(!members[2].is_abstract);
    assert_eq!(members[2].param_count, 1);
}

#[test]
fn test_generic_fixture_assignability() {
    let graph = load_graph(fixture_path("generic.json")).expect("should load generic.json");

    assert!(graph.is_assignable(&TypeRef::simple("com.example.model.Names"), &list_of_string()));
    assert!(graph.is_assignable(
        &TypeRef::declared(
            "com.example.model.Box",
            vec![TypeRef::simple("java.lang.String")]
        ),
        &list_of_string()
    ));
    assert!(!graph.is_assignable(
        &TypeRef::declared(
            "com.example.model.Box",
            vec![TypeRef::simple("java.lang.Integer")]
        ),
        &list_of_string()
    ));

    let peek = &graph.members_of(&DeclId::new("com.example.model.Box"))[0];
    assert_eq!(peek.return_kind, TypeKind::TypeVariable);
}
