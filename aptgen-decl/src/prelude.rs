//! Library declarations every graph can rely on

use crate::types::{DeclKind, Declaration, Member, Modifier, PackageDecl, TypeRef};

pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";
pub const LIST: &str = "java.util.List";

fn collection_of(name: &str) -> TypeRef {
    TypeRef::declared(name, vec![TypeRef::simple("E")])
}

/// The library packages merged into every graph unless the document
/// declares the same names itself.
pub fn library_packages() -> Vec<PackageDecl> {
    let abstract_method = |name: &str, ret: TypeRef| {
        Member::method(name, ret)
            .with_modifier(Modifier::Public)
            .with_modifier(Modifier::Abstract)
    };

    vec![
        PackageDecl {
            name: "java.lang".to_string(),
            declarations: vec![
                Declaration::new("Object", DeclKind::Class),
                Declaration::new("String", DeclKind::Class)
                    .with_supertype(TypeRef::simple(OBJECT))
                    .with_member(Member::method("length", TypeRef::simple("int"))),
                Declaration::new("Integer", DeclKind::Class)
                    .with_supertype(TypeRef::simple(OBJECT))
                    .with_member(Member::method("intValue", TypeRef::simple("int"))),
            ],
        },
        PackageDecl {
            name: "java.util".to_string(),
            declarations: vec![
                Declaration::new("Collection", DeclKind::Interface)
                    .with_type_params(&["E"])
                    .with_member(abstract_method("size", TypeRef::simple("int"))),
                Declaration::new("List", DeclKind::Interface)
                    .with_type_params(&["E"])
                    .with_supertype(collection_of("java.util.Collection"))
                    .with_member(
                        abstract_method("get", TypeRef::simple("E"))
                            .with_param("index", TypeRef::simple("int")),
                    ),
                Declaration::new("ArrayList", DeclKind::Class)
                    .with_type_params(&["E"])
                    .with_supertype(TypeRef::simple(OBJECT))
                    .with_supertype(collection_of(LIST)),
                Declaration::new("LinkedList", DeclKind::Class)
                    .with_type_params(&["E"])
                    .with_supertype(TypeRef::simple(OBJECT))
                    .with_supertype(collection_of(LIST)),
            ],
        },
    ]
}

/// `java.util.List<java.lang.String>`, the only return shape the generator implements.
pub fn list_of_string() -> TypeRef {
    TypeRef::declared(LIST, vec![TypeRef::simple(STRING)])
}
