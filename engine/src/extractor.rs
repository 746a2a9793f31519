//! Structural facts pulled from source declarations.

use crate::config::LookupPolicy;
use crate::error::{GenerateError, Result};
use aptgen_decl::utils::split_qualified;
use aptgen_decl::{suggest_similar, DeclId, DeclarationQuery, MemberKind};

const MAX_SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The declaration the names came from; `None` when the name did not resolve.
    pub source: Option<DeclId>,
    pub names: Vec<String>,
}

/// Method names declared directly by the declaration at `qualified_name`,
/// in declaration order.
///
/// An unresolved name yields an empty list under [`LookupPolicy::Lenient`]
/// and an error under [`LookupPolicy::Strict`].
pub fn extract_member_names<Q: DeclarationQuery + ?Sized>(
    query: &Q,
    template: &DeclId,
    member: &str,
    qualified_name: &str,
    policy: LookupPolicy,
) -> Result<Extraction> {
    let Some(source) = query.lookup_declaration(qualified_name) else {
        return match policy {
            LookupPolicy::Lenient => {
                tracing::warn!(
                    template = %template,
                    member,
                    qualified_name,
                    "source declaration not found, generating an empty list"
                );
                Ok(Extraction {
                    source: None,
                    names: Vec::new(),
                })
            }
            LookupPolicy::Strict => Err(GenerateError::UnresolvedSource {
                template: template.clone(),
                member: member.to_string(),
                qualified_name: qualified_name.to_string(),
                suggestion: nearest_name(query, qualified_name),
            }),
        };
    };

    let names = query
        .members_of(&source)
        .into_iter()
        .filter(|m| m.kind == MemberKind::Method)
        .map(|m| m.name)
        .collect();

    Ok(Extraction {
        source: Some(source),
        names,
    })
}

fn nearest_name<Q: DeclarationQuery + ?Sized>(query: &Q, qualified_name: &str) -> Option<String> {
    let (package, simple) = split_qualified(qualified_name);
    let ids = query.declarations_in(package);
    let candidates: Vec<&str> = ids.iter().filter_map(|id| query.simple_name(id)).collect();
    suggest_similar(simple, &candidates, MAX_SUGGESTION_DISTANCE)
        .into_iter()
        .next()
        .map(|s| s.candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aptgen_decl::{
        DeclKind, Declaration, DeclarationGraph, GraphDocument, Member, PackageDecl, TypeRef,
    };

    fn graph() -> DeclarationGraph {
        DeclarationGraph::new(GraphDocument {
            packages: vec![PackageDecl {
                name: "app".to_string(),
                declarations: vec![Declaration::new("Thing1", DeclKind::Class)
                    .with_member(Member::method("x", TypeRef::void()))
                    .with_member(Member::field("count", TypeRef::simple("int")))
                    .with_member(Member::method("y", TypeRef::simple("int")))
                    .with_member(Member::method("x", TypeRef::void()).with_param("n", TypeRef::simple("int")))],
            }],
        })
        .unwrap()
    }

    #[test]
    fn test_extracts_method_names_in_order() {
        let graph = graph();
        let template = DeclId::new("app.App");
        let extraction =
            extract_member_names(&graph, &template, "Thing1", "app.Thing1", LookupPolicy::Lenient)
                .unwrap();
        assert_eq!(extraction.source, Some(DeclId::new("app.Thing1")));
        assert_eq!(extraction.names, vec!["x", "y", "x"]);
    }

    #[test]
    fn test_lenient_unresolved_is_empty() {
        let graph = graph();
        let template = DeclId::new("app.App");
        let extraction =
            extract_member_names(&graph, &template, "Thing9", "app.Thing9", LookupPolicy::Lenient)
                .unwrap();
        assert_eq!(extraction.source, None);
        assert!(extraction.names.is_empty());
    }

    #[test]
    fn test_strict_unresolved_fails_with_suggestion() {
        let graph = graph();
        let template = DeclId::new("app.App");
        let err =
            extract_member_names(&graph, &template, "Thing9", "app.Thing9", LookupPolicy::Strict)
                .unwrap_err();
        match err {
            GenerateError::UnresolvedSource {
                qualified_name,
                suggestion,
                ..
            } => {
                assert_eq!(qualified_name, "app.Thing9");
                assert_eq!(suggestion.as_deref(), Some("Thing1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
