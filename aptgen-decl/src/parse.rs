//! Declaration graph parsing utilities

use crate::error::DeclError;
use crate::graph::DeclarationGraph;
use crate::types::GraphDocument;
use std::fs;
use std::path::Path;

pub fn parse_graph_file<P: AsRef<Path>>(path: P) -> Result<GraphDocument, DeclError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| DeclError::ParseError {
        path: path.display().to_string(),
        source: format!("failed to read file: {}", e),
    })?;

    parse_graph_content(&content).map_err(|e| match e {
        DeclError::ParseError { source, .. } => DeclError::ParseError {
            path: path.display().to_string(),
            source,
        },
        other => other,
    })
}

pub fn parse_graph_content(content: &str) -> Result<GraphDocument, DeclError> {
    serde_json::from_str(content).map_err(|e| DeclError::ParseError {
        path: "<inline>".to_string(),
        source: e.to_string(),
    })
}

/// Parse a graph document from disk and index it.
pub fn load_graph<P: AsRef<Path>>(path: P) -> Result<DeclarationGraph, DeclError> {
    DeclarationGraph::new(parse_graph_file(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{DeclarationQuery, RoundEnvironment};
    use crate::types::{DeclKind, Modifier};

    #[test]
    fn test_parse_minimal_document() {
        let json = r#"{
            "packages": [
                {
                    "name": "app",
                    "declarations": [
                        {
                            "name": "App",
                            "kind": "interface",
                            "annotations": ["aptgen.annotation.Sample"],
                            "members": [
                                {
                                    "name": "Thing1",
                                    "returnType": { "declared": "java.util.List", "args": ["java.lang.String"] }
                                },
                                {
                                    "name": "main",
                                    "modifiers": ["public", "static"],
                                    "params": [{ "name": "args", "type": { "array": "java.lang.String" } }]
                                }
                            ]
                        },
                        { "name": "Thing1", "members": [{ "name": "x" }, { "name": "y" }] }
                    ]
                }
            ]
        }"#;
        let doc = parse_graph_content(json).expect("document should parse");
        let app = &doc.packages[0].declarations[0];
        assert_eq!(app.kind, DeclKind::Interface);
        assert_eq!(app.members[1].modifiers, vec![Modifier::Public, Modifier::Static]);
        assert_eq!(app.members[1].params.len(), 1);

        let graph = DeclarationGraph::new(doc).unwrap();
        let templates = graph.elements_annotated_with("aptgen.annotation.Sample");
        assert_eq!(templates.len(), 1);
        assert_eq!(graph.members_of(&templates[0]).len(), 2);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = parse_graph_content("{ \"packages\": 3 }").unwrap_err();
        assert!(matches!(err, DeclError::ParseError { .. }));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = parse_graph_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_empty_document_has_only_library() {
        let graph = DeclarationGraph::new(parse_graph_content("{}").unwrap()).unwrap();
        assert_eq!(graph.document_declarations().count(), 0);
        assert!(graph.lookup_declaration("java.lang.String").is_some());
    }
}
