//! Error types for declaration graph loading

/// Structured error type for building a declaration graph.
#[derive(Debug, Clone)]
pub enum DeclError {
    ParseError { path: String, source: String },
    Duplicate { qualified_name: String },
}

impl std::fmt::Display for DeclError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclError::ParseError { path, source } => {
                write!(f, "Parse error in {}: {}", path, source)
            }
            DeclError::Duplicate { qualified_name } => {
                write!(f, "Duplicate declaration: {}", qualified_name)
            }
        }
    }
}

impl std::error::Error for DeclError {}
