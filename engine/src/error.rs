use aptgen_decl::DeclId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Template {0} is not a known declaration")]
    UnknownTemplate(DeclId),

    #[error("{template}.{member}(): no declaration named {qualified_name}{}", suggestion_suffix(.suggestion))]
    UnresolvedSource {
        template: DeclId,
        member: String,
        qualified_name: String,
        suggestion: Option<String>,
    },

    #[error("Failed to write {unit}: {source}")]
    Io {
        unit: String,
        #[source]
        source: std::io::Error,
    },
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean {}?)", name),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;
