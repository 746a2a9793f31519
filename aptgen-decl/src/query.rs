//! Read-only query facade over a host declaration graph

use crate::types::{MemberKind, TypeKind, TypeRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle for a declaration: its fully-qualified name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclId(String);

impl DeclId {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self(qualified_name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the generator needs to know about one member of a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    pub name: String,
    pub kind: MemberKind,
    pub param_count: usize,
    pub return_type: TypeRef,
    pub return_kind: TypeKind,
    pub is_abstract: bool,
}

/// Queries the generator issues against the host's symbol table.
///
/// Implementations must never mutate the graph in response to a query.
pub trait DeclarationQuery {
    fn simple_name(&self, decl: &DeclId) -> Option<&str>;

    fn package_of(&self, decl: &DeclId) -> Option<&str>;

    /// Members in declaration order; empty for unknown declarations.
    fn members_of(&self, decl: &DeclId) -> Vec<MemberDescriptor>;

    fn lookup_declaration(&self, qualified_name: &str) -> Option<DeclId>;

    fn is_assignable(&self, from: &TypeRef, to: &TypeRef) -> bool;

    /// Declarations directly inside a package, in declaration order.
    fn declarations_in(&self, package: &str) -> Vec<DeclId>;
}

/// The declarations the host presents for one round.
pub trait RoundEnvironment {
    fn elements_annotated_with(&self, annotation: &str) -> Vec<DeclId>;
}
