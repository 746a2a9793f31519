//! In-memory declaration graph backing the query facade

use crate::error::DeclError;
use crate::prelude::{library_packages, OBJECT};
use crate::query::{DeclId, DeclarationQuery, MemberDescriptor, RoundEnvironment};
use crate::types::{DeclKind, Declaration, GraphDocument, MemberKind, Modifier, TypeRef};
use crate::utils::qualify;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
struct Entry {
    id: DeclId,
    package: String,
    decl: Declaration,
    library: bool,
}

/// Declarations indexed by qualified name, in document order followed by
/// the library prelude.
#[derive(Debug, Clone, Default)]
pub struct DeclarationGraph {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl DeclarationGraph {
    pub fn new(document: GraphDocument) -> Result<Self, DeclError> {
        let mut graph = Self::default();

        for package in document.packages {
            for decl in package.declarations {
                graph.insert(&package.name, decl, false)?;
            }
        }

        for package in library_packages() {
            for decl in package.declarations {
                if graph.index.contains_key(&qualify(&package.name, &decl.name)) {
                    continue;
                }
                graph.insert(&package.name, decl, true)?;
            }
        }

        tracing::debug!(
            declarations = graph.entries.len(),
            "built declaration graph"
        );
        Ok(graph)
    }

    fn insert(&mut self, package: &str, decl: Declaration, library: bool) -> Result<(), DeclError> {
        let qualified_name = qualify(package, &decl.name);
        if self.index.contains_key(&qualified_name) {
            return Err(DeclError::Duplicate { qualified_name });
        }
        self.index.insert(qualified_name.clone(), self.entries.len());
        self.entries.push(Entry {
            id: DeclId::new(qualified_name),
            package: package.to_string(),
            decl,
            library,
        });
        Ok(())
    }

    fn entry(&self, id: &DeclId) -> Option<&Entry> {
        self.entry_by_name(id.as_str())
    }

    fn entry_by_name(&self, qualified_name: &str) -> Option<&Entry> {
        self.index.get(qualified_name).map(|&i| &self.entries[i])
    }

    /// Declarations that came from the document rather than the prelude.
    pub fn document_declarations(&self) -> impl Iterator<Item = &DeclId> {
        self.entries.iter().filter(|e| !e.library).map(|e| &e.id)
    }

    /// Hex SHA-256 over the declaration's package and canonical JSON form.
    /// Any edit to the declaration or its members changes the fingerprint.
    pub fn fingerprint(&self, id: &DeclId) -> Option<String> {
        let entry = self.entry(id)?;
        let body = serde_json::to_vec(&entry.decl).ok()?;
        let mut hasher = Sha256::new();
        hasher.update(entry.package.as_bytes());
        hasher.update([0u8]);
        hasher.update(&body);
        Some(hex::encode(hasher.finalize()))
    }

    fn reaches(&self, current: &TypeRef, target: &TypeRef, seen: &mut HashSet<String>) -> bool {
        if current.same_type(target) {
            return true;
        }
        let Some(name) = current.declared_name() else {
            return false;
        };
        if current.is_raw() && target.declared_name() == Some(name) {
            // unchecked conversion from a raw type
            return true;
        }
        if !seen.insert(current.to_string()) {
            return false;
        }
        let Some(entry) = self.entry_by_name(name) else {
            return false;
        };

        let raw = current.is_raw() && !entry.decl.type_params.is_empty();
        let bindings: Vec<(String, TypeRef)> = entry
            .decl
            .type_params
            .iter()
            .cloned()
            .zip(current.type_args().iter().cloned())
            .collect();

        entry.decl.supertypes.iter().any(|supertype| {
            let next = if raw {
                supertype.erasure()
            } else {
                supertype.substitute(&bindings)
            };
            self.reaches(&next, target, seen)
        })
    }
}

fn is_abstract(kind: DeclKind, member_kind: MemberKind, modifiers: &[Modifier]) -> bool {
    if member_kind != MemberKind::Method {
        return false;
    }
    if modifiers.contains(&Modifier::Abstract) {
        return true;
    }
    kind == DeclKind::Interface
        && !modifiers
            .iter()
            .any(|m| matches!(m, Modifier::Default | Modifier::Static | Modifier::Private))
}

impl DeclarationQuery for DeclarationGraph {
    fn simple_name(&self, decl: &DeclId) -> Option<&str> {
        self.entry(decl).map(|e| e.decl.name.as_str())
    }

    fn package_of(&self, decl: &DeclId) -> Option<&str> {
        self.entry(decl).map(|e| e.package.as_str())
    }

    fn members_of(&self, decl: &DeclId) -> Vec<MemberDescriptor> {
        let Some(entry) = self.entry(decl) else {
            return Vec::new();
        };
        entry
            .decl
            .members
            .iter()
            .map(|m| MemberDescriptor {
                name: m.name.clone(),
                kind: m.kind,
                param_count: m.params.len(),
                return_type: m.return_type.clone(),
                return_kind: m.return_type.kind_in(&entry.decl.type_params),
                is_abstract: is_abstract(entry.decl.kind, m.kind, &m.modifiers),
            })
            .collect()
    }

    fn lookup_declaration(&self, qualified_name: &str) -> Option<DeclId> {
        self.entry_by_name(qualified_name).map(|e| e.id.clone())
    }

    fn is_assignable(&self, from: &TypeRef, to: &TypeRef) -> bool {
        if from.same_type(to) {
            return true;
        }
        if from.is_primitive() || from.is_void() || to.is_primitive() || to.is_void() {
            return false;
        }
        if to.same_type(&TypeRef::simple(OBJECT)) {
            return true;
        }
        self.reaches(from, to, &mut HashSet::new())
    }

    fn declarations_in(&self, package: &str) -> Vec<DeclId> {
        self.entries
            .iter()
            .filter(|e| e.package == package)
            .map(|e| e.id.clone())
            .collect()
    }
}

impl RoundEnvironment for DeclarationGraph {
    fn elements_annotated_with(&self, annotation: &str) -> Vec<DeclId> {
        self.entries
            .iter()
            .filter(|e| !e.library && e.decl.has_annotation(annotation))
            .map(|e| e.id.clone())
            .collect()
    }
}
