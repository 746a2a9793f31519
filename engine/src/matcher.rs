//! Picks the template members to implement and the declarations backing them.

use aptgen_decl::prelude::list_of_string;
use aptgen_decl::utils::qualify;
use aptgen_decl::{DeclId, DeclarationQuery, MemberKind, TypeKind, TypeRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleMember {
    pub name: String,
    pub return_type: TypeRef,
    pub is_abstract: bool,
    /// `package.name`, the declaration this member is generated from
    pub source_name: String,
}

/// Zero-argument methods returning something assignable to
/// `java.util.List<java.lang.String>`, in template declaration order.
///
/// Non-abstract members are kept with `is_abstract == false`; callers decide
/// whether to skip them.
pub fn match_members<Q: DeclarationQuery + ?Sized>(query: &Q, template: &DeclId) -> Vec<EligibleMember> {
    let package = query.package_of(template).unwrap_or_default();
    let target = list_of_string();

    query
        .members_of(template)
        .into_iter()
        .filter(|m| m.kind == MemberKind::Method)
        .filter(|m| m.param_count == 0)
        .filter(|m| query.is_assignable(&m.return_type, &target))
        .filter(|m| m.return_kind == TypeKind::Declared)
        .map(|m| {
            tracing::trace!(template = %template, member = %m.name, "eligible member");
            EligibleMember {
                source_name: qualify(package, &m.name),
                name: m.name,
                return_type: m.return_type,
                is_abstract: m.is_abstract,
            }
        })
        .collect()
}
