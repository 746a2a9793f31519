//! Core type definitions for declaration graphs

use serde::{Deserialize, Serialize};
use std::fmt;

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "short", "int", "long", "char", "float", "double",
];

/// A whole compilation unit as handed over by the host: packages and the
/// declarations they contain, already parsed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDocument {
    #[serde(default)]
    pub packages: Vec<PackageDecl>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDecl {
    /// Qualified package name, empty for the default package
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    pub name: String,
    #[serde(default)]
    pub kind: DeclKind,
    /// Fully-qualified names of the annotations present on the declaration
    #[serde(default)]
    pub annotations: Vec<String>,
    #[serde(default)]
    pub type_params: Vec<String>,
    /// Direct supertypes (superclass and implemented/extended interfaces)
    #[serde(default)]
    pub supertypes: Vec<TypeRef>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, kind: DeclKind) -> Self {
        Self {
            name: name.into(),
            kind,
            annotations: Vec::new(),
            type_params: Vec::new(),
            supertypes: Vec::new(),
            modifiers: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn with_type_params(mut self, params: &[&str]) -> Self {
        self.type_params = params.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_supertype(mut self, supertype: TypeRef) -> Self {
        self.supertypes.push(supertype);
        self
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn has_annotation(&self, annotation: &str) -> bool {
        self.annotations.iter().any(|a| a == annotation)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    #[default]
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    #[default]
    Method,
    Field,
    Constructor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
    Default,
    Synchronized,
    Native,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub name: String,
    #[serde(default)]
    pub kind: MemberKind,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default = "TypeRef::void")]
    pub return_type: TypeRef,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl Member {
    pub fn method(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Method,
            params: Vec::new(),
            return_type,
            modifiers: Vec::new(),
        }
    }

    pub fn field(name: impl Into<String>, type_: TypeRef) -> Self {
        Self {
            kind: MemberKind::Field,
            ..Self::method(name, type_)
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, type_: TypeRef) -> Self {
        self.params.push(Param {
            name: name.into(),
            type_,
        });
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: TypeRef,
}

/// A type as written in a declaration.
///
/// Plain strings cover primitives, type variables and raw declared types;
/// which of those a string denotes depends on the enclosing declaration's
/// type parameters, see [`TypeRef::kind_in`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TypeRef {
    Simple(String),
    Declared(DeclaredType),
    Array(ArrayType),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct DeclaredType {
    pub declared: String,
    #[serde(default)]
    pub args: Vec<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ArrayType {
    pub array: Box<TypeRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Void,
    Primitive,
    TypeVariable,
    Declared,
    Array,
}

impl TypeRef {
    pub fn void() -> Self {
        TypeRef::Simple("void".to_string())
    }

    pub fn simple(name: impl Into<String>) -> Self {
        TypeRef::Simple(name.into())
    }

    pub fn declared(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Declared(DeclaredType {
            declared: name.into(),
            args,
        })
    }

    pub fn array_of(element: TypeRef) -> Self {
        TypeRef::Array(ArrayType {
            array: Box::new(element),
        })
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Simple(s) if PRIMITIVES.contains(&s.as_str()))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Simple(s) if s == "void")
    }

    /// Classify this type relative to the type parameters in scope.
    pub fn kind_in(&self, type_params: &[String]) -> TypeKind {
        match self {
            TypeRef::Simple(s) if s == "void" => TypeKind::Void,
            TypeRef::Simple(_) if self.is_primitive() => TypeKind::Primitive,
            TypeRef::Simple(s) if type_params.iter().any(|p| p == s) => TypeKind::TypeVariable,
            TypeRef::Simple(_) | TypeRef::Declared(_) => TypeKind::Declared,
            TypeRef::Array(_) => TypeKind::Array,
        }
    }

    /// The qualified name of the declaration this type refers to, if nominal.
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            TypeRef::Simple(s) if !self.is_primitive() && !self.is_void() => Some(s),
            TypeRef::Declared(d) => Some(&d.declared),
            _ => None,
        }
    }

    pub fn type_args(&self) -> &[TypeRef] {
        match self {
            TypeRef::Declared(d) => &d.args,
            _ => &[],
        }
    }

    pub fn is_raw(&self) -> bool {
        self.declared_name().is_some() && self.type_args().is_empty()
    }

    pub fn erasure(&self) -> TypeRef {
        match self {
            TypeRef::Declared(d) => TypeRef::Simple(d.declared.clone()),
            TypeRef::Array(a) => TypeRef::array_of(a.array.erasure()),
            TypeRef::Simple(_) => self.clone(),
        }
    }

    /// Replace type variables by their bindings.
    pub fn substitute(&self, bindings: &[(String, TypeRef)]) -> TypeRef {
        match self {
            TypeRef::Simple(s) => bindings
                .iter()
                .find(|(var, _)| var == s)
                .map(|(_, bound)| bound.clone())
                .unwrap_or_else(|| self.clone()),
            TypeRef::Declared(d) => TypeRef::declared(
                d.declared.clone(),
                d.args.iter().map(|a| a.substitute(bindings)).collect(),
            ),
            TypeRef::Array(a) => TypeRef::array_of(a.array.substitute(bindings)),
        }
    }

    /// Structural identity that treats `{"declared": "X"}` and `"X"` alike.
    pub fn same_type(&self, other: &TypeRef) -> bool {
        self.to_string() == other.to_string()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Simple(s) => write!(f, "{}", s),
            TypeRef::Declared(d) => {
                write!(f, "{}", d.declared)?;
                if !d.args.is_empty() {
                    let args: Vec<String> = d.args.iter().map(|a| a.to_string()).collect();
                    write!(f, "<{}>", args.join(","))?;
                }
                Ok(())
            }
            TypeRef::Array(a) => write!(f, "{}[]", a.array),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of_string() -> TypeRef {
        TypeRef::declared(
            "java.util.List",
            vec![TypeRef::simple("java.lang.String")],
        )
    }

    #[test]
    fn test_type_display_matches_host_rendering() {
        assert_eq!(list_of_string().to_string(), "java.util.List<java.lang.String>");
        let map = TypeRef::declared(
            "java.util.Map",
            vec![TypeRef::simple("K"), TypeRef::simple("V")],
        );
        assert_eq!(map.to_string(), "java.util.Map<K,V>");
        assert_eq!(TypeRef::array_of(TypeRef::simple("int")).to_string(), "int[]");
    }

    #[test]
    fn test_type_kind_classification() {
        let params = vec!["E".to_string()];
        assert_eq!(TypeRef::void().kind_in(&params), TypeKind::Void);
        assert_eq!(TypeRef::simple("int").kind_in(&params), TypeKind::Primitive);
        assert_eq!(TypeRef::simple("E").kind_in(&params), TypeKind::TypeVariable);
        assert_eq!(list_of_string().kind_in(&params), TypeKind::Declared);
        assert_eq!(
            TypeRef::simple("java.lang.String").kind_in(&params),
            TypeKind::Declared
        );
        assert_eq!(
            TypeRef::array_of(TypeRef::simple("int")).kind_in(&params),
            TypeKind::Array
        );
    }

    #[test]
    fn test_substitute_and_erasure() {
        let list_e = TypeRef::declared("java.util.List", vec![TypeRef::simple("E")]);
        let bound = list_e.substitute(&[("E".to_string(), TypeRef::simple("java.lang.String"))]);
        assert!(bound.same_type(&list_of_string()));
        assert!(list_e.erasure().same_type(&TypeRef::simple("java.util.List")));
        assert!(TypeRef::declared("java.util.List", vec![]).same_type(&TypeRef::simple("java.util.List")));
    }

    #[test]
    fn test_member_deserializes_with_defaults() {
        let json = r#"{ "name": "run" }"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.kind, MemberKind::Method);
        assert!(member.return_type.is_void());
        assert!(member.params.is_empty());
    }

    #[test]
    fn test_type_ref_untagged_forms() {
        let json = r#"[
            "java.lang.String",
            { "declared": "java.util.List", "args": ["java.lang.String"] },
            { "array": "int" }
        ]"#;
        let types: Vec<TypeRef> = serde_json::from_str(json).unwrap();
        assert!(matches!(types[0], TypeRef::Simple(_)));
        assert!(types[1].same_type(&list_of_string()));
        assert!(matches!(types[2], TypeRef::Array(_)));
    }
}
