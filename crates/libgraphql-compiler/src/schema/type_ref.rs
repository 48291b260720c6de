use crate::ast;

/// A reference to a schema type as written in a field, argument, or
/// variable annotation (e.g. `[User!]!`).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TypeRef {
    List(Box<TypeRef>),
    Named(String),
    NonNull(Box<TypeRef>),
}
impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }

    pub fn non_null(self) -> Self {
        match self {
            Self::NonNull(_) => self,
            other => Self::NonNull(Box::new(other)),
        }
    }

    pub(crate) fn from_ast(ast_type: &ast::query::Type) -> Self {
        use ast::query::Type;
        match ast_type {
            Type::NamedType(name) => Self::Named(name.to_string()),
            Type::ListType(inner) => Self::List(Box::new(Self::from_ast(inner))),
            Type::NonNullType(inner) => Self::NonNull(Box::new(Self::from_ast(inner))),
        }
    }

    /// Parse a type annotation written as a string, e.g. the `type` entry of
    /// an `@argumentDefinitions` argument (`"[ID!]!"`).
    pub fn parse(annotation: &str) -> Option<Self> {
        let annotation = annotation.trim();
        if let Some(inner) = annotation.strip_suffix('!') {
            return Self::parse(inner).and_then(|inner| match inner {
                Self::NonNull(_) => None,
                other => Some(other.non_null()),
            });
        }
        if let Some(inner) = annotation.strip_prefix('[') {
            let inner = inner.strip_suffix(']')?;
            return Self::parse(inner).map(Self::list);
        }
        let is_name = !annotation.is_empty()
            && annotation.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            && !annotation.starts_with(|c: char| c.is_ascii_digit());
        is_name.then(|| Self::named(annotation))
    }

    /// Recursively unwrap list and non-null wrappers and return the name of
    /// the underlying named type.
    pub fn innermost_name(&self) -> &str {
        match self {
            Self::Named(name) => name.as_str(),
            Self::List(inner) | Self::NonNull(inner) => inner.innermost_name(),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// True when the nullable form of this type is a list.
    pub fn is_plural(&self) -> bool {
        matches!(self.nullable(), Self::List(_))
    }

    /// Strip a single outer non-null wrapper, if present.
    pub fn nullable(&self) -> &TypeRef {
        match self {
            Self::NonNull(inner) => inner,
            other => other,
        }
    }

    /// For a list type (nullable or not), the type of its items.
    pub fn list_item(&self) -> Option<&TypeRef> {
        match self.nullable() {
            Self::List(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn to_graphql_string(&self) -> String {
        match self {
            Self::Named(name) => name.to_owned(),
            Self::List(inner) => format!("[{}]", inner.to_graphql_string()),
            Self::NonNull(inner) => format!("{}!", inner.to_graphql_string()),
        }
    }
}
impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_graphql_string())
    }
}
