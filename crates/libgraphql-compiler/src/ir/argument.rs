use crate::schema::TypeRef;
use crate::value::Value;

/// A name bound to a literal value or a variable reference.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub name: String,
    /// The declared type of the argument, when the schema (or the target
    /// fragment) declares one.
    pub type_ref: Option<TypeRef>,
    pub value: Value,
}
impl Argument {
    /// Print `(a: 1, b: $b)` for a non-empty argument list.
    pub fn print_list(arguments: &[Argument]) -> String {
        format!(
            "({})",
            arguments.iter()
                .map(|arg| format!("{}: {}", arg.name, arg.value.to_graphql_string()))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

/// A variable a definition accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum ArgumentDefinition {
    /// Declared by the definition itself (operation variables, or a
    /// fragment's `@argumentDefinitions`).
    Local {
        default_value: Option<Value>,
        name: String,
        type_ref: TypeRef,
    },

    /// Referenced by a fragment but supplied by whichever operation ends up
    /// including it.
    Root {
        name: String,
        type_ref: Option<TypeRef>,
    },
}
impl ArgumentDefinition {
    pub fn name(&self) -> &str {
        match self {
            Self::Local { name, .. } | Self::Root { name, .. } => name.as_str(),
        }
    }

    pub fn type_ref(&self) -> Option<&TypeRef> {
        match self {
            Self::Local { type_ref, .. } => Some(type_ref),
            Self::Root { type_ref, .. } => type_ref.as_ref(),
        }
    }
}
