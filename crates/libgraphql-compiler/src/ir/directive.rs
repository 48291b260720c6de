use crate::loc;
use crate::schema::ARGUMENTS_DIRECTIVE;
use crate::schema::ARGUMENT_DEFINITIONS_DIRECTIVE;
use crate::schema::CONNECTION_DIRECTIVE;
use crate::schema::EXPORT_DIRECTIVE;
use crate::schema::RELAY_DIRECTIVE;
use crate::ir::Argument;
use crate::value::Value;

/// The directives the compiler gives meaning to. Anything else passes through
/// the transforms untouched as [`DirectiveKind::Other`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum DirectiveKind {
    ArgumentDefinitions,
    Arguments,
    Connection,
    Export,
    Include,
    Other(String),
    Relay,
    Skip,
}
impl DirectiveKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            ARGUMENT_DEFINITIONS_DIRECTIVE => Self::ArgumentDefinitions,
            ARGUMENTS_DIRECTIVE => Self::Arguments,
            CONNECTION_DIRECTIVE => Self::Connection,
            EXPORT_DIRECTIVE => Self::Export,
            "include" => Self::Include,
            RELAY_DIRECTIVE => Self::Relay,
            "skip" => Self::Skip,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::ArgumentDefinitions => ARGUMENT_DEFINITIONS_DIRECTIVE,
            Self::Arguments => ARGUMENTS_DIRECTIVE,
            Self::Connection => CONNECTION_DIRECTIVE,
            Self::Export => EXPORT_DIRECTIVE,
            Self::Include => "include",
            Self::Other(name) => name.as_str(),
            Self::Relay => RELAY_DIRECTIVE,
            Self::Skip => "skip",
        }
    }
}

/// A directive applied to an IR node.
#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    pub arguments: Vec<Argument>,
    pub kind: DirectiveKind,
    pub location: loc::SourceLocation,
}
impl Directive {
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }

    pub fn to_graphql_string(&self) -> String {
        let mut printed = format!("@{}", self.name());
        if !self.arguments.is_empty() {
            printed.push_str(&Argument::print_list(&self.arguments));
        }
        printed
    }
}
