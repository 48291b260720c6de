use crate::loc;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ContextError {
    #[error(
        "Duplicate document named `{name}`. GraphQL fragments and roots must \
        have unique names"
    )]
    DuplicateDefinition {
        location1: loc::SourceLocation,
        location2: loc::SourceLocation,
        name: String,
    },

    #[error("Unknown document `{name}`")]
    UndefinedDefinition {
        name: String,
    },

    #[error("Expected `{name}` to be a {expected_kind}, but it is a {actual_kind}")]
    WrongDefinitionKind {
        actual_kind: &'static str,
        expected_kind: &'static str,
        name: String,
    },
}
