use crate::ast_convert::ValidationErrors;
use crate::ir::OperationKind;
use crate::loc;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum AstConvertError {
    #[error(
        "Anonymous {operation} operation at {location}: operations must be \
        named"
    )]
    AnonymousOperation {
        location: loc::SourceLocation,
        operation: OperationKind,
    },

    #[error(
        "Invalid `@argumentDefinitions` entry `{argument_name}` on fragment \
        `{fragment_name}`: {reason}"
    )]
    InvalidArgumentDefinition {
        argument_name: String,
        fragment_name: String,
        location: loc::SourceLocation,
        reason: String,
    },

    #[error(
        "Expected the `if` argument of `@{directive_name}` at {location} to \
        be a variable or a boolean literal"
    )]
    InvalidConditionValue {
        directive_name: String,
        location: loc::SourceLocation,
    },

    #[error("Unknown field `{field_name}` on type `{type_name}` at {location}")]
    UnknownField {
        field_name: String,
        location: loc::SourceLocation,
        type_name: String,
    },

    #[error("Unknown type `{type_name}` at {location}")]
    UnknownType {
        location: loc::SourceLocation,
        type_name: String,
    },

    #[error("The schema does not support {operation} operations ({location})")]
    UnsupportedOperation {
        location: loc::SourceLocation,
        operation: OperationKind,
    },

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}
