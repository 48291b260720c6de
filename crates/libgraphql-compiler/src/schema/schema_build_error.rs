use crate::file_reader;
use crate::ir::OperationKind;
use crate::loc;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SchemaBuildError {
    #[error("Multiple definitions of the `@{directive_name}` directive")]
    DuplicateDirectiveDefinition {
        directive_name: String,
        location1: loc::SourceLocation,
        location2: loc::SourceLocation,
    },

    #[error("The `{type_name}` type defines the `{field_name}` field more than once")]
    DuplicateFieldDefinition {
        field_name: String,
        location: loc::SourceLocation,
        type_name: String,
    },

    #[error("Multiple `schema` definitions specify the {operation:?} root type")]
    DuplicateOperationDefinition {
        operation: OperationKind,
        location1: loc::SourceLocation,
        location2: loc::SourceLocation,
    },

    #[error("Multiple definitions of the `{type_name}` type")]
    DuplicateTypeDefinition {
        type_name: String,
        location1: loc::SourceLocation,
        location2: loc::SourceLocation,
    },

    #[error(
        "Attempted to extend the `{type_name}` type as {extension_kind} type, \
        but `{type_name}` is {actual_kind} type"
    )]
    ExtensionOfWrongTypeKind {
        actual_kind: &'static str,
        extension_kind: &'static str,
        location: loc::SourceLocation,
        type_name: String,
    },

    #[error("Attempted to extend the `{type_name}` type, but it is not defined")]
    ExtensionOfUndefinedType {
        location: loc::SourceLocation,
        type_name: String,
    },

    #[error("No `Query` root operation type was defined")]
    NoQueryOperationTypeDefined,

    #[error("Error parsing schema in {file:?}: {err}")]
    ParseError {
        file: PathBuf,
        err: String,
    },

    #[error("The {operation:?} root type `{type_name}` must be an object type")]
    RootOperationTypeIsNotAnObject {
        operation: OperationKind,
        type_name: String,
    },

    #[error("Failed to read schema file: {0}")]
    SchemaFileReadError(Box<file_reader::ReadContentError>),

    #[error("There is no type defined with the name `{undefined_type_name}`")]
    UndefinedTypeName {
        ref_location: loc::SourceLocation,
        undefined_type_name: String,
    },
}
