use crate::context::ContextError;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum TransformError {
    #[error(
        "Expected field `{field_name}: {type_name}` to have a `first` or \
        `last` argument in document `{definition_name}`"
    )]
    ConnectionMissingBound {
        definition_name: String,
        field_name: String,
        type_name: String,
    },

    #[error(
        "Expected field `{field_name}: {type_name}` to have an `edges` \
        selection in document `{definition_name}`"
    )]
    ConnectionMissingEdges {
        definition_name: String,
        field_name: String,
        type_name: String,
    },

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("Found `@export(as: \"{export_name}\")` more than once in `{definition_name}`")]
    DuplicateExport {
        definition_name: String,
        export_name: String,
    },

    #[error(
        "Expected all fields on the same parent with the name or alias \
        `{response_key}` to have the same name and arguments in document \
        `{definition_name}`"
    )]
    FlattenConflict {
        definition_name: String,
        response_key: String,
    },

    #[error("Found a circular reference from fragment `{fragment_name}`")]
    FragmentCycle {
        fragment_name: String,
    },

    #[error(
        "Expected the `handle` argument to `@connection` on field \
        `{field_name}` in document `{definition_name}` to be a string \
        literal or not specified"
    )]
    InvalidConnectionHandle {
        definition_name: String,
        field_name: String,
    },

    #[error(
        "Expected type `{type_name}` of connection field `{field_name}` in \
        document `{definition_name}` {reason}"
    )]
    InvalidConnectionType {
        definition_name: String,
        field_name: String,
        reason: String,
        type_name: String,
    },

    #[error(
        "Expected the `as` argument to `@export` on field `{field_name}` in \
        document `{definition_name}` to be a string literal"
    )]
    InvalidExport {
        definition_name: String,
        field_name: String,
    },

    #[error(
        "Expected the `plural` argument to `@relay` on fragment \
        `{fragment_name}` to be a boolean literal or not specified"
    )]
    InvalidRelayPlural {
        fragment_name: String,
    },

    #[error(
        "Expected a value for non-nullable argument `${argument_name}: \
        {type_name}` of fragment `{fragment_name}`"
    )]
    MissingFragmentArgument {
        argument_name: String,
        fragment_name: String,
        type_name: String,
    },

    #[error(
        "Expected field `{field_name}` in document `{definition_name}` to \
        have at most one handle, got {handles:?}"
    )]
    MultipleHandles {
        definition_name: String,
        field_name: String,
        handles: Vec<String>,
    },

    #[error(
        "Specializing fragment `{fragment_name}` produced the name \
        `{specialized_name}`, which is already taken"
    )]
    SpecializedNameCollision {
        fragment_name: String,
        specialized_name: String,
    },

    #[error(
        "Unexpected argument `{argument_name}` supplied to fragment \
        `{fragment_name}`; only arguments declared with \
        `@argumentDefinitions` can be set with `@arguments`"
    )]
    UnexpectedFragmentArgument {
        argument_name: String,
        fragment_name: String,
    },

    #[error("Unknown fragment `{fragment_name}` referenced from `{referenced_from}`")]
    UnknownFragment {
        fragment_name: String,
        referenced_from: String,
    },

    #[error("Variable `${variable_name}` is not in scope in `{definition_name}`")]
    VariableNotInScope {
        definition_name: String,
        variable_name: String,
    },
}
