use crate::context::ContextError;
use crate::transforms::TransformError;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum CompileError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("Encountered validation errors:\n{}", bullet_list(.messages))]
    Validation {
        messages: Vec<String>,
    },
}

fn bullet_list(messages: &[String]) -> String {
    messages.iter()
        .map(|message| format!("* {message}"))
        .collect::<Vec<_>>()
        .join("\n")
}
