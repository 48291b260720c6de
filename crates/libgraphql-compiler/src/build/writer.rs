use crate::ast_convert::AstConvertError;
use crate::build::CodegenDirectoryError;
use crate::build::DirectoryChanges;
use crate::build::PersistQueryError;
use crate::compiler::CompileError;
use crate::context::ContextError;
use crate::document::Document;
use crate::schema::Schema;
use crate::schema::SchemaBuildError;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriterError {
    #[error(transparent)]
    AstConvert(#[from] AstConvertError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Directory(#[from] CodegenDirectoryError),

    #[error("Failed to persist the text of `{name}`: {err}")]
    PersistQuery {
        name: String,
        err: PersistQueryError,
    },

    #[error(transparent)]
    Schema(#[from] SchemaBuildError),

    #[error("Failed to serialize the artifact for `{name}`: {err}")]
    Serialize {
        name: String,
        err: serde_json::Error,
    },
}

/// Everything a writer is created from.
#[derive(Clone, Debug)]
pub struct WriterInputs {
    /// Documents whose definitions may be referenced but whose artifacts
    /// are written by some other writer.
    pub base_documents: IndexMap<String, Arc<Document>>,
    pub documents: IndexMap<String, Arc<Document>>,
    pub only_validate: bool,

    /// The server schema.
    pub schema: Arc<Schema>,
    pub skip_persist: bool,
}

/// Materializes the artifacts of one set of documents. A writer is created
/// fresh for every run and consumed by it.
#[async_trait]
pub trait Writer: Send {
    async fn write_all(self: Box<Self>) -> Result<DirectoryChanges, WriterError>;
}
