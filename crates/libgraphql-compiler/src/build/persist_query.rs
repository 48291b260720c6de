use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
#[error("{0}")]
pub struct PersistQueryError(pub String);

/// Stores query text somewhere the server can look it up, returning the
/// identifier clients send in place of the text.
#[async_trait]
pub trait PersistQuery: Debug + Send + Sync {
    async fn persist_query(&self, text: &str) -> Result<String, PersistQueryError>;
}
