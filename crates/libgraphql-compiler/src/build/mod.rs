//! Incremental builds: parsing source directories, writing artifacts, and
//! rebuilding as files change.

mod codegen_directory;
mod document_extractor;
mod file_matcher;
mod file_parser;
mod file_writer;
mod persist_query;
mod runner;
mod watcher;
mod writer;

pub use codegen_directory::ARTIFACT_EXTENSION;
pub use codegen_directory::CodegenDirectory;
pub use codegen_directory::CodegenDirectoryError;
pub use codegen_directory::DirectoryChanges;
pub use document_extractor::DocumentExtractor;
pub use document_extractor::ExtractedBlock;
pub use document_extractor::GRAPHQL_EXPERIMENTAL_TAG;
pub use document_extractor::GRAPHQL_TAG;
pub use document_extractor::GraphQLFileExtractor;
pub use file_matcher::accept_all;
pub use file_matcher::content_contains;
pub use file_matcher::FileFilter;
pub use file_matcher::FileMatcher;
pub use file_parser::FileParser;
pub use file_parser::FileParserError;
pub use file_writer::FileWriter;
pub use file_writer::FileWriterConfig;
pub use persist_query::PersistQuery;
pub use persist_query::PersistQueryError;
pub use runner::BuildSummary;
pub use runner::GetSchema;
pub use runner::MakeWriter;
pub use runner::ParserConfig;
pub use runner::Runner;
pub use runner::RunnerError;
pub use runner::RunnerOptions;
pub use runner::WriteOutcome;
pub use runner::WriterConfig;
pub use watcher::ChangeSource;
pub use watcher::FileChangeWatcher;
pub use watcher::WatcherError;
pub use writer::Writer;
pub use writer::WriterError;
pub use writer::WriterInputs;

use std::time::Duration;

pub(crate) fn to_seconds(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}

#[cfg(test)]
mod tests;
