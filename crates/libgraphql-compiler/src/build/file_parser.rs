use crate::build::DocumentExtractor;
use crate::build::GRAPHQL_EXPERIMENTAL_TAG;
use crate::build::GRAPHQL_TAG;
use crate::document::Document;
use crate::document::DocumentParseError;
use crate::file_reader;
use crate::file_reader::ReadContentError;
use crate::schema::ARGUMENTS_DIRECTIVE;
use crate::schema::ARGUMENT_DEFINITIONS_DIRECTIVE;
use indexmap::IndexMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

type Result<T> = std::result::Result<T, FileParserError>;

#[derive(Debug, Error, PartialEq)]
pub enum FileParserError {
    #[error(transparent)]
    Document(#[from] DocumentParseError),

    #[error(
        "Invalid tag `{tag_kind}` in {file_path:?}. Expected `graphql` (common \
        case) or `graphql.experimental` (if using experimental directives)"
    )]
    InvalidTag {
        file_path: PathBuf,
        tag_kind: String,
    },

    #[error(transparent)]
    Read(#[from] ReadContentError),

    #[error(
        "Unexpected use of fragment variables in {file_path:?}: @arguments and \
        @argumentDefinitions are only supported in graphql.experimental blocks"
    )]
    UnexpectedFragmentArguments {
        file_path: PathBuf,
    },
}

/// The parsed documents of every file under one base directory.
///
/// Files are parsed incrementally: re-parsing a file replaces only that
/// file's document.
#[derive(Debug)]
pub struct FileParser {
    base_dir: PathBuf,
    documents: IndexMap<PathBuf, Arc<Document>>,
    extractor: Arc<dyn DocumentExtractor>,
}
impl FileParser {
    pub fn new(base_dir: impl Into<PathBuf>, extractor: Arc<dyn DocumentExtractor>) -> Self {
        Self {
            base_dir: base_dir.into(),
            documents: IndexMap::new(),
            extractor,
        }
    }

    pub fn base_dir(&self) -> &Path {
        self.base_dir.as_path()
    }

    /// Every parsed document, keyed by document name (the file's path
    /// relative to the base directory).
    pub fn documents(&self) -> IndexMap<String, Arc<Document>> {
        self.documents.values()
            .map(|document| (document.name().to_string(), Arc::clone(document)))
            .collect()
    }

    /// (Re-)parse `files`, given relative to the base directory.
    ///
    /// Files that no longer exist, that `filter` rejects, or that contain no
    /// GraphQL are forgotten. Nothing is updated unless every file parses.
    pub fn parse_files(
        &mut self,
        files: &[PathBuf],
        filter: &dyn Fn(&Path) -> bool,
    ) -> Result<()> {
        let mut parsed = Vec::with_capacity(files.len());
        for file in files {
            let file_path = self.base_dir.join(file);
            let source_text =
                if filter(&file_path) {
                    file_reader::read_content_if_exists(&file_path)?
                } else {
                    None
                };
            let document = match source_text {
                Some(source_text) => self.parse_source(file, &source_text)?,
                None => None,
            };
            parsed.push((file.to_owned(), document));
        }

        for (file, document) in parsed {
            match document {
                Some(document) => {
                    self.documents.insert(file, Arc::new(document));
                },
                None => {
                    self.documents.shift_remove(&file);
                },
            }
        }
        Ok(())
    }

    /// Parse the GraphQL blocks of one file's text, or `None` when it has
    /// none.
    pub fn parse_source(&self, file: &Path, source_text: &str) -> Result<Option<Document>> {
        let mut document = Document::new(file.to_string_lossy(), source_text);
        for block in self.extractor.extract(source_text) {
            if block.tag_kind != GRAPHQL_TAG && block.tag_kind != GRAPHQL_EXPERIMENTAL_TAG {
                return Err(FileParserError::InvalidTag {
                    file_path: file.to_path_buf(),
                    tag_kind: block.tag_kind,
                });
            }
            if block.tag_kind != GRAPHQL_EXPERIMENTAL_TAG
                && mentions_fragment_arguments(&block.text) {
                return Err(FileParserError::UnexpectedFragmentArguments {
                    file_path: file.to_path_buf(),
                });
            }
            document.add_block(&block.text, block.line_offset)?;
        }
        Ok((!document.is_empty()).then_some(document))
    }
}

/// Whether `text` uses `@arguments` or `@argumentDefinitions` anywhere.
fn mentions_fragment_arguments(text: &str) -> bool {
    [ARGUMENTS_DIRECTIVE, ARGUMENT_DEFINITIONS_DIRECTIVE].iter().any(|directive_name| {
        let needle = format!("@{directive_name}");
        text.match_indices(needle.as_str()).any(|(idx, _)| {
            text[idx + needle.len()..].chars()
                .next()
                .is_none_or(|next| !(next.is_alphanumeric() || next == '_'))
        })
    })
}
