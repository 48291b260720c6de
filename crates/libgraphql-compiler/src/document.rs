use crate::ast;
use std::path::Path;
use thiserror::Error;

type Result<T> = std::result::Result<T, DocumentParseError>;

const EXECUTABLE_KEYWORDS: [&str; 4] = ["fragment", "mutation", "query", "subscription"];
const SCHEMA_KEYWORDS: [&str; 9] = [
    "directive",
    "enum",
    "extend",
    "input",
    "interface",
    "scalar",
    "schema",
    "type",
    "union",
];

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DocumentParseError {
    #[error(
        "Expected GraphQL text in `{document_name}` to contain at least one \
        definition (fragment, mutation, query, subscription)"
    )]
    EmptyDocument {
        document_name: String,
    },

    #[error(
        "GraphQL text in `{document_name}` contains an operation alongside \
        other definitions; an operation must be the only definition in its \
        text"
    )]
    MultipleDefinitionsWithOperation {
        document_name: String,
    },

    #[error("Failed to parse GraphQL text in `{document_name}`: {err}")]
    ParseError {
        document_name: String,
        err: String,
    },
}

/// The parsed GraphQL content of one named source.
///
/// A document may mix executable definitions (operations and fragments) with
/// client schema definitions (type definitions, type extensions and directive
/// definitions). The two kinds are kept apart since they are consumed by
/// different stages of compilation.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    executable_definitions: Vec<ast::query::Definition>,
    name: String,
    schema_definitions: Vec<ast::schema::Definition>,
    source_text: String,
}
impl Document {
    /// An empty document for `name` whose blocks are excerpts of
    /// `source_text`.
    pub fn new(name: impl Into<String>, source_text: impl Into<String>) -> Self {
        Self {
            executable_definitions: vec![],
            name: name.into(),
            schema_definitions: vec![],
            source_text: source_text.into(),
        }
    }

    /// Parse a standalone GraphQL text as a single-block document.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self> {
        let mut document = Self::new(name, text);
        document.add_block(text, 0)?;
        Ok(document)
    }

    /// Parse one block of GraphQL text that starts `line_offset` lines into
    /// this document's source and append its definitions.
    pub fn add_block(&mut self, block_text: &str, line_offset: usize) -> Result<()> {
        let padded = format!("{}{block_text}", "\n".repeat(line_offset));
        let spans = scan_definitions(&padded);
        if spans.is_empty() {
            return Err(DocumentParseError::EmptyDocument {
                document_name: self.name.to_owned(),
            });
        }

        let parse_error = |err: String| DocumentParseError::ParseError {
            document_name: self.name.to_owned(),
            err,
        };

        let mut executable_definitions = vec![];
        if spans.iter().any(|span| span.kind == DefinitionKind::Executable) {
            let masked = mask_definitions(&padded, &spans, DefinitionKind::Executable);
            let ast_doc = ast::query::parse(&masked)
                .map_err(|err| parse_error(err.to_string()))?;
            executable_definitions = ast_doc.definitions;
        }

        let mut schema_definitions = vec![];
        if spans.iter().any(|span| span.kind == DefinitionKind::Schema) {
            let masked = mask_definitions(&padded, &spans, DefinitionKind::Schema);
            let ast_doc = ast::schema::parse(&masked)
                .map_err(|err| parse_error(err.to_string()))?;
            schema_definitions = ast_doc.definitions;
        }

        let has_operation = executable_definitions.iter().any(|def| {
            matches!(def, ast::query::Definition::Operation(_))
        });
        if has_operation && executable_definitions.len() > 1 {
            return Err(DocumentParseError::MultipleDefinitionsWithOperation {
                document_name: self.name.to_owned(),
            });
        }

        self.executable_definitions.extend(executable_definitions);
        self.schema_definitions.extend(schema_definitions);
        Ok(())
    }

    pub fn executable_definitions(&self) -> &[ast::query::Definition] {
        &self.executable_definitions
    }

    /// The source identity of this document, used as the file path of every
    /// location reported for its definitions.
    pub fn file_path(&self) -> &Path {
        Path::new(self.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.executable_definitions.is_empty() && self.schema_definitions.is_empty()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn schema_definitions(&self) -> &[ast::schema::Definition] {
        &self.schema_definitions
    }

    /// The 1-based `line` of the source text, for diagnostic previews.
    pub fn source_line(&self, line: usize) -> Option<&str> {
        self.source_text.lines().nth(line.checked_sub(1)?)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum DefinitionKind {
    Executable,
    Schema,
}

#[derive(Debug)]
pub(crate) struct DefinitionSpan {
    pub(crate) end: usize,
    pub(crate) kind: DefinitionKind,
    pub(crate) start: usize,
}

struct OpenDefinition {
    block_closed: bool,
    kind: DefinitionKind,
    start: usize,
}

/// Find the byte span and kind of every top-level definition in `text`.
///
/// Only enough of the lexical grammar is understood to track nesting:
/// strings, comments and brackets. A definition starts at a top-level
/// keyword (or a description string preceding one), or at a top-level `{`
/// once the current definition's block has been closed.
pub(crate) fn scan_definitions(text: &str) -> Vec<DefinitionSpan> {
    let bytes = text.as_bytes();
    let mut spans = vec![];
    let mut current: Option<OpenDefinition> = None;
    let mut depth = 0usize;
    let mut pending_description: Option<usize> = None;
    let mut after_extend = false;

    let mut idx = 0;
    while idx < bytes.len() {
        let byte = bytes[idx];
        match byte {
            b'#' => {
                while idx < bytes.len() && bytes[idx] != b'\n' {
                    idx += 1;
                }
                continue;
            },

            b'"' => {
                let start = idx;
                idx = skip_string(bytes, idx);
                if depth == 0 && pending_description.is_none() {
                    pending_description = Some(start);
                }
                continue;
            },

            b'{' | b'(' | b'[' => {
                let opens_definition = byte == b'{'
                    && depth == 0
                    && current.as_ref().is_none_or(|open| open.block_closed);
                if opens_definition {
                    let start = pending_description.take().unwrap_or(idx);
                    start_definition(&mut spans, &mut current, DefinitionKind::Executable, start);
                }
                depth += 1;
                after_extend = false;
            },

            b'}' | b')' | b']' => {
                depth = depth.saturating_sub(1);
                if byte == b'}' && depth == 0 {
                    if let Some(open) = current.as_mut() {
                        open.block_closed = true;
                    }
                }
            },

            b'_' | b'a'..=b'z' | b'A'..=b'Z' => {
                let start = idx;
                while idx < bytes.len()
                    && (bytes[idx] == b'_' || bytes[idx].is_ascii_alphanumeric()) {
                    idx += 1;
                }
                if depth == 0 && !after_extend {
                    let word = &text[start..idx];
                    let kind =
                        if EXECUTABLE_KEYWORDS.contains(&word) {
                            Some(DefinitionKind::Executable)
                        } else if SCHEMA_KEYWORDS.contains(&word) {
                            Some(DefinitionKind::Schema)
                        } else {
                            None
                        };
                    if let Some(kind) = kind {
                        let def_start = pending_description.take().unwrap_or(start);
                        start_definition(&mut spans, &mut current, kind, def_start);
                        after_extend = word == "extend";
                        continue;
                    }
                }
                after_extend = false;
                continue;
            },

            _ => (),
        }
        idx += 1;
    }

    if let Some(open) = current {
        spans.push(DefinitionSpan { end: bytes.len(), kind: open.kind, start: open.start });
    }
    spans
}

fn start_definition(
    spans: &mut Vec<DefinitionSpan>,
    current: &mut Option<OpenDefinition>,
    kind: DefinitionKind,
    start: usize,
) {
    if let Some(open) = current.take() {
        spans.push(DefinitionSpan { end: start, kind: open.kind, start: open.start });
    }
    *current = Some(OpenDefinition { block_closed: false, kind, start });
}

fn skip_string(bytes: &[u8], start: usize) -> usize {
    if bytes[start..].starts_with(b"\"\"\"") {
        let mut idx = start + 3;
        while idx < bytes.len() {
            if bytes[idx..].starts_with(b"\\\"\"\"") {
                idx += 4;
            } else if bytes[idx..].starts_with(b"\"\"\"") {
                return idx + 3;
            } else {
                idx += 1;
            }
        }
        return idx;
    }

    let mut idx = start + 1;
    while idx < bytes.len() {
        match bytes[idx] {
            b'\\' => idx += 2,
            b'"' => return idx + 1,
            b'\n' => return idx,
            _ => idx += 1,
        }
    }
    idx.min(bytes.len())
}

/// Blank out every definition not of `kind`, keeping line breaks so that
/// parser positions still refer to the unmasked text.
fn mask_definitions(text: &str, spans: &[DefinitionSpan], kind: DefinitionKind) -> String {
    text.char_indices()
        .map(|(idx, c)| {
            let keep = c == '\n' || c == '\r' || spans.iter().any(|span| {
                span.kind == kind && span.start <= idx && idx < span.end
            });
            if keep { c } else { ' ' }
        })
        .collect()
}
