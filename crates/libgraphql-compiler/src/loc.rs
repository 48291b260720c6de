use std::path::Path;
use std::path::PathBuf;

/// Very similar to graphql_parser's [Pos](graphql_parser::Pos), except it
/// includes the name of the source the position refers to.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FilePosition {
    pub col: usize,
    pub file: Option<PathBuf>,
    pub line: usize,
}
impl FilePosition {
    pub(crate) fn from_pos<P: AsRef<Path>>(
        file: Option<P>,
        pos: graphql_parser::Pos,
    ) -> Self {
        Self {
            col: pos.column,
            file: file.map(|f| f.as_ref().to_path_buf()),
            line: pos.line,
        }
    }
}
impl std::fmt::Display for FilePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}", file.display(), self.line, self.col),
            None => write!(f, "{}:{}", self.line, self.col),
        }
    }
}

/// Where a schema construct or an IR node came from.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum SourceLocation {
    /// Implicitly defined by GraphQL itself (built-in scalars, `@skip`,
    /// `__typename`, ...).
    GraphQLBuiltIn,

    /// Declared by one of the compiler's own schema transforms (e.g.
    /// `@connection`).
    CompilerBuiltIn,

    /// Synthesized by an IR transform rather than written by a user.
    Generated,

    Source(FilePosition),
}
impl SourceLocation {
    pub(crate) fn from_pos<P: AsRef<Path>>(
        file: Option<P>,
        pos: graphql_parser::Pos,
    ) -> Self {
        Self::Source(FilePosition::from_pos(file, pos))
    }

    pub fn as_file_position(&self) -> Option<&FilePosition> {
        if let Self::Source(pos) = self {
            Some(pos)
        } else {
            None
        }
    }
}
impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GraphQLBuiltIn => write!(f, "<graphql built-in>"),
            Self::CompilerBuiltIn => write!(f, "<compiler built-in>"),
            Self::Generated => write!(f, "<generated>"),
            Self::Source(pos) => write!(f, "{pos}"),
        }
    }
}
