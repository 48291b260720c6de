use std::fmt::Debug;

pub const GRAPHQL_TAG: &str = "graphql";
pub const GRAPHQL_EXPERIMENTAL_TAG: &str = "graphql.experimental";

/// One block of GraphQL text found in a source file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtractedBlock {
    /// Number of lines in the source file preceding the block.
    pub line_offset: usize,

    /// How the block was tagged in its host source, e.g. `graphql`.
    pub tag_kind: String,
    pub text: String,
}

/// Finds the GraphQL blocks embedded in a source file's text.
pub trait DocumentExtractor: Debug + Send + Sync {
    fn extract(&self, source_text: &str) -> Vec<ExtractedBlock>;
}

/// Treats an entire `.graphql` file as a single block.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GraphQLFileExtractor {
    /// Tag the block as `graphql.experimental`, which permits fragment
    /// argument directives.
    pub experimental: bool,
}
impl GraphQLFileExtractor {
    pub fn experimental() -> Self {
        Self { experimental: true }
    }
}
impl DocumentExtractor for GraphQLFileExtractor {
    fn extract(&self, source_text: &str) -> Vec<ExtractedBlock> {
        let tag_kind = if self.experimental { GRAPHQL_EXPERIMENTAL_TAG } else { GRAPHQL_TAG };
        vec![ExtractedBlock {
            line_offset: 0,
            tag_kind: tag_kind.to_string(),
            text: source_text.to_string(),
        }]
    }
}
