use crate::ast_convert;
use crate::ast_convert::LOCAL_RULES;
use crate::context::CompilerContext;
use crate::document::Document;
use crate::ir;
use crate::ir::Selection;
use crate::schema::Schema;
use crate::schema::extend_ast_schema;
use crate::schema::transform_ast_schema;
use std::sync::Arc;

pub(crate) const TEST_SCHEMA: &str = concat!(
    "schema { query: Query mutation: Mutation }\n",
    "type Query {\n",
    "  me: User\n",
    "  node(id: ID!): Node\n",
    "  nodes(ids: [ID!]!): [Node]\n",
    "  actor: Actor\n",
    "  viewer: Viewer\n",
    "}\n",
    "type Mutation {\n",
    "  setName(name: String!): User\n",
    "}\n",
    "interface Node {\n",
    "  id: ID!\n",
    "}\n",
    "type User implements Node {\n",
    "  id: ID!\n",
    "  name: String\n",
    "  bestFriend: User\n",
    "  profilePicture(size: Int): Image\n",
    "  friends(first: Int, last: Int, after: String, orderBy: String): FriendsConnection\n",
    "  nonConnection(first: Int): Image\n",
    "  pagelessFriends(first: Int): PagelessConnection\n",
    "}\n",
    "type Page implements Node {\n",
    "  id: ID!\n",
    "  title: String\n",
    "}\n",
    "type T implements Node {\n",
    "  id: ID!\n",
    "  a: String\n",
    "  b: Int\n",
    "}\n",
    "union Actor = User | Page\n",
    "type Image {\n",
    "  uri: String\n",
    "  width: Int\n",
    "}\n",
    "type Viewer {\n",
    "  actor: User\n",
    "}\n",
    "type FriendsConnection {\n",
    "  edges: [FriendsEdge]\n",
    "  pageInfo: PageInfo\n",
    "}\n",
    "type FriendsEdge {\n",
    "  cursor: String\n",
    "  node: User\n",
    "}\n",
    "type PagelessConnection {\n",
    "  edges: [FriendsEdge]\n",
    "}\n",
    "type PageInfo {\n",
    "  endCursor: String\n",
    "  hasNextPage: Boolean\n",
    "  hasPreviousPage: Boolean\n",
    "  startCursor: String\n",
    "}\n",
);

/// The server schema used across tests.
pub(crate) fn base_schema() -> Arc<Schema> {
    Arc::new(Schema::from_str(TEST_SCHEMA).expect("test schema should build"))
}

/// The server schema plus the compiler's own directives.
pub(crate) fn test_schema() -> Arc<Schema> {
    transform_ast_schema(&base_schema())
}

/// Convert each text (one GraphQL block per entry) to IR.
pub(crate) fn parse_definitions(texts: &[&str]) -> Vec<ir::Definition> {
    parse_definitions_with(&test_schema(), texts)
}

pub(crate) fn parse_definitions_with(schema: &Schema, texts: &[&str]) -> Vec<ir::Definition> {
    let documents: Vec<Document> = texts.iter()
        .enumerate()
        .map(|(idx, text)| {
            Document::parse(format!("Test{idx}.graphql"), text)
                .expect("test text should parse")
        })
        .collect();
    let document_refs: Vec<&Document> = documents.iter().collect();
    ast_convert::convert_ast_documents(schema, &document_refs, LOCAL_RULES)
        .expect("test text should convert")
}

pub(crate) fn build_context(texts: &[&str]) -> CompilerContext {
    build_context_with(test_schema(), texts)
}

pub(crate) fn build_context_with(schema: Arc<Schema>, texts: &[&str]) -> CompilerContext {
    let definitions = parse_definitions_with(&schema, texts);
    CompilerContext::new(schema)
        .add_all(definitions)
        .expect("test definitions should have unique names")
}

/// [`test_schema`] extended with the client schema in `sdl`.
pub(crate) fn client_schema(sdl: &str) -> Arc<Schema> {
    let document = Document::parse("Client.graphql", sdl)
        .expect("client schema should parse");
    extend_ast_schema(test_schema(), &[&document])
        .expect("client schema should extend the test schema")
}

/// The field selected under `response_key`, panicking when there is none.
pub(crate) fn find_field<'a>(selections: &'a [Selection], response_key: &str) -> &'a Selection {
    selections.iter()
        .find(|selection| match selection {
            Selection::LinkedField(field) => field.response_key() == response_key,
            Selection::ScalarField(field) => field.response_key() == response_key,
            _ => false,
        })
        .unwrap_or_else(|| panic!("Expected a field selected as `{response_key}`"))
}

/// Response keys of the fields in `selections`, in order.
pub(crate) fn field_keys(selections: &[Selection]) -> Vec<&str> {
    selections.iter()
        .filter_map(|selection| match selection {
            Selection::LinkedField(field) => Some(field.response_key()),
            Selection::ScalarField(field) => Some(field.response_key()),
            _ => None,
        })
        .collect()
}
