use crate::ast;
use crate::document::scan_definitions;
use crate::document::DefinitionKind;
use crate::document::Document;
use crate::document::DocumentParseError;

type Result<T> = std::result::Result<T, DocumentParseError>;

#[test]
fn parses_fragments_and_extensions_from_one_text() -> Result<()> {
    let doc = Document::parse("Mixed.graphql", concat!(
        "extend type User {\n",
        "  isSelected: Boolean\n",
        "}\n",
        "fragment A on User { id }\n",
        "\"\"\"A client-only type\"\"\"\n",
        "type Local { name: String }\n",
        "fragment B on User { isSelected }\n",
    ))?;

    assert_eq!(doc.executable_definitions().len(), 2);
    assert_eq!(doc.schema_definitions().len(), 2);

    let ast::query::Definition::Fragment(frag_b) = &doc.executable_definitions()[1] else {
        panic!("Expected a fragment definition");
    };
    assert_eq!(frag_b.name, "B");
    assert_eq!(frag_b.position.line, 7);
    Ok(())
}

#[test]
fn anonymous_selection_after_closed_block_starts_new_definition() {
    let spans = scan_definitions("type Query { a: Int }\n{ a }");
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].kind, DefinitionKind::Schema);
    assert_eq!(spans[1].kind, DefinitionKind::Executable);
}

#[test]
fn keywords_inside_strings_and_comments_are_ignored() {
    let spans = scan_definitions(concat!(
        "# type Foo\n",
        "query Q { a(arg: \"fragment X\") }\n",
    ));
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].kind, DefinitionKind::Executable);
}

#[test]
fn rejects_operation_with_sibling_definitions() {
    let result = Document::parse("Op.graphql", concat!(
        "query Q { ...F }\n",
        "fragment F on Query { a }\n",
    ));
    assert_eq!(result, Err(DocumentParseError::MultipleDefinitionsWithOperation {
        document_name: "Op.graphql".to_string(),
    }));
}

#[test]
fn rejects_empty_text() {
    let result = Document::parse("Empty.graphql", "  # nothing here\n");
    assert_eq!(result, Err(DocumentParseError::EmptyDocument {
        document_name: "Empty.graphql".to_string(),
    }));
}

#[test]
fn block_line_offset_is_applied_to_positions() -> Result<()> {
    let mut doc = Document::new("Host.js", "line one\nline two\nfragment F on T { a }\n");
    doc.add_block("fragment F on T { a }", 2)?;

    let ast::query::Definition::Fragment(frag) = &doc.executable_definitions()[0] else {
        panic!("Expected a fragment definition");
    };
    assert_eq!(frag.position.line, 3);
    assert_eq!(doc.source_line(3), Some("fragment F on T { a }"));
    Ok(())
}
