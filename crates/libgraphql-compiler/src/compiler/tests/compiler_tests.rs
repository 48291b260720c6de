use crate::codegen::ConcreteSelection;
use crate::codegen::GeneratedNode;
use crate::compiler::CompileError;
use crate::compiler::Compiler;
use crate::context::ContextError;
use crate::ir::OperationKind;
use crate::ir::Selection;
use crate::test_utils::base_schema;
use crate::test_utils::build_context;
use crate::test_utils::build_context_with;
use crate::test_utils::client_schema;
use crate::test_utils::field_keys;
use crate::test_utils::find_field;
use crate::test_utils::parse_definitions;
use crate::transforms::CompilerTransforms;
use crate::transforms::Pipeline;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, CompileError>;

fn compile(texts: &[&str]) -> Result<IndexMap<String, GeneratedNode>> {
    Compiler::new(base_schema(), build_context(texts)).compile()
}

fn batch<'a>(
    compiled: &'a IndexMap<String, GeneratedNode>,
    name: &str,
) -> &'a crate::codegen::ConcreteBatch {
    match compiled.get(name) {
        Some(GeneratedNode::Batch(batch)) => batch,
        other => panic!("Expected a batch named `{name}`, got {other:?}"),
    }
}

mod round_trip {
    use super::*;

    const QUERY: &str = "query Q { node(id: \"1\") { ...F } }";
    const FRAGMENT: &str = "fragment F on T { a }";

    #[test]
    fn fragment_artifact_matches_compiling_the_fragment_alone() -> Result<()> {
        let compiled = compile(&[QUERY, FRAGMENT])?;
        let alone = compile(&[FRAGMENT])?;
        assert_eq!(compiled.get("F"), alone.get("F"));
        assert!(matches!(compiled.get("F"), Some(GeneratedNode::Fragment(_))));
        Ok(())
    }

    #[test]
    fn batch_text_includes_the_spread_fragment() -> Result<()> {
        let compiled = compile(&[QUERY, FRAGMENT])?;
        let batch = batch(&compiled, "Q");

        assert_eq!(batch.operation, OperationKind::Query);
        assert_eq!(batch.id, None);
        assert!(batch.text.starts_with("query Q {\n  node(id: \"1\") {\n    ...F\n"));
        assert!(batch.text.contains("\nfragment F on T {\n  a\n"));
        Ok(())
    }

    #[test]
    fn batch_query_inlines_the_fragment_fields_under_node() -> Result<()> {
        let compiled = compile(&[QUERY, FRAGMENT])?;
        let batch = batch(&compiled, "Q");

        let [ConcreteSelection::LinkedField(node)] = batch.query.selections.as_slice() else {
            panic!("Expected a single `node` field, got {:?}", batch.query.selections);
        };
        let inline = node.selections.iter()
            .find_map(|selection| match selection {
                ConcreteSelection::InlineFragment(inline) => Some(inline),
                _ => None,
            })
            .expect("Expected `F` to be inlined as `... on T`");
        assert_eq!(inline.type_name, "T");
        assert!(matches!(
            inline.selections.as_slice(),
            [ConcreteSelection::ScalarField(a)] if a.name == "a"
        ));
        assert!(!node.selections.iter().any(|selection| {
            matches!(selection, ConcreteSelection::FragmentSpread(_))
        }));
        Ok(())
    }

    #[test]
    fn batch_fragment_reads_the_operation_selections() -> Result<()> {
        let compiled = compile(&[QUERY, FRAGMENT])?;
        let batch = batch(&compiled, "Q");

        assert_eq!(batch.fragment.name, "Q");
        assert_eq!(batch.fragment.type_name, "Query");
        let [ConcreteSelection::LinkedField(node)] = batch.fragment.selections.as_slice() else {
            panic!("Expected a single `node` field, got {:?}", batch.fragment.selections);
        };
        assert!(matches!(
            node.selections.as_slice(),
            [ConcreteSelection::FragmentSpread(spread)] if spread.name == "F"
        ));
        Ok(())
    }
}

mod validation {
    use super::*;

    #[test]
    fn unknown_fragments_are_reported_together() {
        let result = compile(&[
            "query Q { me { ...Missing } }",
            "fragment F on User { bestFriend { ...AlsoMissing } }",
        ]);
        let Err(CompileError::Validation { messages }) = result else {
            panic!("Expected validation errors, got {result:?}");
        };
        assert_eq!(messages, vec![
            "Unknown fragment `Missing` referenced from `Q`.".to_string(),
            "Unknown fragment `AlsoMissing` referenced from `F`.".to_string(),
        ]);
    }

    #[test]
    fn validation_errors_render_as_a_bullet_list() {
        let error = CompileError::Validation {
            messages: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(error.to_string(), "Encountered validation errors:\n* first\n* second");
    }
}

mod definitions {
    use super::*;

    #[test]
    fn added_definitions_are_compiled() -> Result<()> {
        let mut compiler = Compiler::new(base_schema(), build_context(&[]));
        compiler.add_definitions(parse_definitions(&["fragment F on User { name }"]))?;

        let compiled = compiler.compile()?;
        assert_eq!(compiled.keys().collect::<Vec<_>>(), vec!["F"]);
        Ok(())
    }

    #[test]
    fn adding_a_duplicate_name_fails() {
        let mut compiler = Compiler::new(
            base_schema(),
            build_context(&["fragment F on User { id }"]),
        );
        let result = compiler.add_definitions(parse_definitions(&["query F { me { id } }"]));
        assert!(matches!(
            result,
            Err(ContextError::DuplicateDefinition { name, .. }) if name == "F",
        ));
    }

    #[test]
    fn clones_do_not_see_later_additions() -> Result<()> {
        let mut compiler = Compiler::new(base_schema(), build_context(&[]));
        let snapshot = compiler.clone();
        compiler.add_definitions(parse_definitions(&["fragment F on User { name }"]))?;

        assert!(snapshot.context().is_empty());
        assert_eq!(compiler.context().len(), 1);
        Ok(())
    }

    #[test]
    fn transformed_query_context_drops_client_fields() -> Result<()> {
        let schema = client_schema("extend type User { isSelected: Boolean }");
        let compiler = Compiler::new(
            base_schema(),
            build_context_with(schema, &["query Q { me { name isSelected } }"]),
        );

        let query_context = compiler.transformed_query_context()?;
        let root = query_context.get_root("Q")?;
        let Selection::LinkedField(me) = find_field(&root.selections, "me") else {
            panic!("Expected `me` to be a linked field");
        };
        assert_eq!(field_keys(&me.selections), vec!["name", "id"]);

        let original = compiler.context().get_root("Q")?;
        let Selection::LinkedField(me) = find_field(&original.selections, "me") else {
            panic!("Expected `me` to be a linked field");
        };
        assert_eq!(field_keys(&me.selections), vec!["name", "isSelected"]);
        Ok(())
    }

    #[test]
    fn injected_pipelines_replace_the_defaults() -> Result<()> {
        let transforms = CompilerTransforms {
            codegen: Pipeline::default(),
            fragment: Pipeline::default(),
            print: Pipeline::default(),
            query: Pipeline::default(),
            validators: vec![],
        };
        let compiler = Compiler::with_transforms(
            base_schema(),
            build_context(&["query Q { me { ...Missing } }"]),
            transforms,
        );
        let query_context = compiler.transformed_query_context()?;
        assert!(query_context.get("Q").is_some());
        Ok(())
    }
}
