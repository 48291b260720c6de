use crate::ast_convert::convert_ast_documents;
use crate::ast_convert::AstConvertError;
use crate::ast_convert::LOCAL_RULES;
use crate::document::Document;
use crate::ir::ArgumentDefinition;
use crate::ir::Definition;
use crate::ir::OperationKind;
use crate::ir::Selection;
use crate::schema::TypeRef;
use crate::test_utils::parse_definitions;
use crate::test_utils::test_schema;
use crate::value::Value;

mod roots {
    use super::*;

    #[test]
    fn operation_variables_become_local_arguments() {
        let defs = parse_definitions(&[
            "query UserQuery($id: ID!, $size: Int = 32) { node(id: $id) { id } }",
        ]);
        let root = defs[0].as_root().unwrap();

        assert_eq!(root.name, "UserQuery");
        assert_eq!(root.operation, OperationKind::Query);
        assert_eq!(root.type_name, "Query");
        assert_eq!(root.argument_definitions, vec![
            ArgumentDefinition::Local {
                default_value: None,
                name: "id".to_string(),
                type_ref: TypeRef::named("ID").non_null(),
            },
            ArgumentDefinition::Local {
                default_value: Some(Value::Int(32)),
                name: "size".to_string(),
                type_ref: TypeRef::named("Int"),
            },
        ]);
    }

    #[test]
    fn mutations_resolve_against_the_mutation_type() {
        let defs = parse_definitions(&[
            "mutation Rename($name: String!) { setName(name: $name) { name } }",
        ]);
        let root = defs[0].as_root().unwrap();
        assert_eq!(root.operation, OperationKind::Mutation);
        assert_eq!(root.type_name, "Mutation");
    }

    #[test]
    fn anonymous_operations_are_rejected() {
        let schema = test_schema();
        let document = Document::parse("Anon.graphql", "{ me { id } }").unwrap();
        let result = convert_ast_documents(&schema, &[&document], LOCAL_RULES);
        assert!(matches!(result, Err(AstConvertError::AnonymousOperation { .. })));
    }

    #[test]
    fn output_order_matches_input_order() {
        let defs = parse_definitions(&[
            "fragment B on User { id }",
            "query A { me { ...B } }",
            "fragment C on User { name }",
        ]);
        let names: Vec<&str> = defs.iter().map(Definition::name).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }
}

mod selections {
    use super::*;

    #[test]
    fn fields_are_split_into_scalar_and_linked() {
        let defs = parse_definitions(&["query Q { me { id friendAlias: bestFriend { name } } }"]);
        let root = defs[0].as_root().unwrap();
        let Selection::LinkedField(me) = &root.selections[0] else {
            panic!("Expected `me` to be a linked field");
        };
        assert!(matches!(&me.selections[0], Selection::ScalarField(field) if field.name == "id"));
        let Selection::LinkedField(best_friend) = &me.selections[1] else {
            panic!("Expected `bestFriend` to be a linked field");
        };
        assert_eq!(best_friend.alias.as_deref(), Some("friendAlias"));
        assert_eq!(best_friend.response_key(), "friendAlias");
        assert_eq!(best_friend.type_ref, TypeRef::named("User"));
    }

    #[test]
    fn include_and_skip_become_conditions() {
        let defs = parse_definitions(&[
            "query Q($withName: Boolean!) { me { name @include(if: $withName) id @skip(if: true) } }",
        ]);
        let root = defs[0].as_root().unwrap();
        let me_selections = root.selections[0].selections().unwrap();

        let Selection::Condition(include) = &me_selections[0] else {
            panic!("Expected a condition");
        };
        assert!(include.passing_value);
        assert_eq!(include.condition, Value::Variable("withName".to_string()));
        assert!(matches!(&include.selections[0], Selection::ScalarField(field) if field.name == "name"));

        let Selection::Condition(skip) = &me_selections[1] else {
            panic!("Expected a condition");
        };
        assert!(!skip.passing_value);
        assert_eq!(skip.condition, Value::Boolean(true));
    }

    #[test]
    fn inline_fragment_without_type_uses_parent_type() {
        let defs = parse_definitions(&["fragment F on User { ... { name } }"]);
        let fragment = defs[0].as_fragment().unwrap();
        let Selection::InlineFragment(inline) = &fragment.selections[0] else {
            panic!("Expected an inline fragment");
        };
        assert_eq!(inline.type_condition, "User");
    }
}

mod fragment_arguments {
    use super::*;

    #[test]
    fn argument_definitions_become_local_arguments() {
        let defs = parse_definitions(&[concat!(
            "fragment Picture on User ",
            "@argumentDefinitions(size: {type: \"Int\", defaultValue: 64}) {\n",
            "  profilePicture(size: $size) { uri }\n",
            "}",
        )]);
        let fragment = defs[0].as_fragment().unwrap();
        assert!(fragment.directives.is_empty());
        assert_eq!(fragment.argument_definitions, vec![
            ArgumentDefinition::Local {
                default_value: Some(Value::Int(64)),
                name: "size".to_string(),
                type_ref: TypeRef::named("Int"),
            },
        ]);
    }

    #[test]
    fn undeclared_variables_become_root_arguments() {
        let defs = parse_definitions(&["fragment Picture on User { profilePicture(size: $size) { uri } }"]);
        let fragment = defs[0].as_fragment().unwrap();
        assert_eq!(fragment.argument_definitions, vec![
            ArgumentDefinition::Root {
                name: "size".to_string(),
                type_ref: Some(TypeRef::named("Int")),
            },
        ]);
    }

    #[test]
    fn arguments_directive_binds_spread_arguments() {
        let defs = parse_definitions(&["query Q { me { ...Picture @arguments(size: 128) } }"]);
        let root = defs[0].as_root().unwrap();
        let me_selections = root.selections[0].selections().unwrap();
        let Selection::FragmentSpread(spread) = &me_selections[0] else {
            panic!("Expected a fragment spread");
        };
        assert!(spread.directives.is_empty());
        assert_eq!(spread.arguments.len(), 1);
        assert_eq!(spread.arguments[0].name, "size");
        assert_eq!(spread.arguments[0].value, Value::Int(128));
    }

    #[test]
    fn malformed_argument_definition_is_rejected() {
        let schema = test_schema();
        let document = Document::parse(
            "Bad.graphql",
            "fragment F on User @argumentDefinitions(size: 64) { id }",
        ).unwrap();
        let result = convert_ast_documents(&schema, &[&document], LOCAL_RULES);
        assert!(matches!(
            result,
            Err(AstConvertError::InvalidArgumentDefinition { argument_name, .. })
                if argument_name == "size",
        ));
    }
}
