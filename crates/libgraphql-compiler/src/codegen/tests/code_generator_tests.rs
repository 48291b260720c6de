use crate::codegen::code_generator;
use crate::codegen::ConcreteArgument;
use crate::codegen::ConcreteArgumentDefinition;
use crate::codegen::ConcreteSelection;
use crate::codegen::GeneratedNode;
use crate::ir::Definition;
use crate::ir::Selection;
use crate::test_utils::parse_definitions;
use crate::test_utils::test_schema;

fn generate_fragment(text: &str) -> crate::codegen::ConcreteFragment {
    let definitions = parse_definitions(&[text]);
    let Some(Definition::Fragment(fragment)) = definitions.first() else {
        panic!("Expected a fragment");
    };
    code_generator::generate_fragment(fragment, &test_schema())
}

fn generate_root(text: &str) -> crate::codegen::ConcreteRoot {
    let definitions = parse_definitions(&[text]);
    let Some(Definition::Root(root)) = definitions.first() else {
        panic!("Expected a root");
    };
    code_generator::generate_root(root, &test_schema())
}

mod fields {
    use super::*;

    #[test]
    fn linked_fields_on_object_types_have_a_concrete_type() {
        let generated = generate_fragment("fragment F on User { bestFriend { id } }");
        let [ConcreteSelection::LinkedField(best_friend)] = generated.selections.as_slice() else {
            panic!("Expected a single linked field, got {:?}", generated.selections);
        };
        assert_eq!(best_friend.concrete_type.as_deref(), Some("User"));
        assert!(!best_friend.plural);
        assert_eq!(best_friend.storage_key, None);
    }

    #[test]
    fn plural_abstract_fields_have_no_concrete_type() {
        let generated = generate_root("query Q { nodes(ids: [\"1\", \"2\"]) { id } }");
        let [ConcreteSelection::LinkedField(nodes)] = generated.selections.as_slice() else {
            panic!("Expected a single linked field, got {:?}", generated.selections);
        };
        assert_eq!(nodes.concrete_type, None);
        assert!(nodes.plural);
        assert_eq!(nodes.storage_key.as_deref(), Some("nodes{\"ids\":[\"1\",\"2\"]}"));
    }

    #[test]
    fn constant_arguments_produce_a_storage_key() {
        let generated = generate_fragment(
            "fragment F on User { small: profilePicture(size: 32) { uri } }",
        );
        let [ConcreteSelection::LinkedField(picture)] = generated.selections.as_slice() else {
            panic!("Expected a single linked field, got {:?}", generated.selections);
        };
        assert_eq!(picture.alias.as_deref(), Some("small"));
        assert_eq!(picture.storage_key.as_deref(), Some("profilePicture{\"size\":32}"));
        assert!(matches!(
            picture.args.as_deref(),
            Some([ConcreteArgument::Literal { name, value, .. }])
                if name == "size" && *value == serde_json::json!(32)
        ));
    }

    #[test]
    fn variable_arguments_have_no_storage_key() {
        let generated = generate_root(
            "query Q($size: Int) { me { profilePicture(size: $size) { uri } } }",
        );
        let [ConcreteSelection::LinkedField(me)] = generated.selections.as_slice() else {
            panic!("Expected a single linked field, got {:?}", generated.selections);
        };
        let [ConcreteSelection::LinkedField(picture)] = me.selections.as_slice() else {
            panic!("Expected a single linked field, got {:?}", me.selections);
        };
        assert_eq!(picture.storage_key, None);
        assert!(matches!(
            picture.args.as_deref(),
            Some([ConcreteArgument::Variable { variable_name, type_name, .. }])
                if variable_name == "size" && type_name.as_deref() == Some("Int")
        ));
    }

    #[test]
    fn handles_follow_the_field_they_belong_to() {
        let mut definitions = parse_definitions(&["fragment F on User { name }"]);
        let Some(Definition::Fragment(fragment)) = definitions.first_mut() else {
            panic!("Expected a fragment");
        };
        let Some(Selection::ScalarField(name)) = fragment.selections.first_mut() else {
            panic!("Expected a scalar field");
        };
        name.handles.push("upper".to_string());

        let generated = code_generator::generate_fragment(fragment, &test_schema());
        let [
            ConcreteSelection::ScalarField(field),
            ConcreteSelection::ScalarHandle(handle),
        ] = generated.selections.as_slice() else {
            panic!("Expected a field followed by its handle, got {:?}", generated.selections);
        };
        assert_eq!(field.name, "name");
        assert_eq!(handle.name, "name");
        assert_eq!(handle.handle, "upper");
    }
}

mod conditions {
    use super::*;

    #[test]
    fn variable_conditions_become_condition_nodes() {
        let generated = generate_root(
            "query Q($withName: Boolean!) { me { name @include(if: $withName) } }",
        );
        let [ConcreteSelection::LinkedField(me)] = generated.selections.as_slice() else {
            panic!("Expected a single linked field, got {:?}", generated.selections);
        };
        let [ConcreteSelection::Condition(condition)] = me.selections.as_slice() else {
            panic!("Expected a condition, got {:?}", me.selections);
        };
        assert_eq!(condition.condition, "withName");
        assert!(condition.passing_value);
        assert_eq!(condition.selections.len(), 1);
    }

    #[test]
    fn literal_conditions_are_resolved() {
        let generated = generate_fragment(
            "fragment F on User { id @skip(if: true) name @include(if: true) }",
        );
        let [ConcreteSelection::ScalarField(name)] = generated.selections.as_slice() else {
            panic!("Expected only `name` to remain, got {:?}", generated.selections);
        };
        assert_eq!(name.name, "name");
    }
}

mod artifacts {
    use super::*;

    #[test]
    fn root_variables_become_local_arguments() {
        let generated = generate_root(
            "query Q($id: ID!, $size: Int = 32) { node(id: $id) { id } }",
        );
        assert_eq!(generated.argument_definitions, vec![
            ConcreteArgumentDefinition::LocalArgument {
                default_value: serde_json::Value::Null,
                name: "id".to_string(),
                type_name: "ID!".to_string(),
            },
            ConcreteArgumentDefinition::LocalArgument {
                default_value: serde_json::json!(32),
                name: "size".to_string(),
                type_name: "Int".to_string(),
            },
        ]);
    }

    #[test]
    fn fragment_artifacts_serialize_with_their_kind() -> serde_json::Result<()> {
        let generated = GeneratedNode::Fragment(generate_fragment("fragment F on User { name }"));
        let json: serde_json::Value = serde_json::from_str(&generated.to_json()?)?;
        assert_eq!(json, serde_json::json!({
            "argumentDefinitions": [],
            "kind": "Fragment",
            "metadata": null,
            "name": "F",
            "selections": [{
                "alias": null,
                "args": null,
                "kind": "ScalarField",
                "name": "name",
                "storageKey": null,
            }],
            "type": "User",
        }));
        Ok(())
    }
}
