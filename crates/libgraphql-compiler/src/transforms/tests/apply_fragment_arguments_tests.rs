use crate::ir::Selection;
use crate::test_utils::build_context;
use crate::test_utils::field_keys;
use crate::test_utils::find_field;
use crate::transforms::apply_fragment_arguments;
use crate::transforms::TransformError;
use crate::value::Value;

type Result<T> = std::result::Result<T, TransformError>;

const PICTURE_FRAGMENT: &str = concat!(
    "fragment Picture on User ",
    "@argumentDefinitions(size: {type: \"Int\", defaultValue: 64}) {\n",
    "  profilePicture(size: $size) { uri }\n",
    "}",
);

fn spread_name(selections: &[Selection]) -> &str {
    let Some(Selection::FragmentSpread(spread)) = selections.iter()
        .find(|selection| matches!(selection, Selection::FragmentSpread(_))) else {
        panic!("Expected a fragment spread");
    };
    spread.name.as_str()
}

fn size_argument(selections: &[Selection]) -> &Value {
    let Selection::LinkedField(picture) = find_field(selections, "profilePicture") else {
        panic!("Expected `profilePicture` to be a linked field");
    };
    &picture.arguments[0].value
}

mod specialization {
    use super::*;

    #[test]
    fn bound_values_replace_local_variables() -> Result<()> {
        let context = apply_fragment_arguments::transform(&build_context(&[
            PICTURE_FRAGMENT,
            "query Q { me { ...Picture @arguments(size: 128) } }",
        ]))?;

        let me = find_field(&context.get_root("Q")?.selections, "me");
        let name = spread_name(me.selections().unwrap());
        assert!(name.starts_with("Picture_"), "unexpected name `{name}`");
        assert!(context.get("Picture").is_none());

        let fragment = context.get_fragment(name)?;
        assert_eq!(*size_argument(&fragment.selections), Value::Int(128));
        assert!(fragment.argument_definitions.is_empty());
        Ok(())
    }

    #[test]
    fn unbound_arguments_use_their_defaults() -> Result<()> {
        let context = apply_fragment_arguments::transform(&build_context(&[
            PICTURE_FRAGMENT,
            "query Q { me { ...Picture } }",
        ]))?;
        let fragment = context.get_fragment("Picture")?;
        assert_eq!(*size_argument(&fragment.selections), Value::Int(64));
        Ok(())
    }

    #[test]
    fn operation_variables_pass_through() -> Result<()> {
        let context = apply_fragment_arguments::transform(&build_context(&[
            PICTURE_FRAGMENT,
            "query Q($size: Int) { me { ...Picture @arguments(size: $size) } }",
        ]))?;
        let me = find_field(&context.get_root("Q")?.selections, "me");
        let fragment = context.get_fragment(spread_name(me.selections().unwrap()))?;
        assert_eq!(*size_argument(&fragment.selections), Value::Variable("size".to_string()));
        Ok(())
    }

    #[test]
    fn equal_bindings_share_one_specialization() -> Result<()> {
        let context = apply_fragment_arguments::transform(&build_context(&[
            PICTURE_FRAGMENT,
            "query A { me { ...Picture @arguments(size: 128) } }",
            "query B { me { ...Picture @arguments(size: 128) } }",
        ]))?;
        assert_eq!(context.len(), 3);
        Ok(())
    }

    #[test]
    fn literal_guards_are_resolved() -> Result<()> {
        let context = apply_fragment_arguments::transform(&build_context(&[
            concat!(
                "fragment Named on User ",
                "@argumentDefinitions(withName: {type: \"Boolean!\", defaultValue: false}) {\n",
                "  id\n",
                "  name @include(if: $withName)\n",
                "}",
            ),
            "query Q { me { ...Named @arguments(withName: true) } }",
            "query R { me { ...Named } }",
        ]))?;

        let q_me = find_field(&context.get_root("Q")?.selections, "me");
        let with_name = context.get_fragment(spread_name(q_me.selections().unwrap()))?;
        assert_eq!(field_keys(&with_name.selections), vec!["id", "name"]);

        let without_name = context.get_fragment("Named")?;
        assert_eq!(field_keys(&without_name.selections), vec!["id"]);
        Ok(())
    }
}

mod errors {
    use super::*;

    #[test]
    fn missing_required_argument_is_rejected() {
        let context = build_context(&[
            concat!(
                "fragment Sized on User ",
                "@argumentDefinitions(size: {type: \"Int!\"}) {\n",
                "  profilePicture(size: $size) { uri }\n",
                "}",
            ),
            "query Q { me { ...Sized } }",
        ]);
        let result = apply_fragment_arguments::transform(&context);
        assert_eq!(result.err(), Some(TransformError::MissingFragmentArgument {
            argument_name: "size".to_string(),
            fragment_name: "Sized".to_string(),
            type_name: "Int!".to_string(),
        }));
    }

    #[test]
    fn undeclared_argument_is_rejected() {
        let context = build_context(&[
            "fragment Plain on User { id }",
            "query Q { me { ...Plain @arguments(size: 1) } }",
        ]);
        let result = apply_fragment_arguments::transform(&context);
        assert_eq!(result.err(), Some(TransformError::UnexpectedFragmentArgument {
            argument_name: "size".to_string(),
            fragment_name: "Plain".to_string(),
        }));
    }

    #[test]
    fn unknown_fragment_is_rejected() {
        let context = build_context(&["query Q { me { ...Missing } }"]);
        let result = apply_fragment_arguments::transform(&context);
        assert_eq!(result.err(), Some(TransformError::UnknownFragment {
            fragment_name: "Missing".to_string(),
            referenced_from: "Q".to_string(),
        }));
    }
}
