use crate::codegen::printer;
use crate::test_utils::parse_definitions;

fn print_first(text: &str) -> String {
    let definitions = parse_definitions(&[text]);
    printer::print_definition(definitions.first().expect("Expected one definition"))
}

#[test]
fn prints_operation_variables_one_per_line() {
    let printed = print_first(
        "query Q($id: ID!, $size: Int = 32) { node(id: $id) { id } }",
    );
    assert_eq!(printed, concat!(
        "query Q(\n",
        "  $id: ID!\n",
        "  $size: Int = 32\n",
        ") {\n",
        "  node(id: $id) {\n",
        "    id\n",
        "  }\n",
        "}",
    ));
}

#[test]
fn prints_fragments_with_nested_inline_fragments() {
    let printed = print_first(
        "fragment F on Actor { ... on User { name pic: profilePicture(size: 32) { uri } } }",
    );
    assert_eq!(printed, concat!(
        "fragment F on Actor {\n",
        "  ... on User {\n",
        "    name\n",
        "    pic: profilePicture(size: 32) {\n",
        "      uri\n",
        "    }\n",
        "  }\n",
        "}",
    ));
}

#[test]
fn prints_conditions_on_each_guarded_selection() {
    let printed = print_first(concat!(
        "query Q($withName: Boolean!) { me @include(if: $withName) { id } }",
    ));
    assert_eq!(printed, concat!(
        "query Q(\n",
        "  $withName: Boolean!\n",
        ") {\n",
        "  me @include(if: $withName) {\n",
        "    id\n",
        "  }\n",
        "}",
    ));
}

#[test]
fn prints_spread_arguments() {
    let definitions = parse_definitions(&[
        "query Q { me { ...F @arguments(size: 64) } }",
        "fragment F on User @argumentDefinitions(size: {type: \"Int\"}) { \
            profilePicture(size: $size) { uri } \
        }",
    ]);
    let printed = printer::print_definition(&definitions[0]);
    assert_eq!(printed, concat!(
        "query Q {\n",
        "  me {\n",
        "    ...F @arguments(size: 64)\n",
        "  }\n",
        "}",
    ));
}

#[test]
fn prints_whole_floats_with_a_fractional_part() {
    let printed = print_first(
        "query Q($half: Float = 2.5, $whole: Float = 1.0) { me { id } }",
    );
    assert_eq!(printed, concat!(
        "query Q(\n",
        "  $half: Float = 2.5\n",
        "  $whole: Float = 1.0\n",
        ") {\n",
        "  me {\n",
        "    id\n",
        "  }\n",
        "}",
    ));
}
