use crate::ir::Argument;
use crate::ir::ArgumentDefinition;
use crate::ir::Definition;
use crate::ir::Directive;
use crate::ir::Fragment;
use crate::ir::Root;
use crate::ir::Selection;
use crate::schema::ARGUMENTS_DIRECTIVE;

const INDENT: &str = "  ";

/// Print a definition back to GraphQL text, one selection per line.
///
/// Conditions are printed as `@include`/`@skip` on each selection they
/// guard. Handles and local argument definitions have no GraphQL syntax and
/// are not printed.
pub fn print_definition(definition: &Definition) -> String {
    match definition {
        Definition::Fragment(fragment) => print_fragment(fragment),
        Definition::Root(root) => print_root(root),
    }
}

fn print_fragment(fragment: &Fragment) -> String {
    format!(
        "fragment {} on {}{} {}",
        fragment.name,
        fragment.type_condition,
        print_directives(&fragment.directives),
        print_selections(&fragment.selections, ""),
    )
}

fn print_root(root: &Root) -> String {
    let mut printed = format!("{} {}", root.operation, root.name);
    let variables: Vec<String> = root.argument_definitions.iter()
        .filter_map(|arg_def| match arg_def {
            ArgumentDefinition::Local { default_value, name, type_ref } => {
                let mut variable = format!("{INDENT}${name}: {type_ref}");
                if let Some(default_value) = default_value {
                    variable.push_str(" = ");
                    variable.push_str(&default_value.to_graphql_string());
                }
                Some(variable)
            },
            ArgumentDefinition::Root { .. } => None,
        })
        .collect();
    if !variables.is_empty() {
        printed.push_str("(\n");
        printed.push_str(&variables.join("\n"));
        printed.push_str("\n)");
    }
    printed.push_str(&print_directives(&root.directives));
    printed.push(' ');
    printed.push_str(&print_selections(&root.selections, ""));
    printed
}

fn print_selections(selections: &[Selection], indent: &str) -> String {
    let child_indent = format!("{indent}{INDENT}");
    let lines: Vec<String> = selections.iter()
        .map(|selection| print_selection(selection, &child_indent, ""))
        .collect();
    format!("{{\n{}\n{indent}}}", lines.join("\n"))
}

fn print_selection(selection: &Selection, indent: &str, guards: &str) -> String {
    match selection {
        Selection::Condition(condition) => {
            let guards = format!("{guards} {}", condition.guard_string());
            condition.selections.iter()
                .map(|selection| print_selection(selection, indent, &guards))
                .collect::<Vec<_>>()
                .join("\n")
        },

        Selection::FragmentSpread(spread) => {
            let mut printed = format!("{indent}...{}", spread.name);
            if !spread.arguments.is_empty() {
                printed.push_str(&format!(
                    " @{ARGUMENTS_DIRECTIVE}{}",
                    Argument::print_list(&spread.arguments),
                ));
            }
            printed.push_str(&print_directives(&spread.directives));
            printed.push_str(guards);
            printed
        },

        Selection::InlineFragment(inline) => format!(
            "{indent}... on {}{}{guards} {}",
            inline.type_condition,
            print_directives(&inline.directives),
            print_selections(&inline.selections, indent),
        ),

        Selection::LinkedField(field) => format!(
            "{indent}{}{}{guards} {}",
            print_field_head(field.alias.as_deref(), &field.name, &field.arguments),
            print_directives(&field.directives),
            print_selections(&field.selections, indent),
        ),

        Selection::ScalarField(field) => format!(
            "{indent}{}{}{guards}",
            print_field_head(field.alias.as_deref(), &field.name, &field.arguments),
            print_directives(&field.directives),
        ),
    }
}

fn print_field_head(alias: Option<&str>, name: &str, arguments: &[Argument]) -> String {
    let mut printed = match alias {
        Some(alias) => format!("{alias}: {name}"),
        None => name.to_string(),
    };
    if !arguments.is_empty() {
        printed.push_str(&Argument::print_list(arguments));
    }
    printed
}

fn print_directives(directives: &[Directive]) -> String {
    directives.iter()
        .map(|directive| format!(" {}", directive.to_graphql_string()))
        .collect()
}
