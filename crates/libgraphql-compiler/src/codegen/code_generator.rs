use crate::codegen::ConcreteArgument;
use crate::codegen::ConcreteArgumentDefinition;
use crate::codegen::ConcreteCondition;
use crate::codegen::ConcreteFragment;
use crate::codegen::ConcreteFragmentSpread;
use crate::codegen::ConcreteHandle;
use crate::codegen::ConcreteInlineFragment;
use crate::codegen::ConcreteLinkedField;
use crate::codegen::ConcreteRoot;
use crate::codegen::ConcreteScalarField;
use crate::codegen::ConcreteSelection;
use crate::ir::Argument;
use crate::ir::ArgumentDefinition;
use crate::ir::Fragment;
use crate::ir::Root;
use crate::ir::Selection;
use crate::schema::Schema;
use crate::schema::SchemaType;
use crate::value::Value;

/// The runtime representation of a reader fragment.
pub fn generate_fragment(fragment: &Fragment, schema: &Schema) -> ConcreteFragment {
    ConcreteFragment {
        argument_definitions: generate_argument_definitions(&fragment.argument_definitions),
        metadata: (!fragment.metadata.is_empty()).then(|| fragment.metadata.clone()),
        name: fragment.name.to_owned(),
        selections: generate_selections(&fragment.selections, schema),
        type_name: fragment.type_condition.to_owned(),
    }
}

/// The runtime representation of an operation's response normalization
/// tree.
pub fn generate_root(root: &Root, schema: &Schema) -> ConcreteRoot {
    ConcreteRoot {
        argument_definitions: generate_argument_definitions(&root.argument_definitions),
        name: root.name.to_owned(),
        operation: root.operation,
        selections: generate_selections(&root.selections, schema),
    }
}

fn generate_argument_definitions(
    argument_definitions: &[ArgumentDefinition],
) -> Vec<ConcreteArgumentDefinition> {
    argument_definitions.iter()
        .map(|arg_def| match arg_def {
            ArgumentDefinition::Local { default_value, name, type_ref } =>
                ConcreteArgumentDefinition::LocalArgument {
                    default_value: default_value.as_ref()
                        .map(Value::to_json)
                        .unwrap_or(serde_json::Value::Null),
                    name: name.to_owned(),
                    type_name: type_ref.to_string(),
                },
            ArgumentDefinition::Root { name, type_ref } =>
                ConcreteArgumentDefinition::RootArgument {
                    name: name.to_owned(),
                    type_name: type_ref.as_ref().map(ToString::to_string),
                },
        })
        .collect()
}

fn generate_selections(selections: &[Selection], schema: &Schema) -> Vec<ConcreteSelection> {
    let mut generated = Vec::with_capacity(selections.len());
    for selection in selections {
        match selection {
            Selection::Condition(condition) => match condition.condition.as_variable() {
                Some(variable_name) => generated.push(ConcreteSelection::Condition(
                    ConcreteCondition {
                        condition: variable_name.to_string(),
                        passing_value: condition.passing_value,
                        selections: generate_selections(&condition.selections, schema),
                    },
                )),
                None => {
                    if condition.condition.as_bool() == Some(condition.passing_value) {
                        generated.extend(generate_selections(&condition.selections, schema));
                    }
                },
            },

            Selection::FragmentSpread(spread) => generated.push(
                ConcreteSelection::FragmentSpread(ConcreteFragmentSpread {
                    args: generate_arguments(&spread.arguments),
                    name: spread.name.to_owned(),
                }),
            ),

            Selection::InlineFragment(inline) => generated.push(
                ConcreteSelection::InlineFragment(ConcreteInlineFragment {
                    selections: generate_selections(&inline.selections, schema),
                    type_name: inline.type_condition.to_owned(),
                }),
            ),

            Selection::LinkedField(field) => {
                let type_name = field.type_ref.innermost_name();
                let concrete_type = match schema.get_type(type_name) {
                    Some(SchemaType::Object(_)) => Some(type_name.to_string()),
                    _ => None,
                };
                generated.push(ConcreteSelection::LinkedField(ConcreteLinkedField {
                    alias: field.alias.to_owned(),
                    args: generate_arguments(&field.arguments),
                    concrete_type,
                    name: field.name.to_owned(),
                    plural: field.type_ref.is_plural(),
                    selections: generate_selections(&field.selections, schema),
                    storage_key: storage_key(&field.name, &field.arguments),
                }));
                for handle in &field.handles {
                    generated.push(ConcreteSelection::LinkedHandle(generate_handle(
                        field.alias.as_deref(),
                        &field.arguments,
                        handle,
                        &field.name,
                    )));
                }
            },

            Selection::ScalarField(field) => {
                generated.push(ConcreteSelection::ScalarField(ConcreteScalarField {
                    alias: field.alias.to_owned(),
                    args: generate_arguments(&field.arguments),
                    name: field.name.to_owned(),
                    storage_key: storage_key(&field.name, &field.arguments),
                }));
                for handle in &field.handles {
                    generated.push(ConcreteSelection::ScalarHandle(generate_handle(
                        field.alias.as_deref(),
                        &field.arguments,
                        handle,
                        &field.name,
                    )));
                }
            },
        }
    }
    generated
}

fn generate_handle(
    alias: Option<&str>,
    arguments: &[Argument],
    handle: &str,
    name: &str,
) -> ConcreteHandle {
    ConcreteHandle {
        alias: alias.map(str::to_string),
        args: generate_arguments(arguments),
        handle: handle.to_string(),
        key: String::new(),
        name: name.to_string(),
    }
}

/// Arguments sorted by name, or `None` when there are none.
fn generate_arguments(arguments: &[Argument]) -> Option<Vec<ConcreteArgument>> {
    if arguments.is_empty() {
        return None;
    }
    let mut sorted: Vec<&Argument> = arguments.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    Some(sorted.into_iter()
        .map(|arg| {
            let type_name = arg.type_ref.as_ref().map(ToString::to_string);
            match &arg.value {
                Value::Variable(variable_name) => ConcreteArgument::Variable {
                    name: arg.name.to_owned(),
                    type_name,
                    variable_name: variable_name.to_owned(),
                },
                value => ConcreteArgument::Literal {
                    name: arg.name.to_owned(),
                    type_name,
                    value: value.to_json(),
                },
            }
        })
        .collect())
}

/// The key a field with constant arguments is stored under, e.g.
/// `profilePicture{"size":32}`. Fields whose arguments depend on variables
/// have their key computed at runtime.
pub fn storage_key(field_name: &str, arguments: &[Argument]) -> Option<String> {
    if arguments.is_empty() || !arguments.iter().all(|arg| arg.value.is_constant()) {
        return None;
    }
    let mut sorted: Vec<&Argument> = arguments.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    let entries = sorted.into_iter()
        .map(|arg| format!(
            "{}:{}",
            serde_json::Value::String(arg.name.to_owned()),
            arg.value.to_json(),
        ))
        .collect::<Vec<_>>()
        .join(",");
    Some(format!("{field_name}{{{entries}}}"))
}
