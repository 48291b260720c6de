use crate::context::CompilerContext;
use crate::ir::Definition;
use crate::ir::Selection;
use crate::schema::Schema;
use crate::schema::TYPENAME_FIELD;
use crate::transforms::TransformError;

type Result<T> = std::result::Result<T, TransformError>;

/// Remove everything the server `schema` does not know about: fields added
/// by client schema extensions, inline fragments on client-only types and
/// definitions whose type is client-only.
///
/// Nodes left without selections are removed as well. Spreads of removed
/// fragments are left for the skip-unreachable pass.
pub fn transform(context: &CompilerContext, schema: &Schema) -> Result<CompilerContext> {
    context.try_map(|definition| {
        if schema.get_type(definition.type_name()).is_none() {
            log::debug!("Skipping client-only definition `{}`", definition.name());
            return Ok(None);
        }
        let mut definition = Definition::clone(definition);
        let type_name = definition.type_name().to_string();
        let selections = std::mem::take(definition.selections_mut());
        let selections = skip_client_selections(schema, &type_name, selections);
        if selections.is_empty() {
            return Ok(None);
        }
        *definition.selections_mut() = selections;
        Ok(Some(definition))
    })
}

fn skip_client_selections(
    schema: &Schema,
    parent_type: &str,
    selections: Vec<Selection>,
) -> Vec<Selection> {
    let mut kept = Vec::with_capacity(selections.len());
    for mut selection in selections {
        let keep_leaf = match &selection {
            Selection::FragmentSpread(_) => Some(true),
            Selection::ScalarField(field) => Some(
                field.name == TYPENAME_FIELD || schema.field(parent_type, &field.name).is_some(),
            ),
            Selection::Condition(_)
            | Selection::InlineFragment(_)
            | Selection::LinkedField(_) => None,
        };
        if let Some(keep) = keep_leaf {
            if keep {
                kept.push(selection);
            }
            continue;
        }

        let child_type = match &selection {
            Selection::LinkedField(field) => {
                if schema.field(parent_type, &field.name).is_none() {
                    continue;
                }
                field.type_ref.innermost_name().to_string()
            },
            Selection::InlineFragment(inline) => {
                if schema.get_type(&inline.type_condition).is_none() {
                    continue;
                }
                inline.type_condition.to_owned()
            },
            _ => parent_type.to_string(),
        };

        let Some(children) = selection.selections_mut() else {
            continue;
        };
        let remaining = skip_client_selections(schema, &child_type, std::mem::take(children));
        if remaining.is_empty() {
            continue;
        }
        *children = remaining;
        kept.push(selection);
    }
    kept
}
