use crate::context::CompilerContext;
use crate::ir::Definition;
use crate::ir::ScalarField;
use crate::ir::Selection;
use crate::schema::Schema;
use crate::schema::TypeRef;
use crate::schema::TYPENAME_FIELD;
use crate::transforms::TransformError;

type Result<T> = std::result::Result<T, TransformError>;

pub const ID_FIELD: &str = "id";
pub const ID_TYPE: &str = "ID";

/// Select the fields the runtime store needs to identify records: `id` on
/// every selection of a type exposing `id: ID`, and `__typename` on every
/// linked field of an abstract type. Fields already selected without an
/// alias are not added again.
pub fn transform(context: &CompilerContext) -> Result<CompilerContext> {
    let schema = context.schema();
    context.try_map(|definition| {
        let mut definition = Definition::clone(definition);
        let type_name = definition.type_name().to_string();
        let selections = definition.selections_mut();
        generate_in_children(schema, selections);
        add_id_field(schema, &type_name, selections);
        Ok(Some(definition))
    })
}

fn generate_in_children(schema: &Schema, selections: &mut [Selection]) {
    for selection in selections {
        match selection {
            Selection::LinkedField(field) => {
                let type_name = field.type_ref.innermost_name().to_string();
                generate_in_children(schema, &mut field.selections);
                add_id_field(schema, &type_name, &mut field.selections);
                if schema.is_abstract(&type_name)
                    && !has_unaliased_field(&field.selections, TYPENAME_FIELD) {
                    field.selections.push(Selection::ScalarField(ScalarField::generated(
                        TYPENAME_FIELD,
                        TypeRef::named("String").non_null(),
                    )));
                }
            },
            Selection::Condition(condition) =>
                generate_in_children(schema, &mut condition.selections),
            Selection::InlineFragment(inline) =>
                generate_in_children(schema, &mut inline.selections),
            Selection::FragmentSpread(_) | Selection::ScalarField(_) => (),
        }
    }
}

fn add_id_field(schema: &Schema, type_name: &str, selections: &mut Vec<Selection>) {
    let Some(id_field) = schema.field(type_name, ID_FIELD) else {
        return;
    };
    if id_field.type_ref().innermost_name() != ID_TYPE
        || has_unaliased_field(selections, ID_FIELD) {
        return;
    }
    selections.push(Selection::ScalarField(ScalarField::generated(
        ID_FIELD,
        id_field.type_ref().clone(),
    )));
}

fn has_unaliased_field(selections: &[Selection], field_name: &str) -> bool {
    selections.iter().any(|selection| {
        matches!(selection, Selection::ScalarField(field)
            if field.alias.is_none() && field.name == field_name)
    })
}
