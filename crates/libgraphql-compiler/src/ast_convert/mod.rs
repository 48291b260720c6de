//! Conversion of parsed executable definitions into IR.

mod ast_convert_error;
mod lowering;
mod validation_error;
mod validation_rule;
mod validator;

pub use ast_convert_error::AstConvertError;
pub use validation_error::ValidationError;
pub use validation_error::ValidationErrors;
pub use validation_rule::LOCAL_RULES;
pub use validation_rule::ValidationRule;

use crate::document::Document;
use crate::ir;
use crate::schema::Schema;

/// Validate and lower every operation and fragment in `documents`.
///
/// All definitions are validated together against `rules` first. Any
/// violation fails the whole conversion with one [`ValidationErrors`]
/// describing all of them. Schema definitions in the documents are ignored
/// here (see [`extend_ast_schema`](crate::schema::extend_ast_schema)).
pub fn convert_ast_documents(
    schema: &Schema,
    documents: &[&Document],
    rules: &[ValidationRule],
) -> Result<Vec<ir::Definition>, AstConvertError> {
    let definitions: Vec<_> = documents.iter()
        .flat_map(|document| {
            document.executable_definitions()
                .iter()
                .map(move |definition| (*document, definition))
        })
        .collect();

    validator::validate_definitions(schema, &definitions, rules)?;

    definitions.iter()
        .map(|(document, definition)| lowering::lower_definition(schema, document, definition))
        .collect()
}

#[cfg(test)]
mod tests;
