use crate::context::CompilerContext;
use crate::ir::Definition;
use crate::ir::DirectiveKind;
use crate::transforms::TransformError;
use crate::value::Value;

type Result<T> = std::result::Result<T, TransformError>;

pub const PLURAL_ARGUMENT: &str = "plural";

/// Strip `@relay` from fragment definitions, moving its `plural` argument
/// into the fragment's metadata.
pub fn transform(context: &CompilerContext) -> Result<CompilerContext> {
    context.try_map(|definition| {
        let Definition::Fragment(fragment) = definition.as_ref() else {
            return Ok(Some(Definition::clone(definition)));
        };
        let Some(directive_idx) = fragment.directives.iter()
            .position(|directive| directive.kind == DirectiveKind::Relay) else {
            return Ok(Some(Definition::clone(definition)));
        };

        let mut fragment = fragment.clone();
        let directive = fragment.directives.remove(directive_idx);
        match directive.argument(PLURAL_ARGUMENT) {
            None => (),
            Some(Value::Boolean(plural)) => {
                fragment.metadata.insert(
                    PLURAL_ARGUMENT.to_string(),
                    serde_json::Value::Bool(*plural),
                );
            },
            Some(_) => return Err(TransformError::InvalidRelayPlural {
                fragment_name: fragment.name,
            }),
        }
        Ok(Some(Definition::Fragment(fragment)))
    })
}
