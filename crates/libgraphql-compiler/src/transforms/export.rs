use crate::context::CompilerContext;
use crate::ir::Definition;
use crate::ir::Directive;
use crate::ir::DirectiveKind;
use crate::ir::Selection;
use crate::transforms::TransformError;
use crate::value::Value;

type Result<T> = std::result::Result<T, TransformError>;

pub const EXPORTS_METADATA_KEY: &str = "exports";

const AS_ARGUMENT: &str = "as";
const PLURAL_PATH_SEGMENT: &str = "*";

/// Strip `@export(as: "name")` from fields, recording for each export name
/// the response path of the exported value under
/// `metadata.exports.<name>`.
///
/// Paths are lists of response keys; a `"*"` segment follows every list
/// valued field on the way.
pub fn transform(context: &CompilerContext) -> Result<CompilerContext> {
    context.try_map(|definition| {
        let mut definition = Definition::clone(definition);
        let mut collector = ExportCollector {
            definition_name: definition.name().to_string(),
            exports: serde_json::Map::new(),
        };
        collector.visit(definition.selections_mut(), &mut vec![])?;

        if !collector.exports.is_empty() {
            let metadata = match &mut definition {
                Definition::Fragment(fragment) => &mut fragment.metadata,
                Definition::Root(root) => &mut root.metadata,
            };
            metadata.insert(
                EXPORTS_METADATA_KEY.to_string(),
                serde_json::Value::Object(collector.exports),
            );
        }
        Ok(Some(definition))
    })
}

struct ExportCollector {
    definition_name: String,
    exports: serde_json::Map<String, serde_json::Value>,
}
impl ExportCollector {
    fn record(
        &mut self,
        directives: &mut Vec<Directive>,
        field_name: &str,
        path: &[String],
    ) -> Result<()> {
        let Some(directive_idx) = directives.iter()
            .position(|directive| directive.kind == DirectiveKind::Export) else {
            return Ok(());
        };
        let directive = directives.remove(directive_idx);
        let Some(Value::String(export_name)) = directive.argument(AS_ARGUMENT) else {
            return Err(TransformError::InvalidExport {
                definition_name: self.definition_name.to_owned(),
                field_name: field_name.to_string(),
            });
        };
        if self.exports.contains_key(export_name) {
            return Err(TransformError::DuplicateExport {
                definition_name: self.definition_name.to_owned(),
                export_name: export_name.to_owned(),
            });
        }
        self.exports.insert(
            export_name.to_owned(),
            serde_json::Value::Array(
                path.iter().cloned().map(serde_json::Value::String).collect(),
            ),
        );
        Ok(())
    }

    fn visit(&mut self, selections: &mut [Selection], path: &mut Vec<String>) -> Result<()> {
        for selection in selections {
            match selection {
                Selection::ScalarField(field) => {
                    path.push(field.response_key().to_string());
                    let result = self.record(&mut field.directives, &field.name, path);
                    path.pop();
                    result?;
                },

                Selection::LinkedField(field) => {
                    path.push(field.response_key().to_string());
                    self.record(&mut field.directives, &field.name, path)?;
                    let pushed_plural = field.type_ref.is_plural();
                    if pushed_plural {
                        path.push(PLURAL_PATH_SEGMENT.to_string());
                    }
                    self.visit(&mut field.selections, path)?;
                    if pushed_plural {
                        path.pop();
                    }
                    path.pop();
                },

                Selection::Condition(condition) =>
                    self.visit(&mut condition.selections, path)?,
                Selection::InlineFragment(inline) =>
                    self.visit(&mut inline.selections, path)?,
                Selection::FragmentSpread(_) => (),
            }
        }
        Ok(())
    }
}
