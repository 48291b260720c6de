use crate::context::CompilerContext;
use crate::ir::Argument;
use crate::ir::Definition;
use crate::ir::Selection;
use crate::transforms::ir_rewriter;
use crate::transforms::IrRewriter;
use crate::transforms::TransformError;

type Result<T> = std::result::Result<T, TransformError>;

/// The name of the record field a handle writes its output to.
pub fn handle_field_name(field_name: &str, handle: &str) -> String {
    format!("__{field_name}_{handle}")
}

/// Point reader fragments at handle storage: every field carrying a handle
/// is renamed to that handle's storage field (keeping the original response
/// key as its alias) and loses its arguments.
pub fn transform(context: &CompilerContext) -> Result<CompilerContext> {
    ir_rewriter::rewrite_context(context, &mut FieldHandleTransformer {
        definition_name: String::new(),
    })
}

struct FieldHandleTransformer {
    definition_name: String,
}
impl FieldHandleTransformer {
    fn attach(
        &self,
        alias: &mut Option<String>,
        name: &mut String,
        arguments: &mut Vec<Argument>,
        handles: &mut Vec<String>,
    ) -> Result<()> {
        let handle = match handles.as_slice() {
            [] => return Ok(()),
            [handle] => handle.to_owned(),
            _ => return Err(TransformError::MultipleHandles {
                definition_name: self.definition_name.to_owned(),
                field_name: name.to_owned(),
                handles: handles.to_owned(),
            }),
        };
        if alias.is_none() {
            *alias = Some(name.to_owned());
        }
        *name = handle_field_name(name, &handle);
        arguments.clear();
        handles.clear();
        Ok(())
    }
}
impl IrRewriter for FieldHandleTransformer {
    fn rewrite_definition(&mut self, definition: Definition) -> Result<Option<Definition>> {
        self.definition_name = definition.name().to_string();
        self.traverse_definition(definition).map(Some)
    }

    fn rewrite_selection(&mut self, selection: Selection) -> Result<Option<Selection>> {
        let mut selection = self.traverse_selection(selection)?;
        match &mut selection {
            Selection::LinkedField(field) => self.attach(
                &mut field.alias,
                &mut field.name,
                &mut field.arguments,
                &mut field.handles,
            )?,
            Selection::ScalarField(field) => self.attach(
                &mut field.alias,
                &mut field.name,
                &mut field.arguments,
                &mut field.handles,
            )?,
            Selection::Condition(_)
            | Selection::FragmentSpread(_)
            | Selection::InlineFragment(_) => (),
        }
        Ok(Some(selection))
    }
}
