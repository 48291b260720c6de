use crate::context::CompilerContext;
use crate::ir::Selection;
use crate::transforms::ir_rewriter;
use crate::transforms::IrRewriter;
use crate::transforms::TransformError;

type Result<T> = std::result::Result<T, TransformError>;

/// Remove handle metadata from every field. Handles are a client concern and
/// have no place in the text sent to the server.
pub fn transform(context: &CompilerContext) -> Result<CompilerContext> {
    ir_rewriter::rewrite_context(context, &mut SkipHandleFieldsTransformer)
}

struct SkipHandleFieldsTransformer;
impl IrRewriter for SkipHandleFieldsTransformer {
    fn rewrite_selection(&mut self, selection: Selection) -> Result<Option<Selection>> {
        let mut selection = self.traverse_selection(selection)?;
        match &mut selection {
            Selection::LinkedField(field) => field.handles.clear(),
            Selection::ScalarField(field) => field.handles.clear(),
            Selection::Condition(_)
            | Selection::FragmentSpread(_)
            | Selection::InlineFragment(_) => (),
        }
        Ok(Some(selection))
    }
}
