use crate::context::CompilerContext;
use crate::ir::Selection;
use crate::schema::Schema;
use crate::transforms::ir_rewriter;
use crate::transforms::IrRewriter;
use crate::transforms::TransformError;

type Result<T> = std::result::Result<T, TransformError>;

pub const VIEWER_HANDLE: &str = "viewer";
pub const VIEWER_TYPE: &str = "Viewer";

/// Attach the `viewer` handle to every linked field that returns the
/// `Viewer` type, so the runtime can normalize the singleton viewer record.
pub fn transform(context: &CompilerContext, schema: &Schema) -> Result<CompilerContext> {
    if schema.get_type(VIEWER_TYPE).is_none() {
        return Ok(context.clone());
    }
    ir_rewriter::rewrite_context(context, &mut ViewerHandleTransformer)
}

struct ViewerHandleTransformer;
impl IrRewriter for ViewerHandleTransformer {
    fn rewrite_selection(&mut self, selection: Selection) -> Result<Option<Selection>> {
        let mut selection = self.traverse_selection(selection)?;
        if let Selection::LinkedField(field) = &mut selection {
            let is_viewer = field.type_ref.innermost_name() == VIEWER_TYPE;
            if is_viewer && !field.handles.iter().any(|handle| handle == VIEWER_HANDLE) {
                field.handles.push(VIEWER_HANDLE.to_string());
            }
        }
        Ok(Some(selection))
    }
}
