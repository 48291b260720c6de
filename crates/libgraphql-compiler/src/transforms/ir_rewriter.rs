use crate::context::CompilerContext;
use crate::ir::Definition;
use crate::ir::Selection;
use crate::transforms::TransformError;

type Result<T> = std::result::Result<T, TransformError>;

/// Owned, bottom-up rewriting of IR trees.
///
/// Implementors override the hooks for the nodes they care about and call
/// back into the `traverse_*` methods to process children. Returning `None`
/// from a hook removes the node.
pub(crate) trait IrRewriter {
    fn rewrite_definition(&mut self, definition: Definition) -> Result<Option<Definition>> {
        self.traverse_definition(definition).map(Some)
    }

    fn rewrite_selection(&mut self, selection: Selection) -> Result<Option<Selection>> {
        self.traverse_selection(selection).map(Some)
    }

    fn rewrite_selections(&mut self, selections: Vec<Selection>) -> Result<Vec<Selection>> {
        let mut rewritten = Vec::with_capacity(selections.len());
        for selection in selections {
            if let Some(selection) = self.rewrite_selection(selection)? {
                rewritten.push(selection);
            }
        }
        Ok(rewritten)
    }

    fn traverse_definition(&mut self, mut definition: Definition) -> Result<Definition> {
        let selections = std::mem::take(definition.selections_mut());
        *definition.selections_mut() = self.rewrite_selections(selections)?;
        Ok(definition)
    }

    fn traverse_selection(&mut self, mut selection: Selection) -> Result<Selection> {
        if let Some(children) = selection.selections_mut().map(std::mem::take) {
            let rewritten = self.rewrite_selections(children)?;
            if let Some(slot) = selection.selections_mut() {
                *slot = rewritten;
            }
        }
        Ok(selection)
    }
}

/// Run `rewriter` over every definition of `context`.
pub(crate) fn rewrite_context(
    context: &CompilerContext,
    rewriter: &mut impl IrRewriter,
) -> Result<CompilerContext> {
    context.try_map(|definition| rewriter.rewrite_definition(Definition::clone(definition)))
}
