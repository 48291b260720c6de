use crate::context::CompilerContext;
use crate::ir::Definition;
use crate::ir::Directive;
use crate::ir::Selection;
use crate::schema::Schema;
use crate::transforms::ir_rewriter;
use crate::transforms::IrRewriter;
use crate::transforms::TransformError;

type Result<T> = std::result::Result<T, TransformError>;

/// Drop every directive the server schema does not declare.
pub fn transform(context: &CompilerContext, schema: &Schema) -> Result<CompilerContext> {
    ir_rewriter::rewrite_context(context, &mut FilterDirectivesTransformer { schema })
}

struct FilterDirectivesTransformer<'a> {
    schema: &'a Schema,
}
impl FilterDirectivesTransformer<'_> {
    fn filter(&self, directives: &mut Vec<Directive>) {
        directives.retain(|directive| self.schema.directive(directive.name()).is_some());
    }
}
impl IrRewriter for FilterDirectivesTransformer<'_> {
    fn rewrite_definition(&mut self, definition: Definition) -> Result<Option<Definition>> {
        let mut definition = self.traverse_definition(definition)?;
        match &mut definition {
            Definition::Fragment(fragment) => self.filter(&mut fragment.directives),
            Definition::Root(root) => self.filter(&mut root.directives),
        }
        Ok(Some(definition))
    }

    fn rewrite_selection(&mut self, selection: Selection) -> Result<Option<Selection>> {
        let mut selection = self.traverse_selection(selection)?;
        match &mut selection {
            Selection::FragmentSpread(spread) => self.filter(&mut spread.directives),
            Selection::InlineFragment(inline) => self.filter(&mut inline.directives),
            Selection::LinkedField(field) => self.filter(&mut field.directives),
            Selection::ScalarField(field) => self.filter(&mut field.directives),
            Selection::Condition(_) => (),
        }
        Ok(Some(selection))
    }
}
