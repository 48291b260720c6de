use crate::context::CompilerContext;
use crate::ir::Selection;

/// Report every fragment spread whose target is not a fragment in
/// `context`.
pub fn validate(context: &CompilerContext) -> Vec<String> {
    let mut messages = vec![];
    for definition in context.documents() {
        collect_unknown_spreads(context, definition.name(), definition.selections(), &mut messages);
    }
    messages
}

fn collect_unknown_spreads(
    context: &CompilerContext,
    referenced_from: &str,
    selections: &[Selection],
    messages: &mut Vec<String>,
) {
    for selection in selections {
        if let Selection::FragmentSpread(spread) = selection {
            if context.get_fragment(&spread.name).is_err() {
                messages.push(format!(
                    "Unknown fragment `{}` referenced from `{referenced_from}`.",
                    spread.name,
                ));
            }
        }
        if let Some(children) = selection.selections() {
            collect_unknown_spreads(context, referenced_from, children, messages);
        }
    }
}
