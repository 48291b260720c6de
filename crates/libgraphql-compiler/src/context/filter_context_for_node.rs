use crate::context::CompilerContext;
use crate::context::ContextError;
use crate::ir::Definition;
use crate::ir::Selection;
use std::collections::VecDeque;
use std::sync::Arc;

/// A context holding `node` and every fragment it transitively spreads, in
/// the order the spreads are first encountered.
pub fn filter_context_for_node(
    context: &CompilerContext,
    node: &Definition,
) -> Result<CompilerContext, ContextError> {
    let mut included = vec![node.clone()];
    let mut queue = VecDeque::new();
    collect_spreads(node.selections(), &mut queue);

    while let Some(name) = queue.pop_front() {
        if included.iter().any(|definition| definition.name() == name) {
            continue;
        }
        let fragment = context.get_fragment(&name)?;
        collect_spreads(&fragment.selections, &mut queue);
        included.push(Definition::Fragment(fragment.clone()));
    }

    CompilerContext::new(Arc::clone(context.schema())).add_all(included)
}

fn collect_spreads(selections: &[Selection], queue: &mut VecDeque<String>) {
    for selection in selections {
        match selection {
            Selection::FragmentSpread(spread) => queue.push_back(spread.name.to_owned()),
            other => {
                if let Some(children) = other.selections() {
                    collect_spreads(children, queue);
                }
            },
        }
    }
}
