use crate::context::CompilerContext;
use crate::ir::Definition;
use crate::ir::Selection;
use crate::transforms::TransformError;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, TransformError>;

/// Remove selections that an earlier unconditional sibling (or ancestor)
/// already guarantees will be fetched.
///
/// Unconditional selections are moved ahead of conditional ones. Each
/// conditional branch starts from a copy of the selections guaranteed so far
/// and never adds to the guarantees of its parent. Nodes left without
/// selections are removed.
pub fn transform(context: &CompilerContext) -> Result<CompilerContext> {
    context.try_map(|definition| {
        let mut definition = Definition::clone(definition);
        let selections = std::mem::take(definition.selections_mut());
        let (selections, _) = skip_redundant(selections, SelectionMap::default());
        if selections.is_empty() {
            return Ok(None);
        }
        *definition.selections_mut() = selections;
        Ok(Some(definition))
    })
}

/// Identifiers already fetched at one level, with the guarantees of each
/// linked field's or conditional branch's own level nested beneath them.
#[derive(Clone, Debug, Default)]
struct SelectionMap(HashMap<String, Option<SelectionMap>>);

fn skip_redundant(
    mut selections: Vec<Selection>,
    mut map: SelectionMap,
) -> (Vec<Selection>, SelectionMap) {
    selections.sort_by_key(Selection::is_conditional);

    let mut kept = Vec::with_capacity(selections.len());
    for mut selection in selections {
        let identifier = selection.identifier();
        if matches!(selection, Selection::FragmentSpread(_) | Selection::ScalarField(_)) {
            if !map.0.contains_key(&identifier) {
                map.0.insert(identifier, None);
                kept.push(selection);
            }
            continue;
        }

        let nested = match (&selection, map.0.get(&identifier)) {
            (_, Some(Some(nested))) => nested.clone(),
            (Selection::LinkedField(_), _) => SelectionMap::default(),
            _ => map.clone(),
        };

        let Some(children) = selection.selections_mut() else {
            continue;
        };
        let (remaining, nested) = skip_redundant(std::mem::take(children), nested);
        if remaining.is_empty() {
            continue;
        }
        *children = remaining;
        map.0.insert(identifier, Some(nested));
        kept.push(selection);
    }
    (kept, map)
}
