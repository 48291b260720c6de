use crate::context::CompilerContext;
use crate::ir::Definition;
use crate::ir::Fragment;
use crate::ir::Root;
use crate::ir::Selection;
use crate::transforms::TransformError;
use crate::value::Value;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, TransformError>;

/// Remove selections that can never be fetched, and the fragments no root
/// reaches.
///
/// A condition with a literal guard is unwrapped when the guard passes and
/// removed when it fails. Nodes left without selections are removed, as are
/// spreads of fragments that are missing or were emptied.
pub fn transform(context: &CompilerContext) -> Result<CompilerContext> {
    let mut visitor = ReachabilityVisitor {
        context,
        fragments: IndexMap::new(),
    };

    let mut roots = IndexMap::new();
    for definition in context.documents() {
        if let Definition::Root(root) = definition.as_ref() {
            let reached = visitor.visit_root(root)?;
            roots.insert(root.name.to_owned(), reached);
        }
    }

    let mut fragments = visitor.fragments;
    context.try_map(|definition| Ok(match definition.as_ref() {
        Definition::Fragment(fragment) => match fragments.shift_remove(&fragment.name) {
            Some(Reachability::Reached(Some(fragment))) => Some(Definition::Fragment(fragment)),
            _ => None,
        },
        Definition::Root(root) =>
            roots.shift_remove(&root.name).flatten().map(Definition::Root),
    }))
}

enum Reachability {
    Visiting,

    /// `None` when nothing in the fragment survived.
    Reached(Option<Fragment>),
}

struct ReachabilityVisitor<'a> {
    context: &'a CompilerContext,
    fragments: IndexMap<String, Reachability>,
}
impl ReachabilityVisitor<'_> {
    fn visit_root(&mut self, root: &Root) -> Result<Option<Root>> {
        let selections = self.visit_selections(&root.selections)?;
        if selections.is_empty() {
            return Ok(None);
        }
        Ok(Some(Root {
            selections,
            ..root.clone()
        }))
    }

    /// Whether a spread of `name` should be kept.
    fn visit_fragment(&mut self, name: &str) -> Result<bool> {
        match self.fragments.get(name) {
            Some(Reachability::Visiting) => return Err(TransformError::FragmentCycle {
                fragment_name: name.to_string(),
            }),
            Some(Reachability::Reached(fragment)) => return Ok(fragment.is_some()),
            None => (),
        }

        let context = self.context;
        let Some(fragment) = context.get(name).and_then(|def| def.as_fragment()) else {
            return Ok(false);
        };

        self.fragments.insert(name.to_string(), Reachability::Visiting);
        let selections = self.visit_selections(&fragment.selections)?;
        let reached =
            if selections.is_empty() {
                None
            } else {
                Some(Fragment {
                    selections,
                    ..fragment.clone()
                })
            };
        let is_reached = reached.is_some();
        self.fragments.insert(name.to_string(), Reachability::Reached(reached));
        Ok(is_reached)
    }

    fn visit_selections(&mut self, selections: &[Selection]) -> Result<Vec<Selection>> {
        let mut visited = Vec::with_capacity(selections.len());
        for selection in selections {
            match selection {
                Selection::Condition(condition) => {
                    let selections = match &condition.condition {
                        Value::Boolean(value) if *value != condition.passing_value => continue,
                        _ => self.visit_selections(&condition.selections)?,
                    };
                    if selections.is_empty() {
                        continue;
                    }
                    if condition.condition.as_bool().is_some() {
                        visited.extend(selections);
                    } else {
                        let mut condition = condition.clone();
                        condition.selections = selections;
                        visited.push(Selection::Condition(condition));
                    }
                },

                Selection::FragmentSpread(spread) => {
                    if self.visit_fragment(&spread.name)? {
                        visited.push(selection.clone());
                    }
                },

                Selection::ScalarField(_) => visited.push(selection.clone()),

                Selection::InlineFragment(_) | Selection::LinkedField(_) => {
                    let children = selection.selections().unwrap_or_default();
                    let children = self.visit_selections(children)?;
                    if children.is_empty() {
                        continue;
                    }
                    let mut selection = selection.clone();
                    if let Some(slot) = selection.selections_mut() {
                        *slot = children;
                    }
                    visited.push(selection);
                },
            }
        }
        Ok(visited)
    }
}
