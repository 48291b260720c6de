use crate::context::CompilerContext;
use crate::ir::Definition;
use crate::ir::FragmentSpread;
use crate::ir::InlineFragment;
use crate::ir::Selection;
use crate::transforms::TransformError;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, TransformError>;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct FlattenOptions {
    /// Inline fragments on interfaces and unions into their parent.
    pub flatten_abstract_types: bool,

    /// Replace every fragment spread with the fragment's selections. The
    /// fragments themselves are then dropped from the context.
    pub flatten_fragment_spreads: bool,
}
impl FlattenOptions {
    pub fn abstract_types() -> Self {
        Self {
            flatten_abstract_types: true,
            flatten_fragment_spreads: false,
        }
    }

    pub fn abstract_types_and_spreads() -> Self {
        Self {
            flatten_abstract_types: true,
            flatten_fragment_spreads: true,
        }
    }
}

/// Merge selection sets so that each identifier appears at most once per
/// level, inlining fragments as `options` allow.
///
/// Inline fragments whose type condition is the parent type are always
/// merged into the parent. Merging two fields that share a response key but
/// not a name and arguments is an error.
pub fn transform(context: &CompilerContext, options: FlattenOptions) -> Result<CompilerContext> {
    let mut flattener = Flattener {
        context,
        definition_name: String::new(),
        options,
        spread_stack: vec![],
    };
    context.try_map(|definition| {
        if options.flatten_fragment_spreads && definition.as_fragment().is_some() {
            return Ok(None);
        }
        let mut definition = Definition::clone(definition);
        flattener.definition_name = definition.name().to_string();
        let type_name = definition.type_name().to_string();
        let selections = std::mem::take(definition.selections_mut());
        *definition.selections_mut() = flattener.flatten(&type_name, selections)?;
        Ok(Some(definition))
    })
}

type SelectionMap = IndexMap<String, Selection>;

struct Flattener<'a> {
    context: &'a CompilerContext,
    definition_name: String,
    options: FlattenOptions,
    spread_stack: Vec<String>,
}
impl Flattener<'_> {
    fn flatten(&mut self, parent_type: &str, selections: Vec<Selection>) -> Result<Vec<Selection>> {
        let mut map = SelectionMap::new();
        self.flatten_into(&mut map, parent_type, selections)?;
        Ok(map.into_values().collect())
    }

    fn flatten_into(
        &mut self,
        map: &mut SelectionMap,
        parent_type: &str,
        selections: Vec<Selection>,
    ) -> Result<()> {
        for selection in selections {
            match selection {
                Selection::InlineFragment(inline) if self.should_inline(&inline, parent_type) =>
                    self.flatten_into(map, parent_type, inline.selections)?,

                Selection::FragmentSpread(spread) if self.options.flatten_fragment_spreads =>
                    self.flatten_spread(map, parent_type, spread)?,

                other => self.merge(map, parent_type, other)?,
            }
        }
        Ok(())
    }

    fn flatten_spread(
        &mut self,
        map: &mut SelectionMap,
        parent_type: &str,
        spread: FragmentSpread,
    ) -> Result<()> {
        let context = self.context;
        let Some(fragment) = context.get(&spread.name).and_then(|def| def.as_fragment()) else {
            return Err(TransformError::UnknownFragment {
                fragment_name: spread.name,
                referenced_from: self.definition_name.to_owned(),
            });
        };
        if self.spread_stack.contains(&fragment.name) {
            return Err(TransformError::FragmentCycle {
                fragment_name: fragment.name.to_owned(),
            });
        }

        self.spread_stack.push(fragment.name.to_owned());
        let result =
            if fragment.type_condition == parent_type {
                self.flatten_into(map, parent_type, fragment.selections.clone())
            } else {
                let inline = InlineFragment {
                    directives: spread.directives,
                    location: spread.location,
                    selections: fragment.selections.clone(),
                    type_condition: fragment.type_condition.to_owned(),
                };
                self.flatten_into(map, parent_type, vec![Selection::InlineFragment(inline)])
            };
        self.spread_stack.pop();
        result
    }

    /// Flatten the children of `selection`, then add it to `map`, merging it
    /// with any sibling that has the same identifier.
    fn merge(
        &mut self,
        map: &mut SelectionMap,
        parent_type: &str,
        mut selection: Selection,
    ) -> Result<()> {
        let child_type = match &selection {
            Selection::Condition(_) => Some(parent_type.to_string()),
            Selection::InlineFragment(inline) => Some(inline.type_condition.to_owned()),
            Selection::LinkedField(field) => Some(field.type_ref.innermost_name().to_string()),
            Selection::FragmentSpread(_) | Selection::ScalarField(_) => None,
        };
        if let Some(child_type) = child_type {
            if let Some(children) = selection.selections_mut() {
                let taken = std::mem::take(children);
                *children = self.flatten(&child_type, taken)?;
            }
        }

        let identifier = selection.identifier();
        let Some(existing) = map.get_mut(&identifier) else {
            map.insert(identifier, selection);
            return Ok(());
        };

        let conflict = || TransformError::FlattenConflict {
            definition_name: self.definition_name.to_owned(),
            response_key: identifier.to_owned(),
        };
        let (existing_children, incoming_children, child_type) = match (existing, selection) {
            (Selection::LinkedField(existing), Selection::LinkedField(incoming)) => {
                if existing.name != incoming.name || existing.arguments != incoming.arguments {
                    return Err(conflict());
                }
                merge_handles(&mut existing.handles, incoming.handles);
                let child_type = existing.type_ref.innermost_name().to_string();
                (&mut existing.selections, incoming.selections, child_type)
            },
            (Selection::ScalarField(existing), Selection::ScalarField(incoming)) => {
                if existing.name != incoming.name || existing.arguments != incoming.arguments {
                    return Err(conflict());
                }
                merge_handles(&mut existing.handles, incoming.handles);
                return Ok(());
            },
            (Selection::InlineFragment(existing), Selection::InlineFragment(incoming)) => {
                let child_type = existing.type_condition.to_owned();
                (&mut existing.selections, incoming.selections, child_type)
            },
            (Selection::Condition(existing), Selection::Condition(incoming)) =>
                (&mut existing.selections, incoming.selections, parent_type.to_string()),
            (Selection::FragmentSpread(_), Selection::FragmentSpread(_)) => return Ok(()),
            _ => return Err(conflict()),
        };

        let mut merged = SelectionMap::new();
        for child in std::mem::take(existing_children) {
            merged.insert(child.identifier(), child);
        }
        self.flatten_into(&mut merged, &child_type, incoming_children)?;
        *existing_children = merged.into_values().collect();
        Ok(())
    }

    fn should_inline(&self, inline: &InlineFragment, parent_type: &str) -> bool {
        if !inline.directives.is_empty() {
            return false;
        }
        inline.type_condition == parent_type
            || (self.options.flatten_abstract_types
                && self.context.schema().is_abstract(&inline.type_condition))
    }
}

fn merge_handles(existing: &mut Vec<String>, incoming: Vec<String>) {
    for handle in incoming {
        if !existing.contains(&handle) {
            existing.push(handle);
        }
    }
}
