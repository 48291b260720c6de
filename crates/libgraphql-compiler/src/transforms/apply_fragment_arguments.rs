use crate::context::CompilerContext;
use crate::ir::Argument;
use crate::ir::ArgumentDefinition;
use crate::ir::Condition;
use crate::ir::Definition;
use crate::ir::Directive;
use crate::ir::Fragment;
use crate::ir::FragmentSpread;
use crate::ir::Root;
use crate::ir::Selection;
use crate::transforms::TransformError;
use crate::value::Value;
use indexmap::IndexMap;
use sha2::Digest;
use sha2::Sha256;
use std::collections::HashSet;
use std::sync::Arc;

type Result<T> = std::result::Result<T, TransformError>;

/// Values visible to the body of one definition, keyed by variable name.
type Scope = IndexMap<String, Value>;

const HASH_LENGTH: usize = 8;

/// Specialize every fragment reachable from a root with the argument values
/// bound at its spread.
///
/// Local (`@argumentDefinitions`) variables are replaced by their bound
/// value or default, root variables pass through from the operation. A
/// fragment spread with explicit bindings is pointed at a copy of the
/// fragment named `<Name>_<hash>`. Guards that become literals are resolved.
/// The result holds the roots and the specialized fragments they reach.
pub fn transform(context: &CompilerContext) -> Result<CompilerContext> {
    let mut applier = FragmentArgumentApplier {
        context,
        input_names: context.names().collect(),
        specializations: IndexMap::new(),
    };

    let mut roots = vec![];
    for definition in context.documents() {
        if let Definition::Root(root) = definition.as_ref() {
            if let Some(root) = applier.apply_root(root)? {
                roots.push(Definition::Root(root));
            }
        }
    }

    let fragments = applier.specializations.into_values()
        .filter_map(|specialization| match specialization {
            Specialization::Done(fragment) => fragment,
            Specialization::InProgress => None,
        })
        .map(Definition::Fragment);

    Ok(CompilerContext::new(Arc::clone(context.schema())).add_all(roots.into_iter().chain(fragments))?)
}

enum Specialization {
    /// Still being specialized further up the stack.
    InProgress,

    /// `None` when every selection of the fragment was removed.
    Done(Option<Fragment>),
}

struct FragmentArgumentApplier<'a> {
    context: &'a CompilerContext,
    input_names: HashSet<&'a str>,
    specializations: IndexMap<String, Specialization>,
}
impl<'a> FragmentArgumentApplier<'a> {
    fn apply_root(&mut self, root: &Root) -> Result<Option<Root>> {
        let scope: Scope = root.argument_definitions.iter()
            .filter_map(|arg_def| match arg_def {
                ArgumentDefinition::Local { name, .. } =>
                    Some((name.to_owned(), Value::Variable(name.to_owned()))),
                ArgumentDefinition::Root { .. } => None,
            })
            .collect();

        let selections = self.apply_selections(&root.selections, &scope, &root.name)?;
        if selections.is_empty() {
            return Ok(None);
        }
        Ok(Some(Root {
            directives: resolve_directives(&root.directives, &scope, &root.name)?,
            selections,
            ..root.clone()
        }))
    }

    fn apply_selections(
        &mut self,
        selections: &[Selection],
        scope: &Scope,
        definition_name: &str,
    ) -> Result<Vec<Selection>> {
        let mut applied = Vec::with_capacity(selections.len());
        for selection in selections {
            match selection {
                Selection::Condition(condition) => {
                    let guard = resolve_value(&condition.condition, scope, definition_name)?;
                    let selections = match guard {
                        Value::Boolean(value) if value != condition.passing_value => continue,
                        _ => self.apply_selections(&condition.selections, scope, definition_name)?,
                    };
                    if selections.is_empty() {
                        continue;
                    }
                    if guard.as_bool().is_some() {
                        applied.extend(selections);
                    } else {
                        applied.push(Selection::Condition(Condition {
                            condition: guard,
                            location: condition.location.to_owned(),
                            passing_value: condition.passing_value,
                            selections,
                        }));
                    }
                },

                Selection::FragmentSpread(spread) => {
                    let Some(name) = self.specialize(spread, scope, definition_name)? else {
                        continue;
                    };
                    applied.push(Selection::FragmentSpread(FragmentSpread {
                        arguments: vec![],
                        directives: resolve_directives(&spread.directives, scope, definition_name)?,
                        location: spread.location.to_owned(),
                        name,
                    }));
                },

                Selection::InlineFragment(inline) => {
                    let selections = self.apply_selections(&inline.selections, scope, definition_name)?;
                    if selections.is_empty() {
                        continue;
                    }
                    let mut inline = inline.clone();
                    inline.directives = resolve_directives(&inline.directives, scope, definition_name)?;
                    inline.selections = selections;
                    applied.push(Selection::InlineFragment(inline));
                },

                Selection::LinkedField(field) => {
                    let selections = self.apply_selections(&field.selections, scope, definition_name)?;
                    if selections.is_empty() {
                        continue;
                    }
                    let mut field = field.clone();
                    field.arguments = resolve_arguments(&field.arguments, scope, definition_name)?;
                    field.directives = resolve_directives(&field.directives, scope, definition_name)?;
                    field.selections = selections;
                    applied.push(Selection::LinkedField(field));
                },

                Selection::ScalarField(field) => {
                    let mut field = field.clone();
                    field.arguments = resolve_arguments(&field.arguments, scope, definition_name)?;
                    field.directives = resolve_directives(&field.directives, scope, definition_name)?;
                    applied.push(Selection::ScalarField(field));
                },
            }
        }
        Ok(applied)
    }

    /// Returns the name of the specialized fragment `spread` should point
    /// at, or `None` when that fragment ended up empty.
    fn specialize(
        &mut self,
        spread: &FragmentSpread,
        parent_scope: &Scope,
        referenced_from: &str,
    ) -> Result<Option<String>> {
        let context = self.context;
        let Some(fragment) = context.get(&spread.name).and_then(|def| def.as_fragment()) else {
            return Err(TransformError::UnknownFragment {
                fragment_name: spread.name.to_owned(),
                referenced_from: referenced_from.to_string(),
            });
        };

        let mut bindings = IndexMap::with_capacity(spread.arguments.len());
        for arg in &spread.arguments {
            bindings.insert(
                arg.name.to_owned(),
                resolve_value(&arg.value, parent_scope, referenced_from)?,
            );
        }
        let scope = fragment_scope(fragment, &bindings, parent_scope)?;

        let name =
            if bindings.is_empty() {
                fragment.name.to_owned()
            } else {
                let name = specialized_name(&fragment.name, &bindings);
                if self.input_names.contains(name.as_str()) {
                    return Err(TransformError::SpecializedNameCollision {
                        fragment_name: fragment.name.to_owned(),
                        specialized_name: name,
                    });
                }
                name
            };

        match self.specializations.get(&name) {
            Some(Specialization::InProgress) => return Err(TransformError::FragmentCycle {
                fragment_name: fragment.name.to_owned(),
            }),
            Some(Specialization::Done(done)) =>
                return Ok(done.as_ref().map(|fragment| fragment.name.to_owned())),
            None => (),
        }

        self.specializations.insert(name.to_owned(), Specialization::InProgress);
        let selections = self.apply_selections(&fragment.selections, &scope, &fragment.name)?;
        let specialized =
            if selections.is_empty() {
                None
            } else {
                Some(Fragment {
                    argument_definitions: vec![],
                    directives: resolve_directives(&fragment.directives, &scope, &fragment.name)?,
                    location: fragment.location.to_owned(),
                    metadata: fragment.metadata.clone(),
                    name: name.to_owned(),
                    selections,
                    type_condition: fragment.type_condition.to_owned(),
                })
            };
        let result = specialized.as_ref().map(|_| name.to_owned());
        self.specializations.insert(name, Specialization::Done(specialized));
        Ok(result)
    }
}

/// The scope a fragment body sees when spread with `bindings` from a
/// definition whose own scope is `parent_scope`.
fn fragment_scope(
    fragment: &Fragment,
    bindings: &IndexMap<String, Value>,
    parent_scope: &Scope,
) -> Result<Scope> {
    for name in bindings.keys() {
        let is_local = fragment.argument_definitions.iter().any(|arg_def| {
            matches!(arg_def, ArgumentDefinition::Local { name: local, .. } if local == name)
        });
        if !is_local {
            return Err(TransformError::UnexpectedFragmentArgument {
                argument_name: name.to_owned(),
                fragment_name: fragment.name.to_owned(),
            });
        }
    }

    let mut scope = Scope::with_capacity(fragment.argument_definitions.len());
    for arg_def in &fragment.argument_definitions {
        match arg_def {
            ArgumentDefinition::Local { default_value, name, type_ref } => {
                let value = match bindings.get(name) {
                    Some(bound) if *bound != Value::Null => bound.clone(),
                    _ => match default_value {
                        Some(default_value) => default_value.clone(),
                        None if type_ref.is_non_null() =>
                            return Err(TransformError::MissingFragmentArgument {
                                argument_name: name.to_owned(),
                                fragment_name: fragment.name.to_owned(),
                                type_name: type_ref.to_string(),
                            }),
                        None => Value::Null,
                    },
                };
                scope.insert(name.to_owned(), value);
            },
            ArgumentDefinition::Root { name, .. } => {
                let value = parent_scope.get(name)
                    .cloned()
                    .unwrap_or_else(|| Value::Variable(name.to_owned()));
                scope.insert(name.to_owned(), value);
            },
        }
    }
    Ok(scope)
}

/// `<name>_<hash>`, where the hash is taken over the bindings sorted by
/// argument name so that the name is independent of binding order.
fn specialized_name(fragment_name: &str, bindings: &IndexMap<String, Value>) -> String {
    let mut sorted: Vec<_> = bindings.iter().collect();
    sorted.sort_by(|(a, _), (b, _)| a.cmp(b));
    let printed = sorted.into_iter()
        .map(|(name, value)| format!("{name}:{}", value.to_graphql_string()))
        .collect::<Vec<_>>()
        .join(",");

    let digest = Sha256::digest(printed.as_bytes());
    let hash: String = digest.iter()
        .map(|byte| format!("{byte:02x}"))
        .collect();
    format!("{fragment_name}_{}", &hash[..HASH_LENGTH])
}

fn resolve_value(value: &Value, scope: &Scope, definition_name: &str) -> Result<Value> {
    Ok(match value {
        Value::Variable(name) => match scope.get(name) {
            Some(bound) => bound.clone(),
            None => return Err(TransformError::VariableNotInScope {
                definition_name: definition_name.to_string(),
                variable_name: name.to_owned(),
            }),
        },
        Value::List(values) => Value::List(
            values.iter()
                .map(|value| resolve_value(value, scope, definition_name))
                .collect::<Result<_>>()?,
        ),
        Value::Object(entries) => {
            let mut resolved = IndexMap::with_capacity(entries.len());
            for (key, value) in entries {
                resolved.insert(key.to_owned(), resolve_value(value, scope, definition_name)?);
            }
            Value::Object(resolved)
        },
        constant => constant.clone(),
    })
}

fn resolve_arguments(
    arguments: &[Argument],
    scope: &Scope,
    definition_name: &str,
) -> Result<Vec<Argument>> {
    arguments.iter()
        .map(|arg| Ok(Argument {
            value: resolve_value(&arg.value, scope, definition_name)?,
            ..arg.clone()
        }))
        .collect()
}

fn resolve_directives(
    directives: &[Directive],
    scope: &Scope,
    definition_name: &str,
) -> Result<Vec<Directive>> {
    directives.iter()
        .map(|directive| Ok(Directive {
            arguments: resolve_arguments(&directive.arguments, scope, definition_name)?,
            ..directive.clone()
        }))
        .collect()
}
