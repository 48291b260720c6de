use crate::ast;
use crate::ast_convert::AstConvertError;
use crate::document::Document;
use crate::ir;
use crate::ir::ArgumentDefinition;
use crate::ir::DirectiveKind;
use crate::ir::OperationKind;
use crate::loc;
use crate::schema::Schema;
use crate::schema::TypeRef;
use crate::value::Value;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, AstConvertError>;

/// Lower one (already validated) executable definition to IR.
pub(crate) fn lower_definition(
    schema: &Schema,
    document: &Document,
    definition: &ast::query::Definition,
) -> Result<ir::Definition> {
    let mut lowerer = Lowerer {
        document,
        local_variables: IndexMap::new(),
        root_variables: IndexMap::new(),
        schema,
    };
    match definition {
        ast::query::Definition::Fragment(frag) => lowerer.lower_fragment(frag),
        ast::query::Definition::Operation(op) => lowerer.lower_operation(op),
    }
}

struct Lowerer<'a> {
    document: &'a Document,
    local_variables: IndexMap<String, TypeRef>,
    /// Variables a fragment references without declaring them, with the
    /// type of their first typed usage.
    root_variables: IndexMap<String, Option<TypeRef>>,
    schema: &'a Schema,
}
impl Lowerer<'_> {
    fn location(&self, pos: graphql_parser::Pos) -> loc::SourceLocation {
        loc::SourceLocation::from_pos(Some(self.document.file_path()), pos)
    }

    fn lower_fragment(&mut self, frag: &ast::query::FragmentDefinition) -> Result<ir::Definition> {
        let ast::query::TypeCondition::On(type_condition) = &frag.type_condition;
        let location = self.location(frag.position);
        if self.schema.get_type(type_condition).is_none() {
            return Err(AstConvertError::UnknownType {
                location,
                type_name: type_condition.to_string(),
            });
        }

        let mut local_arguments = vec![];
        let mut directives = vec![];
        for directive in &frag.directives {
            if DirectiveKind::from_name(&directive.name) == DirectiveKind::ArgumentDefinitions {
                for (arg_name, arg_value) in &directive.arguments {
                    let local = self.lower_argument_definition(
                        &frag.name,
                        directive.position,
                        arg_name,
                        arg_value,
                    )?;
                    if let ArgumentDefinition::Local { name, type_ref, .. } = &local {
                        self.local_variables.insert(name.to_owned(), type_ref.to_owned());
                    }
                    local_arguments.push(local);
                }
            } else {
                directives.push(self.lower_directive(directive));
            }
        }

        let selections = self.lower_selection_set(type_condition, &frag.selection_set)?;

        let mut argument_definitions = local_arguments;
        argument_definitions.extend(
            self.root_variables.drain(..).map(|(name, type_ref)| {
                ArgumentDefinition::Root { name, type_ref }
            }),
        );

        Ok(ir::Definition::Fragment(ir::Fragment {
            argument_definitions,
            directives,
            location,
            metadata: ir::Metadata::new(),
            name: frag.name.to_string(),
            selections,
            type_condition: type_condition.to_string(),
        }))
    }

    fn lower_argument_definition(
        &self,
        fragment_name: &str,
        position: graphql_parser::Pos,
        arg_name: &str,
        arg_value: &ast::query::Value,
    ) -> Result<ArgumentDefinition> {
        let invalid = |reason: &str| AstConvertError::InvalidArgumentDefinition {
            argument_name: arg_name.to_string(),
            fragment_name: fragment_name.to_string(),
            location: self.location(position),
            reason: reason.to_string(),
        };

        let value = Value::from_ast(arg_value);
        let entries = value.as_object()
            .ok_or_else(|| invalid("expected an object like `{type: \"Int\"}`"))?;
        let type_annotation = entries.get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid("expected a string `type` entry"))?;
        let type_ref = TypeRef::parse(type_annotation)
            .ok_or_else(|| invalid("the `type` entry is not a valid type annotation"))?;
        if self.schema.get_type(type_ref.innermost_name()).is_none() {
            return Err(invalid("the `type` entry names an unknown type"));
        }

        Ok(ArgumentDefinition::Local {
            default_value: entries.get("defaultValue").cloned(),
            name: arg_name.to_string(),
            type_ref,
        })
    }

    fn lower_operation(&mut self, op: &ast::query::OperationDefinition) -> Result<ir::Definition> {
        use ast::query::OperationDefinition;
        let (operation, name, position, var_defs, directives, selection_set) = match op {
            OperationDefinition::SelectionSet(set) =>
                (OperationKind::Query, None, set.span.0, &[][..], &[][..], set),
            OperationDefinition::Query(query) => (
                OperationKind::Query,
                query.name.as_ref(),
                query.position,
                &query.variable_definitions[..],
                &query.directives[..],
                &query.selection_set,
            ),
            OperationDefinition::Mutation(mutation) => (
                OperationKind::Mutation,
                mutation.name.as_ref(),
                mutation.position,
                &mutation.variable_definitions[..],
                &mutation.directives[..],
                &mutation.selection_set,
            ),
            OperationDefinition::Subscription(subscription) => (
                OperationKind::Subscription,
                subscription.name.as_ref(),
                subscription.position,
                &subscription.variable_definitions[..],
                &subscription.directives[..],
                &subscription.selection_set,
            ),
        };

        let location = self.location(position);
        let Some(name) = name else {
            return Err(AstConvertError::AnonymousOperation { location, operation });
        };
        let schema = self.schema;
        let Some(type_name) = schema.root_type_name(operation) else {
            return Err(AstConvertError::UnsupportedOperation { location, operation });
        };

        let argument_definitions = var_defs.iter().map(|var_def| {
            let type_ref = TypeRef::from_ast(&var_def.var_type);
            self.local_variables.insert(var_def.name.to_string(), type_ref.to_owned());
            ArgumentDefinition::Local {
                default_value: var_def.default_value.as_ref().map(Value::from_ast),
                name: var_def.name.to_string(),
                type_ref,
            }
        }).collect();

        let directives = directives.iter()
            .map(|directive| self.lower_directive(directive))
            .collect();
        let selections = self.lower_selection_set(type_name, selection_set)?;

        Ok(ir::Definition::Root(ir::Root {
            argument_definitions,
            directives,
            location,
            metadata: ir::Metadata::new(),
            name: name.to_string(),
            operation,
            selections,
            type_name: type_name.to_string(),
        }))
    }

    fn lower_selection_set(
        &mut self,
        parent_type_name: &str,
        selection_set: &ast::query::SelectionSet,
    ) -> Result<Vec<ir::Selection>> {
        selection_set.items.iter()
            .map(|selection| self.lower_selection(parent_type_name, selection))
            .collect()
    }

    fn lower_selection(
        &mut self,
        parent_type_name: &str,
        selection: &ast::query::Selection,
    ) -> Result<ir::Selection> {
        match selection {
            ast::query::Selection::Field(field) => {
                let location = self.location(field.position);
                let schema = self.schema;
                let field_def = schema.field(parent_type_name, &field.name)
                    .ok_or_else(|| AstConvertError::UnknownField {
                        field_name: field.name.to_string(),
                        location: location.to_owned(),
                        type_name: parent_type_name.to_string(),
                    })?;

                let arguments = field.arguments.iter().map(|(arg_name, arg_value)| {
                    let type_ref = field_def.arguments().get(arg_name)
                        .map(|arg_def| arg_def.type_ref().to_owned());
                    self.lower_argument(arg_name, arg_value, type_ref)
                }).collect();
                let (conditions, directives) = self.split_conditions(&field.directives)?;

                let type_ref = field_def.type_ref().to_owned();
                let field_type_name = type_ref.innermost_name();
                let lowered =
                    if schema.is_composite(field_type_name) {
                        let selections =
                            self.lower_selection_set(field_type_name, &field.selection_set)?;
                        ir::Selection::LinkedField(ir::LinkedField {
                            alias: field.alias.to_owned(),
                            arguments,
                            directives,
                            handles: vec![],
                            location,
                            name: field.name.to_string(),
                            selections,
                            type_ref,
                        })
                    } else {
                        ir::Selection::ScalarField(ir::ScalarField {
                            alias: field.alias.to_owned(),
                            arguments,
                            directives,
                            handles: vec![],
                            location,
                            name: field.name.to_string(),
                            type_ref,
                        })
                    };
                Ok(wrap_in_conditions(lowered, conditions))
            },

            ast::query::Selection::FragmentSpread(spread) => {
                let mut arguments = vec![];
                let mut other_directives = vec![];
                for directive in &spread.directives {
                    if DirectiveKind::from_name(&directive.name) == DirectiveKind::Arguments {
                        for (arg_name, arg_value) in &directive.arguments {
                            arguments.push(self.lower_argument(arg_name, arg_value, None));
                        }
                    } else {
                        other_directives.push(directive.to_owned());
                    }
                }
                let (conditions, directives) = self.split_conditions(&other_directives)?;
                let lowered = ir::Selection::FragmentSpread(ir::FragmentSpread {
                    arguments,
                    directives,
                    location: self.location(spread.position),
                    name: spread.fragment_name.to_string(),
                });
                Ok(wrap_in_conditions(lowered, conditions))
            },

            ast::query::Selection::InlineFragment(inline) => {
                let type_condition = match &inline.type_condition {
                    Some(ast::query::TypeCondition::On(type_name)) => type_name.as_str(),
                    None => parent_type_name,
                };
                let (conditions, directives) = self.split_conditions(&inline.directives)?;
                let selections = self.lower_selection_set(type_condition, &inline.selection_set)?;
                let lowered = ir::Selection::InlineFragment(ir::InlineFragment {
                    directives,
                    location: self.location(inline.position),
                    selections,
                    type_condition: type_condition.to_string(),
                });
                Ok(wrap_in_conditions(lowered, conditions))
            },
        }
    }

    fn lower_argument(
        &mut self,
        name: &str,
        ast_value: &ast::query::Value,
        type_ref: Option<TypeRef>,
    ) -> ir::Argument {
        let value = Value::from_ast(ast_value);
        if let Value::Variable(variable_name) = &value {
            self.record_variable(variable_name, type_ref.as_ref());
        } else {
            let mut variables = vec![];
            value.collect_variables(&mut variables);
            for variable_name in &variables {
                self.record_variable(variable_name, None);
            }
        }
        ir::Argument {
            name: name.to_string(),
            type_ref,
            value,
        }
    }

    fn lower_directive(&mut self, directive: &ast::query::Directive) -> ir::Directive {
        let schema = self.schema;
        let directive_def = schema.directive(&directive.name);
        let arguments = directive.arguments.iter().map(|(arg_name, arg_value)| {
            let type_ref = directive_def
                .and_then(|def| def.arguments().get(arg_name))
                .map(|arg_def| arg_def.type_ref().to_owned());
            self.lower_argument(arg_name, arg_value, type_ref)
        }).collect();
        ir::Directive {
            arguments,
            kind: DirectiveKind::from_name(&directive.name),
            location: self.location(directive.position),
        }
    }

    fn record_variable(&mut self, name: &str, type_ref: Option<&TypeRef>) {
        if self.local_variables.contains_key(name) {
            return;
        }
        let entry = self.root_variables.entry(name.to_string()).or_insert(None);
        if entry.is_none() {
            *entry = type_ref.cloned();
        }
    }

    /// Separate `@include`/`@skip` from the other directives on a selection.
    fn split_conditions(
        &mut self,
        directives: &[ast::query::Directive],
    ) -> Result<(Vec<(Value, bool, loc::SourceLocation)>, Vec<ir::Directive>)> {
        let mut conditions = vec![];
        let mut others = vec![];
        for directive in directives {
            let passing_value = match DirectiveKind::from_name(&directive.name) {
                DirectiveKind::Include => true,
                DirectiveKind::Skip => false,
                _ => {
                    others.push(self.lower_directive(directive));
                    continue;
                },
            };
            let location = self.location(directive.position);
            let condition = directive.arguments.iter()
                .find(|(arg_name, _)| arg_name == "if")
                .map(|(_, value)| Value::from_ast(value));
            match condition {
                Some(Value::Variable(variable_name)) => {
                    self.record_variable(&variable_name, Some(&TypeRef::named("Boolean").non_null()));
                    conditions.push((Value::Variable(variable_name), passing_value, location));
                },
                Some(literal @ Value::Boolean(_)) =>
                    conditions.push((literal, passing_value, location)),
                _ => return Err(AstConvertError::InvalidConditionValue {
                    directive_name: directive.name.to_string(),
                    location,
                }),
            }
        }
        Ok((conditions, others))
    }
}

/// Wrap `selection` so that the first condition written is the outermost.
fn wrap_in_conditions(
    selection: ir::Selection,
    conditions: Vec<(Value, bool, loc::SourceLocation)>,
) -> ir::Selection {
    conditions.into_iter().rev().fold(selection, |inner, (condition, passing_value, location)| {
        ir::Selection::Condition(ir::Condition {
            condition,
            location,
            passing_value,
            selections: vec![inner],
        })
    })
}
