use crate::ast;
use crate::ast::schema::DirectiveLocation;
use crate::ast_convert::ValidationError;
use crate::ast_convert::ValidationErrors;
use crate::ast_convert::ValidationRule;
use crate::document::Document;
use crate::ir::OperationKind;
use crate::loc;
use crate::schema::Schema;
use crate::schema::TypeRef;
use std::collections::HashMap;

/// Validate `definitions` as though they were a single document, collecting
/// every violation of the enabled `rules`.
pub(crate) fn validate_definitions(
    schema: &Schema,
    definitions: &[(&Document, &ast::query::Definition)],
    rules: &[ValidationRule],
) -> Result<(), ValidationErrors> {
    let fragment_types: HashMap<&str, &str> = definitions.iter()
        .filter_map(|(_, def)| match def {
            ast::query::Definition::Fragment(frag) => {
                let ast::query::TypeCondition::On(type_name) = &frag.type_condition;
                Some((frag.name.as_str(), type_name.as_str()))
            },
            ast::query::Definition::Operation(_) => None,
        })
        .collect();

    let mut validator = Validator {
        errors: vec![],
        fragment_types,
        rules,
        schema,
    };

    let operation_count = definitions.iter()
        .filter(|(_, def)| matches!(def, ast::query::Definition::Operation(_)))
        .count();

    for (document, definition) in definitions {
        validator.validate_definition(document, definition, operation_count);
    }

    if validator.errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(validator.errors))
    }
}

struct Validator<'a> {
    errors: Vec<ValidationError>,
    fragment_types: HashMap<&'a str, &'a str>,
    rules: &'a [ValidationRule],
    schema: &'a Schema,
}
impl<'a> Validator<'a> {
    fn enabled(&self, rule: ValidationRule) -> bool {
        self.rules.contains(&rule)
    }

    fn report(
        &mut self,
        document: &Document,
        pos: graphql_parser::Pos,
        message: String,
    ) {
        let location = loc::FilePosition::from_pos(Some(document.file_path()), pos);
        let preview = document.source_line(pos.line).map(str::to_string);
        self.errors.push(ValidationError {
            location: Some(location),
            message,
            preview,
        });
    }

    fn validate_definition(
        &mut self,
        document: &Document,
        definition: &ast::query::Definition,
        operation_count: usize,
    ) {
        use ast::query::OperationDefinition;
        match definition {
            ast::query::Definition::Fragment(frag) => {
                let ast::query::TypeCondition::On(type_name) = &frag.type_condition;
                self.validate_directives(
                    document,
                    &frag.directives,
                    DirectiveLocation::FragmentDefinition,
                );
                if !self.validate_type_condition(document, frag.position, type_name, Some(&frag.name)) {
                    return;
                }
                self.validate_selection_set(document, type_name, &frag.selection_set);
            },

            ast::query::Definition::Operation(op) => {
                let (kind, name, position, var_defs, directives, selection_set) = match op {
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

                if name.is_none()
                    && operation_count > 1
                    && self.enabled(ValidationRule::LoneAnonymousOperation) {
                    self.report(
                        document,
                        position,
                        "This anonymous operation must be the only defined operation.".to_string(),
                    );
                }

                for var_def in var_defs {
                    self.validate_variable_definition(document, var_def);
                }

                let directive_location = match kind {
                    OperationKind::Mutation => DirectiveLocation::Mutation,
                    OperationKind::Query => DirectiveLocation::Query,
                    OperationKind::Subscription => DirectiveLocation::Subscription,
                };
                self.validate_directives(document, directives, directive_location);

                let Some(root_type_name) = self.schema.root_type_name(kind) else {
                    self.report(
                        document,
                        position,
                        format!("Schema is not configured for {kind} operations."),
                    );
                    return;
                };
                self.validate_selection_set(document, root_type_name, selection_set);
            },
        }
    }

    fn validate_variable_definition(
        &mut self,
        document: &Document,
        var_def: &ast::query::VariableDefinition,
    ) {
        let type_ref = TypeRef::from_ast(&var_def.var_type);
        let type_name = type_ref.innermost_name();
        match self.schema.get_type(type_name) {
            None => {
                if self.enabled(ValidationRule::KnownTypeNames) {
                    self.report(
                        document,
                        var_def.position,
                        format!("Unknown type \"{type_name}\"."),
                    );
                }
            },
            Some(schema_type) => {
                if !schema_type.is_input_type()
                    && self.enabled(ValidationRule::VariablesAreInputTypes) {
                    self.report(
                        document,
                        var_def.position,
                        format!(
                            "Variable \"${}\" cannot be non-input type \"{type_ref}\".",
                            var_def.name,
                        ),
                    );
                }
            },
        }
    }

    /// Returns whether selections may be checked against `type_name`.
    fn validate_type_condition(
        &mut self,
        document: &Document,
        position: graphql_parser::Pos,
        type_name: &str,
        fragment_name: Option<&str>,
    ) -> bool {
        let Some(schema_type) = self.schema.get_type(type_name) else {
            if self.enabled(ValidationRule::KnownTypeNames) {
                self.report(document, position, format!("Unknown type \"{type_name}\"."));
            }
            return false;
        };

        if !schema_type.is_composite() {
            if self.enabled(ValidationRule::FragmentsOnCompositeTypes) {
                let message = match fragment_name {
                    Some(fragment_name) => format!(
                        "Fragment \"{fragment_name}\" cannot condition on non composite \
                        type \"{type_name}\".",
                    ),
                    None => format!(
                        "Fragment cannot condition on non composite type \"{type_name}\".",
                    ),
                };
                self.report(document, position, message);
            }
            return false;
        }

        true
    }

    fn validate_selection_set(
        &mut self,
        document: &Document,
        parent_type_name: &str,
        selection_set: &ast::query::SelectionSet,
    ) {
        for selection in &selection_set.items {
            match selection {
                ast::query::Selection::Field(field) =>
                    self.validate_field(document, parent_type_name, field),

                ast::query::Selection::FragmentSpread(spread) => {
                    self.validate_directives(
                        document,
                        &spread.directives,
                        DirectiveLocation::FragmentSpread,
                    );
                    let Some(frag_type_name) = self.fragment_types
                        .get(spread.fragment_name.as_str())
                        .copied() else {
                        continue;
                    };
                    if self.enabled(ValidationRule::PossibleFragmentSpreads)
                        && self.schema.get_type(frag_type_name).is_some()
                        && !self.schema.types_overlap(frag_type_name, parent_type_name) {
                        self.report(document, spread.position, format!(
                            "Fragment \"{}\" cannot be spread here as objects of type \
                            \"{parent_type_name}\" can never be of type \"{frag_type_name}\".",
                            spread.fragment_name,
                        ));
                    }
                },

                ast::query::Selection::InlineFragment(inline) => {
                    self.validate_directives(
                        document,
                        &inline.directives,
                        DirectiveLocation::InlineFragment,
                    );
                    let type_name = match &inline.type_condition {
                        Some(ast::query::TypeCondition::On(type_name)) => {
                            if !self.validate_type_condition(document, inline.position, type_name, None) {
                                continue;
                            }
                            if self.enabled(ValidationRule::PossibleFragmentSpreads)
                                && !self.schema.types_overlap(type_name, parent_type_name) {
                                self.report(document, inline.position, format!(
                                    "Fragment cannot be spread here as objects of type \
                                    \"{parent_type_name}\" can never be of type \"{type_name}\".",
                                ));
                            }
                            type_name.as_str()
                        },
                        None => parent_type_name,
                    };
                    self.validate_selection_set(document, type_name, &inline.selection_set);
                },
            }
        }
    }

    fn validate_field(
        &mut self,
        document: &Document,
        parent_type_name: &str,
        field: &ast::query::Field,
    ) {
        self.validate_directives(document, &field.directives, DirectiveLocation::Field);

        let schema = self.schema;
        let Some(field_def) = schema.field(parent_type_name, &field.name) else {
            if self.enabled(ValidationRule::FieldsOnCorrectType) {
                self.report(document, field.position, format!(
                    "Cannot query field \"{}\" on type \"{parent_type_name}\".",
                    field.name,
                ));
            }
            return;
        };

        if self.enabled(ValidationRule::KnownArgumentNames) {
            for (arg_name, _) in &field.arguments {
                if !field_def.arguments().contains_key(arg_name) {
                    self.report(document, field.position, format!(
                        "Unknown argument \"{arg_name}\" on field \"{}\" of type \
                        \"{parent_type_name}\".",
                        field.name,
                    ));
                }
            }
        }

        let field_type_name = field_def.type_ref().innermost_name();
        let has_selections = !field.selection_set.items.is_empty();
        if schema.is_leaf(field_type_name) {
            if has_selections && self.enabled(ValidationRule::ScalarLeafs) {
                self.report(document, field.position, format!(
                    "Field \"{}\" must not have a selection since type \
                    \"{}\" has no subfields.",
                    field.name,
                    field_def.type_ref(),
                ));
            }
        } else if schema.is_composite(field_type_name) {
            if !has_selections {
                if self.enabled(ValidationRule::ScalarLeafs) {
                    self.report(document, field.position, format!(
                        "Field \"{}\" of type \"{}\" must have a selection of \
                        subfields. Did you mean \"{} {{ ... }}\"?",
                        field.name,
                        field_def.type_ref(),
                        field.name,
                    ));
                }
                return;
            }
            self.validate_selection_set(document, field_type_name, &field.selection_set);
        }
    }

    fn validate_directives(
        &mut self,
        document: &Document,
        directives: &[ast::query::Directive],
        location: DirectiveLocation,
    ) {
        if !self.enabled(ValidationRule::KnownDirectives)
            && !self.enabled(ValidationRule::KnownArgumentNames) {
            return;
        }

        let schema = self.schema;
        for directive in directives {
            let Some(directive_def) = schema.directive(&directive.name) else {
                if self.enabled(ValidationRule::KnownDirectives) {
                    self.report(
                        document,
                        directive.position,
                        format!("Unknown directive \"{}\".", directive.name),
                    );
                }
                continue;
            };

            if self.enabled(ValidationRule::KnownDirectives)
                && !directive_def.locations().contains(&location) {
                self.report(document, directive.position, format!(
                    "Directive \"{}\" may not be used on {}.",
                    directive.name,
                    location.as_str(),
                ));
            }

            if self.enabled(ValidationRule::KnownArgumentNames)
                && !directive_def.accepts_any_arguments() {
                for (arg_name, _) in &directive.arguments {
                    if !directive_def.arguments().contains_key(arg_name) {
                        self.report(document, directive.position, format!(
                            "Unknown argument \"{arg_name}\" on directive \"@{}\".",
                            directive.name,
                        ));
                    }
                }
            }
        }
    }
}
