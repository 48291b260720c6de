use crate::ast::schema::DirectiveLocation;
use crate::document::Document;
use crate::loc;
use crate::schema::DirectiveDefinition;
use crate::schema::InputValueDefinition;
use crate::schema::Schema;
use crate::schema::SchemaBuildError;
use crate::schema::SchemaBuilder;
use crate::schema::TypeRef;
use std::sync::Arc;

pub const ARGUMENTS_DIRECTIVE: &str = "arguments";
pub const ARGUMENT_DEFINITIONS_DIRECTIVE: &str = "argumentDefinitions";
pub const CONNECTION_DIRECTIVE: &str = "connection";
pub const EXPORT_DIRECTIVE: &str = "export";
pub const RELAY_DIRECTIVE: &str = "relay";

/// Each entry declares one family of compiler-specific directives.
const SCHEMA_TRANSFORMS: [fn() -> DirectiveDefinition; 5] = [
    connection_directive,
    export_directive,
    relay_directive,
    arguments_directive,
    argument_definitions_directive,
];

/// Add the directive definitions the IR transforms rely on to `schema`.
///
/// Every rewrite skips a directive the schema already declares, so applying
/// this more than once is harmless. When nothing needs to be added the input
/// [`Arc`] is returned as-is.
pub fn transform_ast_schema(schema: &Arc<Schema>) -> Arc<Schema> {
    let missing: Vec<DirectiveDefinition> = SCHEMA_TRANSFORMS.iter()
        .map(|make_directive| make_directive())
        .filter(|directive| schema.directive(&directive.name).is_none())
        .collect();
    if missing.is_empty() {
        return Arc::clone(schema);
    }

    let mut transformed = Schema::clone(schema);
    for directive in missing {
        transformed.directives.insert(directive.name.to_owned(), directive);
    }
    Arc::new(transformed)
}

/// Extend `schema` with every client schema definition found in `documents`.
///
/// Documents without schema definitions leave the schema untouched, in which
/// case the very same [`Arc`] is returned; callers can use
/// [`Arc::ptr_eq`] to detect that no extension happened.
pub fn extend_ast_schema(
    schema: Arc<Schema>,
    documents: &[&Document],
) -> Result<Arc<Schema>, SchemaBuildError> {
    let has_extensions = documents.iter()
        .any(|document| !document.schema_definitions().is_empty());
    if !has_extensions {
        return Ok(schema);
    }

    let mut builder = SchemaBuilder::from_schema(&schema);
    for document in documents {
        builder.visit_definitions(
            Some(document.file_path()),
            document.schema_definitions(),
        )?;
    }
    let extended = builder.build()?;
    log::debug!(
        "Extended schema with {} client type(s)",
        extended.types.len() - schema.types.len(),
    );
    Ok(Arc::new(extended))
}

fn compiler_directive(
    name: &str,
    arguments: Vec<InputValueDefinition>,
    locations: Vec<DirectiveLocation>,
) -> DirectiveDefinition {
    DirectiveDefinition {
        accepts_any_arguments: false,
        arguments: arguments.into_iter()
            .map(|arg| (arg.name.to_owned(), arg))
            .collect(),
        client_only: false,
        def_location: loc::SourceLocation::CompilerBuiltIn,
        locations,
        name: name.to_string(),
    }
}

fn connection_directive() -> DirectiveDefinition {
    compiler_directive(
        CONNECTION_DIRECTIVE,
        vec![InputValueDefinition::new("handle", TypeRef::named("String"))],
        vec![DirectiveLocation::Field],
    )
}

fn export_directive() -> DirectiveDefinition {
    compiler_directive(
        EXPORT_DIRECTIVE,
        vec![InputValueDefinition::new("as", TypeRef::named("String").non_null())],
        vec![DirectiveLocation::Field],
    )
}

fn relay_directive() -> DirectiveDefinition {
    compiler_directive(
        RELAY_DIRECTIVE,
        vec![InputValueDefinition::new("plural", TypeRef::named("Boolean"))],
        vec![DirectiveLocation::FragmentDefinition],
    )
}

fn arguments_directive() -> DirectiveDefinition {
    DirectiveDefinition {
        accepts_any_arguments: true,
        ..compiler_directive(
            ARGUMENTS_DIRECTIVE,
            vec![],
            vec![DirectiveLocation::FragmentSpread],
        )
    }
}

fn argument_definitions_directive() -> DirectiveDefinition {
    DirectiveDefinition {
        accepts_any_arguments: true,
        ..compiler_directive(
            ARGUMENT_DEFINITIONS_DIRECTIVE,
            vec![],
            vec![DirectiveLocation::FragmentDefinition],
        )
    }
}
