#[allow(clippy::module_inception)]
mod schema;
mod schema_build_error;
pub(crate) mod schema_builder;
mod schema_transforms;
mod schema_type;
mod type_ref;

pub use schema::Schema;
pub use schema::TYPENAME_FIELD;
pub use schema_build_error::SchemaBuildError;
pub use schema_builder::SchemaBuilder;
pub use schema_transforms::extend_ast_schema;
pub use schema_transforms::transform_ast_schema;
pub use schema_transforms::ARGUMENTS_DIRECTIVE;
pub use schema_transforms::ARGUMENT_DEFINITIONS_DIRECTIVE;
pub use schema_transforms::CONNECTION_DIRECTIVE;
pub use schema_transforms::EXPORT_DIRECTIVE;
pub use schema_transforms::RELAY_DIRECTIVE;
pub use schema_type::DirectiveDefinition;
pub use schema_type::EnumType;
pub use schema_type::FieldDefinition;
pub use schema_type::InputObjectType;
pub use schema_type::InputValueDefinition;
pub use schema_type::InterfaceType;
pub use schema_type::ObjectType;
pub use schema_type::ScalarType;
pub use schema_type::SchemaType;
pub use schema_type::UnionType;
pub use type_ref::TypeRef;

#[cfg(test)]
mod tests;
