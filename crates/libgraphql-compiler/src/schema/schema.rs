use crate::ir::OperationKind;
use crate::loc;
use crate::schema::DirectiveDefinition;
use crate::schema::FieldDefinition;
use crate::schema::SchemaBuildError;
use crate::schema::SchemaBuilder;
use crate::schema::SchemaType;
use crate::schema::TypeRef;
use indexmap::IndexMap;
use std::sync::OnceLock;

pub const TYPENAME_FIELD: &str = "__typename";

fn typename_field_def() -> &'static FieldDefinition {
    static TYPENAME: OnceLock<FieldDefinition> = OnceLock::new();
    TYPENAME.get_or_init(|| FieldDefinition {
        arguments: IndexMap::new(),
        client_only: false,
        def_location: loc::SourceLocation::GraphQLBuiltIn,
        name: TYPENAME_FIELD.to_string(),
        type_ref: TypeRef::named("String").non_null(),
    })
}

/// An immutable GraphQL type registry.
///
/// A [`Schema`] is never mutated once built. Extending it (see
/// [`extend_ast_schema`](crate::schema::extend_ast_schema)) produces a new
/// value, so callers typically share schemas behind an
/// [`Arc`](std::sync::Arc).
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    pub(crate) directives: IndexMap<String, DirectiveDefinition>,
    pub(crate) mutation_type: Option<String>,
    pub(crate) query_type: String,
    pub(crate) subscription_type: Option<String>,
    pub(crate) types: IndexMap<String, SchemaType>,
}
impl Schema {
    /// Helper function that just delegates to [`SchemaBuilder::new()`].
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Build a schema from a single SDL string.
    pub fn from_str(content: &str) -> Result<Self, SchemaBuildError> {
        SchemaBuilder::new()
            .load_str(None, content)?
            .build()
    }

    pub fn all_directives(&self) -> &IndexMap<String, DirectiveDefinition> {
        &self.directives
    }

    pub fn all_types(&self) -> &IndexMap<String, SchemaType> {
        &self.types
    }

    pub fn directive(&self, name: &str) -> Option<&DirectiveDefinition> {
        self.directives.get(name)
    }

    /// Look up a field on an object or interface type. Every composite type
    /// (including unions) implicitly exposes `__typename`.
    pub fn field(
        &self,
        parent_type_name: &str,
        field_name: &str,
    ) -> Option<&FieldDefinition> {
        let parent_type = self.types.get(parent_type_name)?;
        if field_name == TYPENAME_FIELD && parent_type.is_composite() {
            return Some(typename_field_def());
        }
        parent_type.fields()?.get(field_name)
    }

    pub fn get_type(&self, name: &str) -> Option<&SchemaType> {
        self.types.get(name)
    }

    pub fn is_abstract(&self, type_name: &str) -> bool {
        self.types.get(type_name).is_some_and(SchemaType::is_abstract)
    }

    pub fn is_composite(&self, type_name: &str) -> bool {
        self.types.get(type_name).is_some_and(SchemaType::is_composite)
    }

    pub fn is_leaf(&self, type_name: &str) -> bool {
        self.types.get(type_name).is_some_and(SchemaType::is_leaf)
    }

    /// The concrete object types a value of `type_name` may have at runtime.
    pub fn possible_types(&self, type_name: &str) -> Vec<&str> {
        match self.types.get(type_name) {
            Some(SchemaType::Object(obj)) => vec![obj.name.as_str()],
            Some(SchemaType::Union(union_t)) =>
                union_t.members.iter().map(String::as_str).collect(),
            Some(SchemaType::Interface(iface)) =>
                self.types.values()
                    .filter_map(SchemaType::as_object)
                    .filter(|obj| obj.interfaces.contains(&iface.name))
                    .map(|obj| obj.name.as_str())
                    .collect(),
            _ => vec![],
        }
    }

    /// Whether a fragment on `type_a` could ever apply to a value of
    /// `type_b` (and vice versa).
    pub fn types_overlap(&self, type_a: &str, type_b: &str) -> bool {
        if type_a == type_b {
            return true;
        }
        let possible_b = self.possible_types(type_b);
        self.possible_types(type_a)
            .iter()
            .any(|name| possible_b.contains(name))
    }

    /// Returns the name of this schema's root type for the given kind of
    /// operation, if the schema supports it.
    pub fn root_type_name(&self, kind: OperationKind) -> Option<&str> {
        match kind {
            OperationKind::Query => Some(self.query_type.as_str()),
            OperationKind::Mutation => self.mutation_type.as_deref(),
            OperationKind::Subscription => self.subscription_type.as_deref(),
        }
    }

    pub fn query_type_name(&self) -> &str {
        self.query_type.as_str()
    }
}
