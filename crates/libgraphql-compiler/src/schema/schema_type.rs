use crate::ast;
use crate::loc;
use crate::schema::TypeRef;
use crate::value::Value;
use indexmap::IndexMap;

/// A named type defined within a [`Schema`](crate::schema::Schema).
#[derive(Clone, Debug, PartialEq)]
pub enum SchemaType {
    Enum(EnumType),
    InputObject(InputObjectType),
    Interface(InterfaceType),
    Object(ObjectType),
    Scalar(ScalarType),
    Union(UnionType),
}
impl SchemaType {
    pub fn name(&self) -> &str {
        match self {
            Self::Enum(t) => t.name.as_str(),
            Self::InputObject(t) => t.name.as_str(),
            Self::Interface(t) => t.name.as_str(),
            Self::Object(t) => t.name.as_str(),
            Self::Scalar(t) => t.name.as_str(),
            Self::Union(t) => t.name.as_str(),
        }
    }

    pub fn def_location(&self) -> &loc::SourceLocation {
        match self {
            Self::Enum(t) => &t.def_location,
            Self::InputObject(t) => &t.def_location,
            Self::Interface(t) => &t.def_location,
            Self::Object(t) => &t.def_location,
            Self::Scalar(t) => &t.def_location,
            Self::Union(t) => &t.def_location,
        }
    }

    /// Whether this type was introduced by a client-side schema extension
    /// rather than the server schema.
    pub fn is_client_only(&self) -> bool {
        match self {
            Self::Enum(t) => t.client_only,
            Self::InputObject(t) => t.client_only,
            Self::Interface(t) => t.client_only,
            Self::Object(t) => t.client_only,
            Self::Scalar(t) => t.client_only,
            Self::Union(t) => t.client_only,
        }
    }

    /// The output fields of an object or interface type.
    pub fn fields(&self) -> Option<&IndexMap<String, FieldDefinition>> {
        match self {
            Self::Interface(t) => Some(&t.fields),
            Self::Object(t) => Some(&t.fields),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Enum(_) => "enum",
            Self::InputObject(_) => "input object",
            Self::Interface(_) => "interface",
            Self::Object(_) => "object",
            Self::Scalar(_) => "scalar",
            Self::Union(_) => "union",
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        if let Self::Object(t) = self {
            Some(t)
        } else {
            None
        }
    }

    /// Interfaces and unions.
    pub fn is_abstract(&self) -> bool {
        matches!(self, Self::Interface(_) | Self::Union(_))
    }

    /// Types that can carry a selection set.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Interface(_) | Self::Object(_) | Self::Union(_))
    }

    pub fn is_input_type(&self) -> bool {
        matches!(self, Self::Enum(_) | Self::InputObject(_) | Self::Scalar(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Enum(_) | Self::Scalar(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumType {
    pub(crate) client_only: bool,
    pub(crate) def_location: loc::SourceLocation,
    pub(crate) name: String,
    pub(crate) values: Vec<String>,
}
impl EnumType {
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectType {
    pub(crate) client_only: bool,
    pub(crate) def_location: loc::SourceLocation,
    pub(crate) fields: IndexMap<String, InputValueDefinition>,
    pub(crate) name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceType {
    pub(crate) client_only: bool,
    pub(crate) def_location: loc::SourceLocation,
    pub(crate) fields: IndexMap<String, FieldDefinition>,
    pub(crate) interfaces: Vec<String>,
    pub(crate) name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectType {
    pub(crate) client_only: bool,
    pub(crate) def_location: loc::SourceLocation,
    pub(crate) fields: IndexMap<String, FieldDefinition>,
    pub(crate) interfaces: Vec<String>,
    pub(crate) name: String,
}
impl ObjectType {
    pub fn fields(&self) -> &IndexMap<String, FieldDefinition> {
        &self.fields
    }

    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarType {
    pub(crate) client_only: bool,
    pub(crate) def_location: loc::SourceLocation,
    pub(crate) name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnionType {
    pub(crate) client_only: bool,
    pub(crate) def_location: loc::SourceLocation,
    pub(crate) members: Vec<String>,
    pub(crate) name: String,
}
impl UnionType {
    pub fn members(&self) -> &[String] {
        &self.members
    }
}

/// An output field declared on an object or interface type.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    pub(crate) arguments: IndexMap<String, InputValueDefinition>,
    pub(crate) client_only: bool,
    pub(crate) def_location: loc::SourceLocation,
    pub(crate) name: String,
    pub(crate) type_ref: TypeRef,
}
impl FieldDefinition {
    pub(crate) fn from_ast(
        location: loc::SourceLocation,
        field: &ast::schema::Field,
        client_only: bool,
    ) -> Self {
        Self {
            arguments: InputValueDefinition::map_from_ast(&field.arguments),
            client_only,
            def_location: location,
            name: field.name.to_string(),
            type_ref: TypeRef::from_ast(&field.field_type),
        }
    }

    pub fn arguments(&self) -> &IndexMap<String, InputValueDefinition> {
        &self.arguments
    }

    pub fn is_client_only(&self) -> bool {
        self.client_only
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }
}

/// A field argument, directive argument, or input object field.
#[derive(Clone, Debug, PartialEq)]
pub struct InputValueDefinition {
    pub(crate) default_value: Option<Value>,
    pub(crate) name: String,
    pub(crate) type_ref: TypeRef,
}
impl InputValueDefinition {
    pub(crate) fn new(name: &str, type_ref: TypeRef) -> Self {
        Self {
            default_value: None,
            name: name.to_string(),
            type_ref,
        }
    }

    pub(crate) fn map_from_ast(
        input_values: &[ast::schema::InputValue],
    ) -> IndexMap<String, Self> {
        input_values.iter().map(|input_value| (
            input_value.name.to_string(),
            Self {
                default_value: input_value.default_value.as_ref().map(Value::from_ast),
                name: input_value.name.to_string(),
                type_ref: TypeRef::from_ast(&input_value.value_type),
            },
        )).collect()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }
}

/// A directive declared by the schema, either built-in or custom.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveDefinition {
    /// Fragment-argument directives (`@arguments`, `@argumentDefinitions`)
    /// take free-form arguments named after the fragment's variables.
    pub(crate) accepts_any_arguments: bool,
    pub(crate) arguments: IndexMap<String, InputValueDefinition>,
    pub(crate) client_only: bool,
    pub(crate) def_location: loc::SourceLocation,
    pub(crate) locations: Vec<ast::schema::DirectiveLocation>,
    pub(crate) name: String,
}
impl DirectiveDefinition {
    pub(crate) fn from_ast(
        location: loc::SourceLocation,
        def: &ast::schema::DirectiveDefinition,
        client_only: bool,
    ) -> Self {
        Self {
            accepts_any_arguments: false,
            arguments: InputValueDefinition::map_from_ast(&def.arguments),
            client_only,
            def_location: location,
            locations: def.locations.clone(),
            name: def.name.to_string(),
        }
    }

    pub(crate) fn builtin(
        name: &str,
        arguments: Vec<InputValueDefinition>,
        locations: Vec<ast::schema::DirectiveLocation>,
    ) -> Self {
        Self {
            accepts_any_arguments: false,
            arguments: arguments.into_iter()
                .map(|arg| (arg.name.to_owned(), arg))
                .collect(),
            client_only: false,
            def_location: loc::SourceLocation::GraphQLBuiltIn,
            locations,
            name: name.to_string(),
        }
    }

    pub fn accepts_any_arguments(&self) -> bool {
        self.accepts_any_arguments
    }

    pub fn arguments(&self) -> &IndexMap<String, InputValueDefinition> {
        &self.arguments
    }

    pub fn is_client_only(&self) -> bool {
        self.client_only
    }

    pub fn locations(&self) -> &[ast::schema::DirectiveLocation] {
        &self.locations
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
