use crate::ast;
use crate::ast::schema::DirectiveLocation;
use crate::file_reader;
use crate::ir::OperationKind;
use crate::loc;
use crate::schema::DirectiveDefinition;
use crate::schema::EnumType;
use crate::schema::FieldDefinition;
use crate::schema::InputObjectType;
use crate::schema::InputValueDefinition;
use crate::schema::InterfaceType;
use crate::schema::ObjectType;
use crate::schema::ScalarType;
use crate::schema::Schema;
use crate::schema::SchemaBuildError;
use crate::schema::SchemaType;
use crate::schema::TypeRef;
use crate::schema::UnionType;
use indexmap::IndexMap;
use std::path::Path;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, SchemaBuildError>;

const BUILTIN_SCALARS: [&str; 5] = ["Boolean", "Float", "ID", "Int", "String"];

/// Utility for building a [`Schema`], either from scratch or by extending an
/// existing one.
#[derive(Debug)]
pub struct SchemaBuilder {
    client_only: bool,
    directives: IndexMap<String, DirectiveDefinition>,
    mutation_type: Option<(String, loc::SourceLocation)>,
    query_type: Option<(String, loc::SourceLocation)>,
    str_load_counter: u16,
    subscription_type: Option<(String, loc::SourceLocation)>,
    types: IndexMap<String, SchemaType>,
}
impl SchemaBuilder {
    pub fn new() -> Self {
        let mut types = IndexMap::new();
        for scalar_name in BUILTIN_SCALARS {
            types.insert(scalar_name.to_string(), SchemaType::Scalar(ScalarType {
                client_only: false,
                def_location: loc::SourceLocation::GraphQLBuiltIn,
                name: scalar_name.to_string(),
            }));
        }

        let if_arg = || vec![
            InputValueDefinition::new("if", TypeRef::named("Boolean").non_null()),
        ];
        let conditional_locations = || vec![
            DirectiveLocation::Field,
            DirectiveLocation::FragmentSpread,
            DirectiveLocation::InlineFragment,
        ];
        let mut directives = IndexMap::new();
        for directive in [
            DirectiveDefinition::builtin("skip", if_arg(), conditional_locations()),
            DirectiveDefinition::builtin("include", if_arg(), conditional_locations()),
            DirectiveDefinition::builtin(
                "deprecated",
                vec![InputValueDefinition::new("reason", TypeRef::named("String"))],
                vec![DirectiveLocation::FieldDefinition, DirectiveLocation::EnumValue],
            ),
            DirectiveDefinition::builtin(
                "specifiedBy",
                vec![InputValueDefinition::new("url", TypeRef::named("String").non_null())],
                vec![DirectiveLocation::Scalar],
            ),
        ] {
            directives.insert(directive.name.to_owned(), directive);
        }

        Self {
            client_only: false,
            directives,
            mutation_type: None,
            query_type: None,
            str_load_counter: 0,
            subscription_type: None,
            types,
        }
    }

    /// Start from an already-built [`Schema`]. Every definition visited
    /// afterwards is marked as a client-only extension.
    pub fn from_schema(schema: &Schema) -> Self {
        let root = |name: &Option<String>| name.as_ref().map(|name| (
            name.to_owned(),
            loc::SourceLocation::GraphQLBuiltIn,
        ));
        Self {
            client_only: true,
            directives: schema.directives.clone(),
            mutation_type: root(&schema.mutation_type),
            query_type: Some((
                schema.query_type.to_owned(),
                loc::SourceLocation::GraphQLBuiltIn,
            )),
            str_load_counter: 0,
            subscription_type: root(&schema.subscription_type),
            types: schema.types.clone(),
        }
    }

    pub fn build(mut self) -> Result<Schema> {
        let query_type = Self::resolve_root_type(
            &self.types,
            self.query_type.take(),
            OperationKind::Query,
        )?.ok_or(SchemaBuildError::NoQueryOperationTypeDefined)?;
        let mutation_type = Self::resolve_root_type(
            &self.types,
            self.mutation_type.take(),
            OperationKind::Mutation,
        )?;
        let subscription_type = Self::resolve_root_type(
            &self.types,
            self.subscription_type.take(),
            OperationKind::Subscription,
        )?;

        self.check_type_references()?;

        Ok(Schema {
            directives: self.directives,
            mutation_type,
            query_type,
            subscription_type,
            types: self.types,
        })
    }

    pub fn load_file(self, file_path: impl AsRef<Path>) -> Result<Self> {
        let file_path = file_path.as_ref();
        let content = file_reader::read_content(file_path)
            .map_err(|err| SchemaBuildError::SchemaFileReadError(Box::new(err)))?;
        self.load_str(Some(file_path.to_path_buf()), content.as_str())
    }

    pub fn load_str(
        mut self,
        file_path: Option<PathBuf>,
        content: &str,
    ) -> Result<Self> {
        let file_path =
            if let Some(file_path) = file_path {
                file_path
            } else {
                let ctr = self.str_load_counter;
                self.str_load_counter += 1;
                PathBuf::from(format!("str://{ctr}"))
            };

        let ast_doc = ast::schema::parse(content)
            .map_err(|err| SchemaBuildError::ParseError {
                file: file_path.to_owned(),
                err: err.to_string(),
            })?;

        self.visit_definitions(Some(file_path.as_path()), &ast_doc.definitions)?;
        Ok(self)
    }

    pub(crate) fn visit_definitions(
        &mut self,
        file_path: Option<&Path>,
        defs: &[ast::schema::Definition],
    ) -> Result<()> {
        use ast::schema::Definition;
        for def in defs {
            match def {
                Definition::SchemaDefinition(schema_def) =>
                    self.visit_schema_def(file_path, schema_def)?,
                Definition::TypeDefinition(type_def) =>
                    self.visit_type_def(file_path, type_def)?,
                Definition::TypeExtension(type_ext) =>
                    self.visit_type_extension(file_path, type_ext)?,
                Definition::DirectiveDefinition(directive_def) =>
                    self.visit_directive_def(file_path, directive_def)?,
            }
        }
        Ok(())
    }

    fn check_type_references(&self) -> Result<()> {
        let check = |type_name: &str, ref_location: &loc::SourceLocation| {
            if self.types.contains_key(type_name) {
                Ok(())
            } else {
                Err(SchemaBuildError::UndefinedTypeName {
                    ref_location: ref_location.to_owned(),
                    undefined_type_name: type_name.to_string(),
                })
            }
        };

        for schema_type in self.types.values() {
            let def_location = schema_type.def_location();
            match schema_type {
                SchemaType::Object(ObjectType { fields, interfaces, .. })
                | SchemaType::Interface(InterfaceType { fields, interfaces, .. }) => {
                    for iface_name in interfaces {
                        check(iface_name, def_location)?;
                    }
                    for field in fields.values() {
                        check(field.type_ref.innermost_name(), &field.def_location)?;
                        for arg in field.arguments.values() {
                            check(arg.type_ref.innermost_name(), &field.def_location)?;
                        }
                    }
                },
                SchemaType::Union(union_t) => {
                    for member in &union_t.members {
                        check(member, def_location)?;
                    }
                },
                SchemaType::InputObject(input_t) => {
                    for input_field in input_t.fields.values() {
                        check(input_field.type_ref.innermost_name(), def_location)?;
                    }
                },
                SchemaType::Enum(_) | SchemaType::Scalar(_) => (),
            }
        }

        for directive in self.directives.values() {
            for arg in directive.arguments.values() {
                check(arg.type_ref.innermost_name(), &directive.def_location)?;
            }
        }

        Ok(())
    }

    fn resolve_root_type(
        types: &IndexMap<String, SchemaType>,
        declared: Option<(String, loc::SourceLocation)>,
        operation: OperationKind,
    ) -> Result<Option<String>> {
        let type_name = match declared {
            Some((type_name, def_location)) => {
                if !types.contains_key(&type_name) {
                    return Err(SchemaBuildError::UndefinedTypeName {
                        ref_location: def_location,
                        undefined_type_name: type_name,
                    });
                }
                type_name
            },
            None => {
                let default_name = operation.default_root_type_name();
                if !types.contains_key(default_name) {
                    return Ok(None);
                }
                default_name.to_string()
            },
        };

        match types.get(&type_name) {
            Some(SchemaType::Object(_)) => Ok(Some(type_name)),
            _ => Err(SchemaBuildError::RootOperationTypeIsNotAnObject {
                operation,
                type_name,
            }),
        }
    }

    fn visit_directive_def(
        &mut self,
        file_path: Option<&Path>,
        def: &ast::schema::DirectiveDefinition,
    ) -> Result<()> {
        let location = loc::SourceLocation::from_pos(file_path, def.position);
        if let Some(existing) = self.directives.get(def.name.as_str()) {
            return Err(SchemaBuildError::DuplicateDirectiveDefinition {
                directive_name: def.name.to_string(),
                location1: existing.def_location.to_owned(),
                location2: location,
            });
        }

        self.directives.insert(
            def.name.to_string(),
            DirectiveDefinition::from_ast(location, def, self.client_only),
        );
        Ok(())
    }

    fn visit_schema_def(
        &mut self,
        file_path: Option<&Path>,
        schema_def: &ast::schema::SchemaDefinition,
    ) -> Result<()> {
        let location = loc::SourceLocation::from_pos(file_path, schema_def.position);
        for (operation, type_name) in [
            (OperationKind::Query, &schema_def.query),
            (OperationKind::Mutation, &schema_def.mutation),
            (OperationKind::Subscription, &schema_def.subscription),
        ] {
            let Some(type_name) = type_name else {
                continue;
            };
            let slot = match operation {
                OperationKind::Query => &mut self.query_type,
                OperationKind::Mutation => &mut self.mutation_type,
                OperationKind::Subscription => &mut self.subscription_type,
            };
            if let Some((_, existing_location)) = slot {
                return Err(SchemaBuildError::DuplicateOperationDefinition {
                    operation,
                    location1: existing_location.to_owned(),
                    location2: location,
                });
            }
            *slot = Some((type_name.to_string(), location.to_owned()));
        }
        Ok(())
    }

    fn visit_type_def(
        &mut self,
        file_path: Option<&Path>,
        type_def: &ast::schema::TypeDefinition,
    ) -> Result<()> {
        use ast::schema::TypeDefinition;
        let client_only = self.client_only;
        let (type_name, position) = match type_def {
            TypeDefinition::Enum(def) => (&def.name, def.position),
            TypeDefinition::InputObject(def) => (&def.name, def.position),
            TypeDefinition::Interface(def) => (&def.name, def.position),
            TypeDefinition::Object(def) => (&def.name, def.position),
            TypeDefinition::Scalar(def) => (&def.name, def.position),
            TypeDefinition::Union(def) => (&def.name, def.position),
        };
        let def_location = loc::SourceLocation::from_pos(file_path, position);

        if let Some(existing) = self.types.get(type_name.as_str()) {
            return Err(SchemaBuildError::DuplicateTypeDefinition {
                type_name: type_name.to_string(),
                location1: existing.def_location().to_owned(),
                location2: def_location,
            });
        }

        let schema_type = match type_def {
            TypeDefinition::Enum(def) => SchemaType::Enum(EnumType {
                client_only,
                def_location,
                name: def.name.to_string(),
                values: def.values.iter().map(|v| v.name.to_string()).collect(),
            }),

            TypeDefinition::InputObject(def) => SchemaType::InputObject(InputObjectType {
                client_only,
                def_location,
                fields: InputValueDefinition::map_from_ast(&def.fields),
                name: def.name.to_string(),
            }),

            TypeDefinition::Interface(def) => SchemaType::Interface(InterfaceType {
                client_only,
                fields: Self::fields_from_ast(file_path, &def.name, &def.fields, client_only)?,
                def_location,
                interfaces: def.implements_interfaces.clone(),
                name: def.name.to_string(),
            }),

            TypeDefinition::Object(def) => SchemaType::Object(ObjectType {
                client_only,
                fields: Self::fields_from_ast(file_path, &def.name, &def.fields, client_only)?,
                def_location,
                interfaces: def.implements_interfaces.clone(),
                name: def.name.to_string(),
            }),

            TypeDefinition::Scalar(def) => SchemaType::Scalar(ScalarType {
                client_only,
                def_location,
                name: def.name.to_string(),
            }),

            TypeDefinition::Union(def) => SchemaType::Union(UnionType {
                client_only,
                def_location,
                members: def.types.clone(),
                name: def.name.to_string(),
            }),
        };

        self.types.insert(type_name.to_string(), schema_type);
        Ok(())
    }

    fn visit_type_extension(
        &mut self,
        file_path: Option<&Path>,
        ext: &ast::schema::TypeExtension,
    ) -> Result<()> {
        use ast::schema::TypeExtension;
        let client_only = self.client_only;
        let (type_name, position, extension_kind) = match ext {
            TypeExtension::Enum(ext) => (&ext.name, ext.position, "an enum"),
            TypeExtension::InputObject(ext) => (&ext.name, ext.position, "an input object"),
            TypeExtension::Interface(ext) => (&ext.name, ext.position, "an interface"),
            TypeExtension::Object(ext) => (&ext.name, ext.position, "an object"),
            TypeExtension::Scalar(ext) => (&ext.name, ext.position, "a scalar"),
            TypeExtension::Union(ext) => (&ext.name, ext.position, "a union"),
        };
        let location = loc::SourceLocation::from_pos(file_path, position);

        let Some(existing) = self.types.get_mut(type_name.as_str()) else {
            return Err(SchemaBuildError::ExtensionOfUndefinedType {
                location,
                type_name: type_name.to_string(),
            });
        };

        let wrong_kind = |existing: &SchemaType| SchemaBuildError::ExtensionOfWrongTypeKind {
            actual_kind: match existing {
                SchemaType::Enum(_) => "an enum",
                SchemaType::InputObject(_) => "an input object",
                SchemaType::Interface(_) => "an interface",
                SchemaType::Object(_) => "an object",
                SchemaType::Scalar(_) => "a scalar",
                SchemaType::Union(_) => "a union",
            },
            extension_kind,
            location: location.to_owned(),
            type_name: type_name.to_string(),
        };

        match (ext, existing) {
            (TypeExtension::Enum(ext), SchemaType::Enum(enum_t)) => {
                enum_t.values.extend(ext.values.iter().map(|v| v.name.to_string()));
            },

            (TypeExtension::InputObject(ext), SchemaType::InputObject(input_t)) => {
                input_t.fields.extend(InputValueDefinition::map_from_ast(&ext.fields));
            },

            (TypeExtension::Interface(ext), SchemaType::Interface(iface_t)) => {
                let new_fields = Self::fields_from_ast(
                    file_path,
                    &ext.name,
                    &ext.fields,
                    client_only,
                )?;
                Self::merge_fields(&ext.name, &mut iface_t.fields, new_fields)?;
                iface_t.interfaces.extend(ext.implements_interfaces.iter().cloned());
            },

            (TypeExtension::Object(ext), SchemaType::Object(obj_t)) => {
                let new_fields = Self::fields_from_ast(
                    file_path,
                    &ext.name,
                    &ext.fields,
                    client_only,
                )?;
                Self::merge_fields(&ext.name, &mut obj_t.fields, new_fields)?;
                obj_t.interfaces.extend(ext.implements_interfaces.iter().cloned());
            },

            (TypeExtension::Scalar(_), SchemaType::Scalar(_)) => (),

            (TypeExtension::Union(ext), SchemaType::Union(union_t)) => {
                union_t.members.extend(ext.types.iter().cloned());
            },

            (_, existing) => return Err(wrong_kind(&*existing)),
        }

        Ok(())
    }

    fn fields_from_ast(
        file_path: Option<&Path>,
        type_name: &str,
        ast_fields: &[ast::schema::Field],
        client_only: bool,
    ) -> Result<IndexMap<String, FieldDefinition>> {
        let mut fields = IndexMap::new();
        for ast_field in ast_fields {
            let location = loc::SourceLocation::from_pos(file_path, ast_field.position);
            if fields.contains_key(ast_field.name.as_str()) {
                return Err(SchemaBuildError::DuplicateFieldDefinition {
                    field_name: ast_field.name.to_string(),
                    location,
                    type_name: type_name.to_string(),
                });
            }
            fields.insert(
                ast_field.name.to_string(),
                FieldDefinition::from_ast(location, ast_field, client_only),
            );
        }
        Ok(fields)
    }

    fn merge_fields(
        type_name: &str,
        fields: &mut IndexMap<String, FieldDefinition>,
        new_fields: IndexMap<String, FieldDefinition>,
    ) -> Result<()> {
        for (field_name, field) in new_fields {
            if fields.contains_key(&field_name) {
                return Err(SchemaBuildError::DuplicateFieldDefinition {
                    field_name,
                    location: field.def_location,
                    type_name: type_name.to_string(),
                });
            }
            fields.insert(field_name, field);
        }
        Ok(())
    }
}
impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
