use crate::context::CompilerContext;
use crate::ir::Definition;
use crate::ir::DirectiveKind;
use crate::ir::InlineFragment;
use crate::ir::LinkedField;
use crate::ir::ScalarField;
use crate::ir::Selection;
use crate::loc;
use crate::schema::FieldDefinition;
use crate::schema::Schema;
use crate::schema::TypeRef;
use crate::schema::TYPENAME_FIELD;
use crate::transforms::ir_rewriter;
use crate::transforms::IrRewriter;
use crate::transforms::TransformError;
use crate::value::Value;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, TransformError>;

pub const CONNECTION_HANDLE: &str = "connection";

const CURSOR: &str = "cursor";
const EDGES: &str = "edges";
const END_CURSOR: &str = "endCursor";
const FIRST: &str = "first";
const HANDLE: &str = "handle";
const HAS_NEXT_PAGE: &str = "hasNextPage";
const HAS_PREVIOUS_PAGE: &str = "hasPreviousPage";
const LAST: &str = "last";
const NODE: &str = "node";
const PAGE_INFO: &str = "pageInfo";
const START_CURSOR: &str = "startCursor";

const PAGE_INFO_FIELDS: [&str; 4] = [END_CURSOR, HAS_NEXT_PAGE, HAS_PREVIOUS_PAGE, START_CURSOR];

/// Expand every `@connection` field: check that it is a bounded fetch of a
/// well-formed connection type, strip the directive and attach a handle.
///
/// With `generate_requisite_fields`, the cursor and page info selections the
/// runtime needs to paginate are also added to the field.
pub fn transform(
    context: &CompilerContext,
    generate_requisite_fields: bool,
) -> Result<CompilerContext> {
    let mut transformer = ConnectionTransformer {
        definition_name: String::new(),
        generate_requisite_fields,
        schema: context.schema(),
    };
    ir_rewriter::rewrite_context(context, &mut transformer)
}

/// The resolved field types of a validated connection type.
struct ConnectionShape {
    cursor: TypeRef,
    edges: TypeRef,
    node: TypeRef,
    page_info: TypeRef,
    page_info_fields: Vec<(&'static str, TypeRef)>,
}

struct ConnectionTransformer<'a> {
    definition_name: String,
    generate_requisite_fields: bool,
    schema: &'a Schema,
}
impl ConnectionTransformer<'_> {
    fn expand(&self, mut field: LinkedField) -> Result<LinkedField> {
        let Some(directive_idx) = field.directives.iter()
            .position(|directive| directive.kind == DirectiveKind::Connection) else {
            return Ok(field);
        };
        let directive = field.directives.remove(directive_idx);
        let type_name = field.type_ref.innermost_name().to_string();

        let is_bounded = field.arguments.iter()
            .any(|arg| arg.name == FIRST || arg.name == LAST);
        if !is_bounded {
            return Err(TransformError::ConnectionMissingBound {
                definition_name: self.definition_name.to_owned(),
                field_name: field.name,
                type_name: field.type_ref.to_string(),
            });
        }

        let selects_edges = field.selections.iter().any(|selection| {
            matches!(selection, Selection::LinkedField(edges) if edges.name == EDGES)
        });
        if !selects_edges {
            return Err(TransformError::ConnectionMissingEdges {
                definition_name: self.definition_name.to_owned(),
                field_name: field.name,
                type_name: field.type_ref.to_string(),
            });
        }

        let shape = self.connection_shape(&field.name, &type_name)?;

        let handle = match directive.argument(HANDLE) {
            None => CONNECTION_HANDLE.to_string(),
            Some(Value::String(handle)) => handle.to_owned(),
            Some(_) => return Err(TransformError::InvalidConnectionHandle {
                definition_name: self.definition_name.to_owned(),
                field_name: field.name,
            }),
        };

        if self.generate_requisite_fields {
            field.selections.push(Selection::InlineFragment(
                requisite_selection(type_name, shape),
            ));
        }

        if !field.handles.contains(&handle) {
            field.handles.push(handle);
        }
        log::debug!(
            "Expanded connection field `{}` in `{}`",
            field.name,
            self.definition_name,
        );
        Ok(field)
    }

    fn connection_shape(
        &self,
        field_name: &str,
        type_name: &str,
    ) -> Result<ConnectionShape> {
        let invalid = |reason: String| TransformError::InvalidConnectionType {
            definition_name: self.definition_name.to_owned(),
            field_name: field_name.to_string(),
            reason,
            type_name: type_name.to_string(),
        };

        let fields = self.object_fields(type_name)
            .ok_or_else(|| invalid("to be an object type".to_string()))?;

        let edges = fields.get(EDGES)
            .filter(|edges| edges.type_ref().is_plural())
            .ok_or_else(|| invalid(format!(
                "to have an `{EDGES}` field that returns a list of objects",
            )))?;
        let edge_fields = self.object_fields(edges.type_ref().innermost_name())
            .ok_or_else(|| invalid(format!(
                "to have an `{EDGES}` field that returns a list of objects",
            )))?;

        let node = edge_fields.get(NODE)
            .filter(|node| {
                !node.type_ref().is_plural()
                    && self.schema.is_composite(node.type_ref().innermost_name())
            })
            .ok_or_else(|| invalid(format!(
                "to have an `{EDGES} {{ {NODE} }}` field that returns an object, \
                interface or union",
            )))?;

        let cursor = edge_fields.get(CURSOR)
            .filter(|cursor| self.is_scalar(cursor))
            .ok_or_else(|| invalid(format!(
                "to have an `{EDGES} {{ {CURSOR} }}` field that returns a scalar",
            )))?;

        let page_info = fields.get(PAGE_INFO)
            .filter(|page_info| !page_info.type_ref().is_plural())
            .ok_or_else(|| invalid(format!(
                "to have a `{PAGE_INFO}` field that returns an object",
            )))?;
        let page_info_type_fields = self.object_fields(page_info.type_ref().innermost_name())
            .ok_or_else(|| invalid(format!(
                "to have a `{PAGE_INFO}` field that returns an object",
            )))?;

        let mut page_info_fields = Vec::with_capacity(PAGE_INFO_FIELDS.len());
        for name in PAGE_INFO_FIELDS {
            let page_info_field = page_info_type_fields.get(name)
                .filter(|page_info_field| self.is_scalar(page_info_field))
                .ok_or_else(|| invalid(format!(
                    "to have a `{PAGE_INFO} {{ {name} }}` field that returns a scalar",
                )))?;
            page_info_fields.push((name, page_info_field.type_ref().clone()));
        }

        Ok(ConnectionShape {
            cursor: cursor.type_ref().clone(),
            edges: edges.type_ref().clone(),
            node: node.type_ref().clone(),
            page_info: page_info.type_ref().clone(),
            page_info_fields,
        })
    }

    fn is_scalar(&self, field: &FieldDefinition) -> bool {
        !field.type_ref().is_plural() && self.schema.is_leaf(field.type_ref().innermost_name())
    }

    fn object_fields(&self, type_name: &str) -> Option<&IndexMap<String, FieldDefinition>> {
        self.schema.get_type(type_name)?.as_object().map(|obj| obj.fields())
    }
}
impl IrRewriter for ConnectionTransformer<'_> {
    fn rewrite_definition(&mut self, definition: Definition) -> Result<Option<Definition>> {
        self.definition_name = definition.name().to_string();
        self.traverse_definition(definition).map(Some)
    }

    fn rewrite_selection(&mut self, selection: Selection) -> Result<Option<Selection>> {
        match self.traverse_selection(selection)? {
            Selection::LinkedField(field) =>
                Ok(Some(Selection::LinkedField(self.expand(field)?))),
            other => Ok(Some(other)),
        }
    }
}

/// `... on Connection { edges { cursor node { __typename } } pageInfo { ... } }`
fn requisite_selection(type_name: String, shape: ConnectionShape) -> InlineFragment {
    let typename = ScalarField::generated(TYPENAME_FIELD, TypeRef::named("String").non_null());
    let node = LinkedField::generated(NODE, shape.node, vec![
        Selection::ScalarField(typename),
    ]);
    let edges = LinkedField::generated(EDGES, shape.edges, vec![
        Selection::ScalarField(ScalarField::generated(CURSOR, shape.cursor)),
        Selection::LinkedField(node),
    ]);
    let page_info = LinkedField::generated(
        PAGE_INFO,
        shape.page_info,
        shape.page_info_fields.into_iter()
            .map(|(name, type_ref)| Selection::ScalarField(ScalarField::generated(name, type_ref)))
            .collect(),
    );

    InlineFragment {
        directives: vec![],
        location: loc::SourceLocation::Generated,
        selections: vec![
            Selection::LinkedField(edges),
            Selection::LinkedField(page_info),
        ],
        type_condition: type_name,
    }
}
