use crate::codegen::code_generator;
use crate::codegen::printer;
use crate::codegen::ConcreteBatch;
use crate::codegen::GeneratedNode;
use crate::compiler::CompileError;
use crate::context::filter_context_for_node;
use crate::context::CompilerContext;
use crate::context::ContextError;
use crate::ir::Definition;
use crate::ir::Fragment;
use crate::ir::Metadata;
use crate::ir::Root;
use crate::schema::Schema;
use crate::transforms::CompilerTransforms;
use indexmap::IndexMap;
use std::sync::Arc;

type Result<T> = std::result::Result<T, CompileError>;

/// Turns one context of IR definitions into generated artifacts.
///
/// The context must already be resolved against the extended schema (the
/// server schema plus the compiler's directives and any client extensions).
/// `base_schema` is the server schema itself: the passes that decide what
/// may be sent to the server consult it rather than the context's schema.
#[derive(Clone, Debug)]
pub struct Compiler {
    base_schema: Arc<Schema>,
    context: CompilerContext,
    transforms: CompilerTransforms,
}
impl Compiler {
    pub fn new(base_schema: Arc<Schema>, context: CompilerContext) -> Self {
        Self::with_transforms(base_schema, context, CompilerTransforms::default())
    }

    pub fn with_transforms(
        base_schema: Arc<Schema>,
        context: CompilerContext,
        transforms: CompilerTransforms,
    ) -> Self {
        Self {
            base_schema,
            context,
            transforms,
        }
    }

    pub fn add_definitions(
        &mut self,
        definitions: impl IntoIterator<Item = Definition>,
    ) -> std::result::Result<(), ContextError> {
        self.context = self.context.add_all(definitions)?;
        Ok(())
    }

    /// Generate a `Fragment` artifact per fragment and a `Batch` artifact per
    /// operation, keyed by name.
    pub fn compile(&self) -> Result<IndexMap<String, GeneratedNode>> {
        self.validate()?;

        let schema = self.base_schema.as_ref();
        let fragment_context = self.transforms.fragment.apply(&self.context, schema)?;
        let query_context = self.transformed_query_context()?;
        let print_context = self.transforms.print.apply(&query_context, schema)?;
        let codegen_context = self.transforms.codegen.apply(&query_context, schema)?;

        let mut compiled = IndexMap::new();
        for definition in fragment_context.documents() {
            if let Definition::Fragment(fragment) = definition.as_ref() {
                let generated = code_generator::generate_fragment(
                    fragment,
                    fragment_context.schema(),
                );
                compiled.insert(fragment.name.to_owned(), GeneratedNode::Fragment(generated));
            }
        }

        for definition in query_context.documents() {
            let Definition::Root(root) = definition.as_ref() else {
                continue;
            };
            let name = root.name.as_str();

            // The unflattened print tree is printed; the flattened codegen
            // tree would not be a valid query.
            let print_root = Definition::Root(print_context.get_root(name)?.clone());
            let text = filter_context_for_node(&print_context, &print_root)?
                .documents()
                .map(|definition| printer::print_definition(definition))
                .collect::<Vec<_>>()
                .join("\n");

            let root_fragment = fragment_for_root(fragment_context.get_root(name)?);
            let fragment = code_generator::generate_fragment(
                &root_fragment,
                fragment_context.schema(),
            );
            let query = code_generator::generate_root(
                codegen_context.get_root(name)?,
                codegen_context.schema(),
            );

            compiled.insert(name.to_string(), GeneratedNode::Batch(ConcreteBatch {
                fragment,
                id: None,
                metadata: root.metadata.clone(),
                name: name.to_string(),
                operation: root.operation,
                query,
                text,
            }));
        }

        log::debug!("Compiled {} artifact(s)", compiled.len());
        Ok(compiled)
    }

    pub fn context(&self) -> &CompilerContext {
        &self.context
    }

    /// The held context after the query pipeline: what will be fetched from
    /// the server.
    pub fn transformed_query_context(&self) -> Result<CompilerContext> {
        Ok(self.transforms.query.apply(&self.context, &self.base_schema)?)
    }

    fn validate(&self) -> Result<()> {
        let messages: Vec<String> = self.transforms.validators.iter()
            .flat_map(|validator| validator.validate(&self.context))
            .collect();
        if messages.is_empty() {
            Ok(())
        } else {
            Err(CompileError::Validation { messages })
        }
    }
}

/// The reader for an operation's own selections is generated as though the
/// operation were a fragment on its root type.
fn fragment_for_root(root: &Root) -> Fragment {
    Fragment {
        argument_definitions: root.argument_definitions.clone(),
        directives: root.directives.clone(),
        location: root.location.to_owned(),
        metadata: Metadata::new(),
        name: root.name.to_owned(),
        selections: root.selections.clone(),
        type_condition: root.type_name.to_owned(),
    }
}
