use crate::ast_convert;
use crate::ast_convert::LOCAL_RULES;
use crate::build::to_seconds;
use crate::build::CodegenDirectory;
use crate::build::DirectoryChanges;
use crate::build::PersistQuery;
use crate::build::Writer;
use crate::build::WriterError;
use crate::build::WriterInputs;
use crate::codegen::GeneratedNode;
use crate::compiler::Compiler;
use crate::context::CompilerContext;
use crate::document::Document;
use crate::schema::extend_ast_schema;
use crate::schema::transform_ast_schema;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

type Result<T> = std::result::Result<T, WriterError>;

#[derive(Clone, Debug)]
pub struct FileWriterConfig {
    pub output_dir: PathBuf,
    pub persist_query: Option<Arc<dyn PersistQuery>>,
}

/// Compiles its documents and writes one `<name>.graphql.json` artifact per
/// definition into the configured output directory, removing stale ones.
#[derive(Debug)]
pub struct FileWriter {
    config: FileWriterConfig,
    inputs: WriterInputs,
}
impl FileWriter {
    pub fn new(config: FileWriterConfig, inputs: WriterInputs) -> Self {
        Self { config, inputs }
    }
}
#[async_trait]
impl Writer for FileWriter {
    async fn write_all(self: Box<Self>) -> Result<DirectoryChanges> {
        let started_at = Instant::now();
        let Self { config, inputs } = *self;
        let WriterInputs { base_documents, documents, only_validate, schema, skip_persist } = inputs;

        let mut all_documents = base_documents.clone();
        all_documents.extend(documents.iter().map(|(name, doc)| (name.to_owned(), Arc::clone(doc))));
        let all_documents: Vec<&Document> = all_documents.values().map(Arc::as_ref).collect();
        let base_documents: Vec<&Document> = base_documents.values().map(Arc::as_ref).collect();
        let documents: Vec<&Document> = documents.values().map(Arc::as_ref).collect();

        // Documents can only be converted once the schema knows the
        // compiler's own directives.
        let extended_schema = extend_ast_schema(transform_ast_schema(&schema), &all_documents)?;
        let base_definitions =
            ast_convert::convert_ast_documents(&extended_schema, &base_documents, LOCAL_RULES)?;
        let definitions =
            ast_convert::convert_ast_documents(&extended_schema, &documents, LOCAL_RULES)?;

        let base_names: HashSet<String> = base_definitions.iter()
            .map(|definition| definition.name().to_string())
            .collect();
        let context = CompilerContext::new(extended_schema).add_all(base_definitions)?;
        let mut compiler = Compiler::new(schema, context);
        compiler.add_definitions(definitions)?;
        let mut compiled = compiler.compile()?;
        let compiled_at = Instant::now();

        let mut output_dir = CodegenDirectory::new(&config.output_dir, only_validate).await?;
        let persist_query = if skip_persist { None } else { config.persist_query.as_ref() };
        for name in compiler.context().names() {
            if base_names.contains(name) {
                continue;
            }
            let Some(mut node) = compiled.shift_remove(name) else {
                continue;
            };
            if let (GeneratedNode::Batch(batch), Some(persist_query)) = (&mut node, persist_query) {
                let id = persist_query.persist_query(&batch.text).await
                    .map_err(|err| WriterError::PersistQuery {
                        name: name.to_string(),
                        err,
                    })?;
                batch.id = Some(id);
            }
            let json = node.to_json()
                .map_err(|err| WriterError::Serialize {
                    name: name.to_string(),
                    err,
                })?;
            output_dir.write_file(&CodegenDirectory::artifact_file_name(name), &json).await?;
        }
        output_dir.delete_extra_files().await?;

        let finished_at = Instant::now();
        log::info!(
            "Writer time: {} [{} compiling, {} writing]",
            to_seconds(finished_at - started_at),
            to_seconds(compiled_at - started_at),
            to_seconds(finished_at - compiled_at),
        );
        Ok(output_dir.into_changes())
    }
}
