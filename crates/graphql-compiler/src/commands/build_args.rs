use anyhow::Context;
use libgraphql_compiler::build::accept_all;
use libgraphql_compiler::build::FileMatcher;
use libgraphql_compiler::build::FileWriter;
use libgraphql_compiler::build::FileWriterConfig;
use libgraphql_compiler::build::GraphQLFileExtractor;
use libgraphql_compiler::build::ParserConfig;
use libgraphql_compiler::build::Runner;
use libgraphql_compiler::build::RunnerOptions;
use libgraphql_compiler::build::Writer;
use libgraphql_compiler::build::WriterConfig;
use libgraphql_compiler::build::WriterInputs;
use libgraphql_compiler::schema::Schema;
use indexmap::IndexMap;
use std::path::PathBuf;
use std::sync::Arc;

const BASE_PARSER: &str = "base";
const SRC_PARSER: &str = "src";
const WRITER: &str = "artifacts";

/// Arguments shared by every command that runs a build.
#[derive(Debug, clap::Args)]
pub(crate) struct BuildArgs {
    #[arg(
        help="Directory of GraphQL documents whose definitions may be \
             referenced from --src but get no artifacts of their own.",
        long,
    )]
    base_src: Option<PathBuf>,

    #[arg(
        help="Allow `@arguments` and `@argumentDefinitions` in documents.",
        long,
    )]
    experimental: bool,

    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "graphqls".to_string(),
        ],
        help="Set of file extensions to filter to when searching for files \
             within a directory.",
        long,
        value_delimiter = ',',
    )]
    graphql_file_exts: Vec<String>,

    #[arg(
        help="Directory the generated artifacts are written into.",
        long,
    )]
    out: PathBuf,

    #[arg(
        help="Path to the server schema in GraphQL SDL.",
        long,
    )]
    schema: PathBuf,

    #[arg(
        help="Do not persist query text, even when persisting is configured.",
        long,
    )]
    skip_persist: bool,

    #[arg(
        help="Directory of GraphQL documents to compile.",
        long,
    )]
    src: PathBuf,

    #[arg(
        help="Report out of date artifacts without writing anything.",
        long,
    )]
    pub(crate) validate: bool,
}
impl BuildArgs {
    pub(crate) fn load_schema(&self) -> anyhow::Result<Arc<Schema>> {
        log::debug!("Loading schema from {:#?}...", self.schema);
        let schema = Schema::builder()
            .load_file(&self.schema)
            .and_then(|builder| builder.build())
            .with_context(|| format!("Failed to load the schema at {:#?}", self.schema))?;
        Ok(Arc::new(schema))
    }

    pub(crate) fn runner(&self, schema: Arc<Schema>) -> Runner {
        let extractor = Arc::new(
            if self.experimental {
                GraphQLFileExtractor::experimental()
            } else {
                GraphQLFileExtractor::default()
            }
        );
        let file_matcher = FileMatcher::new(&self.graphql_file_exts);
        let parser_config = |base_dir: &PathBuf, base_parser: Option<&str>| {
            let schema = Arc::clone(&schema);
            ParserConfig {
                base_dir: base_dir.to_owned(),
                base_parser: base_parser.map(str::to_string),
                extractor: extractor.clone(),
                file_filter: accept_all(),
                file_matcher: file_matcher.clone(),
                get_schema: Arc::new(move || Arc::clone(&schema)),
            }
        };

        let mut parser_configs = IndexMap::new();
        let mut base_parsers = vec![];
        match &self.base_src {
            Some(base_src) => {
                parser_configs.insert(
                    SRC_PARSER.to_string(),
                    parser_config(&self.src, Some(BASE_PARSER)),
                );
                parser_configs.insert(BASE_PARSER.to_string(), parser_config(base_src, None));
                base_parsers.push(BASE_PARSER.to_string());
            },
            None => {
                parser_configs.insert(SRC_PARSER.to_string(), parser_config(&self.src, None));
            },
        }

        let output_dir = self.out.to_owned();
        let writer_config = WriterConfig {
            base_parsers,
            make_writer: Arc::new(move |inputs: WriterInputs| -> Box<dyn Writer> {
                let config = FileWriterConfig {
                    output_dir: output_dir.to_owned(),
                    persist_query: None,
                };
                Box::new(FileWriter::new(config, inputs))
            }),
            parser: SRC_PARSER.to_string(),
        };

        Runner::new(RunnerOptions {
            only_validate: self.validate,
            parser_configs,
            skip_persist: self.skip_persist,
            writer_configs: IndexMap::from([(WRITER.to_string(), writer_config)]),
        })
    }
}
