use crate::build::to_seconds;
use crate::build::ChangeSource;
use crate::build::DirectoryChanges;
use crate::build::DocumentExtractor;
use crate::build::FileChangeWatcher;
use crate::build::FileFilter;
use crate::build::FileMatcher;
use crate::build::FileParser;
use crate::build::FileParserError;
use crate::build::WatcherError;
use crate::build::Writer;
use crate::build::WriterInputs;
use crate::document::Document;
use crate::schema::Schema;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::time::Instant;
use thiserror::Error;

type Result<T> = std::result::Result<T, RunnerError>;

pub type GetSchema = Arc<dyn Fn() -> Arc<Schema> + Send + Sync>;
pub type MakeWriter = Arc<dyn Fn(WriterInputs) -> Box<dyn Writer> + Send + Sync>;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Failed to list the files of parser `{parser_name}`: {err}")]
    ListFiles {
        parser_name: String,
        err: walkdir::Error,
    },

    #[error("Failed to parse the files of parser `{parser_name}`: {err}")]
    Parse {
        parser_name: String,
        err: FileParserError,
    },

    #[error(transparent)]
    Watch(#[from] WatcherError),
}

/// Where one parser finds its files and how it reads them.
#[derive(Clone)]
pub struct ParserConfig {
    pub base_dir: PathBuf,

    /// A parser whose files must be parsed before this one's.
    pub base_parser: Option<String>,
    pub extractor: Arc<dyn DocumentExtractor>,
    pub file_filter: FileFilter,
    pub file_matcher: FileMatcher,
    pub get_schema: GetSchema,
}

/// Which parsers feed one writer, and how the writer is created.
#[derive(Clone)]
pub struct WriterConfig {
    /// Parsers whose definitions may be referenced but are not written.
    pub base_parsers: Vec<String>,
    pub make_writer: MakeWriter,

    /// The parser whose definitions are written.
    pub parser: String,
}

#[derive(Clone, Default)]
pub struct RunnerOptions {
    /// Report what would change without touching any output.
    pub only_validate: bool,
    pub parser_configs: IndexMap<String, ParserConfig>,
    pub skip_persist: bool,
    pub writer_configs: IndexMap<String, WriterConfig>,
}

/// The result of one writer run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WriteOutcome {
    pub changes: DirectoryChanges,

    /// The writer failed; `changes` is then empty.
    pub failed: bool,
}
impl WriteOutcome {
    pub fn has_changes(&self) -> bool {
        self.changes.has_changes()
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BuildSummary {
    pub failed_writers: Vec<String>,
    pub has_changes: bool,
}

/// Drives parsers and writers: one-shot builds through
/// [`compile_all`](Self::compile_all) and incremental rebuilds through
/// [`watch`](Self::watch).
pub struct Runner {
    options: RunnerOptions,

    /// Parser name to the names of the writers that read it.
    parser_writers: IndexMap<String, IndexSet<String>>,
    parsers: Mutex<HashMap<String, FileParser>>,
}
impl Runner {
    /// Panics when a writer names a parser that is not configured.
    pub fn new(options: RunnerOptions) -> Self {
        let mut parser_writers: IndexMap<String, IndexSet<String>> = options.parser_configs.keys()
            .map(|parser_name| (parser_name.to_owned(), IndexSet::new()))
            .collect();
        for (writer_name, config) in &options.writer_configs {
            for parser_name in config.base_parsers.iter().chain([&config.parser]) {
                match parser_writers.get_mut(parser_name) {
                    Some(writers) => {
                        writers.insert(writer_name.to_owned());
                    },
                    None => panic!(
                        "Writer `{writer_name}` references unknown parser `{parser_name}`",
                    ),
                }
            }
        }

        Self {
            options,
            parser_writers,
            parsers: Mutex::new(HashMap::new()),
        }
    }

    /// Parse every configured parser, then run every configured writer.
    pub async fn compile_all(&self) -> Result<BuildSummary> {
        self.lock_parsers().clear();
        for parser_name in self.options.parser_configs.keys() {
            self.parse_everything(parser_name)?;
        }

        let mut summary = BuildSummary::default();
        for writer_name in self.options.writer_configs.keys() {
            let outcome = self.write(writer_name).await;
            if outcome.failed {
                summary.failed_writers.push(writer_name.to_owned());
            }
            summary.has_changes |= outcome.has_changes();
        }
        Ok(summary)
    }

    pub fn is_parsed(&self, parser_name: &str) -> bool {
        self.lock_parsers().contains_key(parser_name)
    }

    /// Parse every file of `parser_name`, after its base parser. Does nothing
    /// when the parser has already been parsed.
    pub fn parse_everything(&self, parser_name: &str) -> Result<()> {
        if self.is_parsed(parser_name) {
            return Ok(());
        }
        let config = self.parser_config(parser_name);
        if let Some(base_parser) = &config.base_parser {
            self.parse_everything(base_parser)?;
        }

        let files = config.file_matcher.list_files(&config.base_dir)
            .map_err(|err| RunnerError::ListFiles {
                parser_name: parser_name.to_string(),
                err,
            })?;
        let mut parser = FileParser::new(&config.base_dir, Arc::clone(&config.extractor));
        self.parse_file_changes_with(parser_name, &mut parser, &files)?;
        self.lock_parsers().insert(parser_name.to_string(), parser);
        Ok(())
    }

    /// Run one writer over the current documents of its parsers.
    ///
    /// A failing writer is logged and reported as having changed nothing.
    /// Panics when the writer or any parser it reads has not been set up.
    pub async fn write(&self, writer_name: &str) -> WriteOutcome {
        log::info!("\nWriting {writer_name}");
        let started_at = Instant::now();
        let config = self.writer_config(writer_name);

        let (documents, base_documents) = {
            let parsers = self.lock_parsers();
            let mut base_documents = IndexMap::new();
            for base_parser in &config.base_parsers {
                base_documents.extend(parsed(&parsers, base_parser).documents());
            }
            (parsed(&parsers, &config.parser).documents(), base_documents)
        };

        let writer = (config.make_writer)(WriterInputs {
            base_documents,
            documents,
            only_validate: self.options.only_validate,
            schema: (self.parser_config(&config.parser).get_schema)(),
            skip_persist: self.options.skip_persist,
        });
        let changes = match writer.write_all().await {
            Ok(changes) => changes,
            Err(err) => {
                log::error!("Error writing {writer_name}:\n{err}");
                return WriteOutcome {
                    changes: DirectoryChanges::default(),
                    failed: true,
                };
            },
        };

        if self.options.only_validate {
            log_files("Missing", &changes.created);
            log_files("Out of date", &changes.updated);
            log_files("Extra", &changes.deleted);
        } else {
            log_files("Created", &changes.created);
            log_files("Updated", &changes.updated);
            log_files("Deleted", &changes.deleted);
            log::info!("Unchanged: {} files", changes.unchanged.len());
        }
        log::info!("Written {writer_name} in {}", to_seconds(started_at.elapsed()));

        WriteOutcome {
            changes,
            failed: false,
        }
    }

    /// Watch the directory of `parser_name` and rerun its dependent writers
    /// on every change, until the watcher stops.
    pub async fn watch(self: &Arc<Self>, parser_name: &str) -> Result<()> {
        let config = self.parser_config(parser_name);
        let source = FileChangeWatcher::new(&config.base_dir, config.file_matcher.clone())?;
        self.watch_with(parser_name, source).await
    }

    /// Like [`watch`](Self::watch), with the change batches coming from
    /// `source`.
    ///
    /// The first batch describes the files as they were when watching
    /// started, which the preceding [`compile_all`](Self::compile_all) has
    /// already handled, so it is skipped. Every later batch is re-parsed and
    /// then handed to all dependent writers at once, without waiting for
    /// the writers of earlier batches to finish.
    ///
    /// Panics when `parser_name` has not been parsed.
    pub async fn watch_with(
        self: &Arc<Self>,
        parser_name: &str,
        mut source: impl ChangeSource,
    ) -> Result<()> {
        log::info!("Watching for changes to {parser_name}...");
        let dependent_writers: Vec<String> = self.parser_writers.get(parser_name)
            .map(|writers| writers.iter().cloned().collect())
            .unwrap_or_default();

        let mut first_change = true;
        let mut in_flight = vec![];
        while let Some(files) = source.next_batch().await {
            assert!(
                self.is_parsed(parser_name),
                "Trying to watch an uncompiled parser config: {parser_name}",
            );
            if first_change {
                first_change = false;
                continue;
            }
            if let Err(err) = self.parse_file_changes(parser_name, &files) {
                log::error!("{err}");
                continue;
            }

            let runner = Arc::clone(self);
            let writers = dependent_writers.clone();
            in_flight.push(tokio::spawn(async move {
                futures::future::join_all(writers.iter().map(|writer| runner.write(writer))).await
            }));
        }

        for result in futures::future::join_all(in_flight).await {
            if let Err(err) = result {
                log::error!("A watch-mode write task failed: {err}");
            }
        }
        Ok(())
    }

    /// Compile everything once, then watch every parser.
    pub async fn watch_all(self: &Arc<Self>) -> Result<BuildSummary> {
        let summary = self.compile_all().await?;
        let watches = self.options.parser_configs.keys()
            .map(|parser_name| self.watch(parser_name));
        futures::future::try_join_all(watches).await?;
        Ok(summary)
    }

    /// Re-parse `files` of an already parsed parser.
    fn parse_file_changes(&self, parser_name: &str, files: &[PathBuf]) -> Result<()> {
        let mut parsers = self.lock_parsers();
        let parser = match parsers.get_mut(parser_name) {
            Some(parser) => parser,
            None => panic!("Trying to update an unparsed parser: {parser_name}"),
        };
        self.parse_file_changes_with(parser_name, parser, files)
    }

    fn parse_file_changes_with(
        &self,
        parser_name: &str,
        parser: &mut FileParser,
        files: &[PathBuf],
    ) -> Result<()> {
        let started_at = Instant::now();
        let config = self.parser_config(parser_name);
        parser.parse_files(files, config.file_filter.as_ref())
            .map_err(|err| RunnerError::Parse {
                parser_name: parser_name.to_string(),
                err,
            })?;
        log::info!("Parsed {parser_name} in {}", to_seconds(started_at.elapsed()));
        Ok(())
    }

    /// Documents currently held by `parser_name`, if it has been parsed.
    pub fn documents(&self, parser_name: &str) -> Option<IndexMap<String, Arc<Document>>> {
        self.lock_parsers().get(parser_name).map(FileParser::documents)
    }

    fn lock_parsers(&self) -> MutexGuard<'_, HashMap<String, FileParser>> {
        self.parsers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn parser_config(&self, parser_name: &str) -> &ParserConfig {
        match self.options.parser_configs.get(parser_name) {
            Some(config) => config,
            None => panic!("Unknown parser `{parser_name}`"),
        }
    }

    fn writer_config(&self, writer_name: &str) -> &WriterConfig {
        match self.options.writer_configs.get(writer_name) {
            Some(config) => config,
            None => panic!("Unknown writer `{writer_name}`"),
        }
    }
}

fn parsed<'a>(parsers: &'a HashMap<String, FileParser>, parser_name: &str) -> &'a FileParser {
    match parsers.get(parser_name) {
        Some(parser) => parser,
        None => panic!("Trying to write from an unparsed parser: {parser_name}"),
    }
}

fn log_files(label: &str, files: &[String]) {
    if files.is_empty() {
        return;
    }
    log::info!("{label}:");
    for file in files {
        log::info!(" - {file}");
    }
}
