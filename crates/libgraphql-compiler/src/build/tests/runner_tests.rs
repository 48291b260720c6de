use crate::build::accept_all;
use crate::build::BuildSummary;
use crate::build::ChangeSource;
use crate::build::DirectoryChanges;
use crate::build::FileMatcher;
use crate::build::GraphQLFileExtractor;
use crate::build::MakeWriter;
use crate::build::ParserConfig;
use crate::build::PersistQueryError;
use crate::build::Runner;
use crate::build::RunnerError;
use crate::build::RunnerOptions;
use crate::build::Writer;
use crate::build::WriterConfig;
use crate::build::WriterError;
use crate::build::WriterInputs;
use crate::test_utils::base_schema;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::VecDeque;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

type Result<T> = std::result::Result<T, RunnerError>;

/// What one writer run was handed.
#[derive(Clone, Debug, PartialEq)]
struct RecordedRun {
    base_documents: Vec<String>,
    documents: Vec<String>,
    writer_name: String,
}

type RunLog = Arc<Mutex<Vec<RecordedRun>>>;

/// Records its inputs and reports every document as a created file.
struct RecordingWriter {
    fail: bool,
    inputs: WriterInputs,
    log: RunLog,
    writer_name: String,
}
#[async_trait]
impl Writer for RecordingWriter {
    async fn write_all(self: Box<Self>) -> std::result::Result<DirectoryChanges, WriterError> {
        let documents: Vec<String> = self.inputs.documents.keys().cloned().collect();
        self.log.lock().expect("run log lock").push(RecordedRun {
            base_documents: self.inputs.base_documents.keys().cloned().collect(),
            documents: documents.clone(),
            writer_name: self.writer_name.to_owned(),
        });
        if self.fail {
            return Err(WriterError::PersistQuery {
                name: self.writer_name,
                err: PersistQueryError("unreachable store".to_string()),
            });
        }
        Ok(DirectoryChanges {
            created: documents,
            ..DirectoryChanges::default()
        })
    }
}

fn make_writer(log: &RunLog, writer_name: &str, fail: bool) -> MakeWriter {
    let log = Arc::clone(log);
    let writer_name = writer_name.to_string();
    Arc::new(move |inputs: WriterInputs| -> Box<dyn Writer> {
        Box::new(RecordingWriter {
            fail,
            inputs,
            log: Arc::clone(&log),
            writer_name: writer_name.to_owned(),
        })
    })
}

/// Replays a fixed list of change batches.
struct VecSource(VecDeque<Vec<PathBuf>>);
impl VecSource {
    fn new(batches: &[&[&str]]) -> Self {
        Self(batches.iter()
            .map(|batch| batch.iter().map(PathBuf::from).collect())
            .collect())
    }
}
#[async_trait]
impl ChangeSource for VecSource {
    async fn next_batch(&mut self) -> Option<Vec<PathBuf>> {
        self.0.pop_front()
    }
}

fn write(dir: &Path, file: &str, content: &str) {
    std::fs::write(dir.join(file), content).expect("test file should be writable");
}

fn parser_config(base_dir: &Path, base_parser: Option<&str>) -> ParserConfig {
    ParserConfig {
        base_dir: base_dir.to_path_buf(),
        base_parser: base_parser.map(str::to_string),
        extractor: Arc::new(GraphQLFileExtractor::default()),
        file_filter: accept_all(),
        file_matcher: FileMatcher::new(["graphql"]),
        get_schema: Arc::new(base_schema),
    }
}

fn writer_config(parser: &str, base_parsers: &[&str], make_writer: MakeWriter) -> WriterConfig {
    WriterConfig {
        base_parsers: base_parsers.iter().map(|name| name.to_string()).collect(),
        make_writer,
        parser: parser.to_string(),
    }
}

fn runs(log: &RunLog) -> Vec<RecordedRun> {
    log.lock().expect("run log lock").clone()
}

mod compile_all {
    use super::*;

    #[tokio::test]
    async fn base_documents_reach_the_writer() -> Result<()> {
        let base_dir = tempfile::tempdir().expect("tempdir");
        let src_dir = tempfile::tempdir().expect("tempdir");
        write(base_dir.path(), "Shared.graphql", "fragment Shared on User { id }");
        write(src_dir.path(), "Q.graphql", "query Q { me { ...Shared } }");

        let log = RunLog::default();
        let runner = Runner::new(RunnerOptions {
            parser_configs: IndexMap::from([
                ("src".to_string(), parser_config(src_dir.path(), Some("base"))),
                ("base".to_string(), parser_config(base_dir.path(), None)),
            ]),
            writer_configs: IndexMap::from([
                ("app".to_string(), writer_config("src", &["base"], make_writer(&log, "app", false))),
            ]),
            ..RunnerOptions::default()
        });

        let summary = runner.compile_all().await?;
        assert_eq!(summary, BuildSummary {
            failed_writers: vec![],
            has_changes: true,
        });
        assert!(runner.is_parsed("base"));
        assert_eq!(runs(&log), vec![RecordedRun {
            base_documents: vec!["Shared.graphql".to_string()],
            documents: vec!["Q.graphql".to_string()],
            writer_name: "app".to_string(),
        }]);
        Ok(())
    }

    #[tokio::test]
    async fn a_failing_writer_does_not_stop_the_others() -> Result<()> {
        let src_dir = tempfile::tempdir().expect("tempdir");
        write(src_dir.path(), "F.graphql", "fragment F on User { id }");

        let log = RunLog::default();
        let runner = Runner::new(RunnerOptions {
            parser_configs: IndexMap::from([
                ("src".to_string(), parser_config(src_dir.path(), None)),
            ]),
            writer_configs: IndexMap::from([
                ("broken".to_string(), writer_config("src", &[], make_writer(&log, "broken", true))),
                ("ok".to_string(), writer_config("src", &[], make_writer(&log, "ok", false))),
            ]),
            ..RunnerOptions::default()
        });

        let summary = runner.compile_all().await?;
        assert_eq!(summary.failed_writers, vec!["broken".to_string()]);
        assert!(summary.has_changes);
        let writers: Vec<String> = runs(&log).into_iter().map(|run| run.writer_name).collect();
        assert_eq!(writers, vec!["broken".to_string(), "ok".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn parse_errors_name_the_parser() {
        let src_dir = tempfile::tempdir().expect("tempdir");
        write(src_dir.path(), "Bad.graphql", "fragment Bad on User {");

        let log = RunLog::default();
        let runner = Runner::new(RunnerOptions {
            parser_configs: IndexMap::from([
                ("src".to_string(), parser_config(src_dir.path(), None)),
            ]),
            writer_configs: IndexMap::from([
                ("app".to_string(), writer_config("src", &[], make_writer(&log, "app", false))),
            ]),
            ..RunnerOptions::default()
        });

        let result = runner.compile_all().await;
        assert!(
            matches!(&result, Err(RunnerError::Parse { parser_name, .. }) if parser_name == "src"),
            "Expected a parse error, got {result:?}",
        );
        assert!(runs(&log).is_empty());
    }

    #[test]
    #[should_panic(expected = "references unknown parser `missing`")]
    fn writers_must_name_configured_parsers() {
        let log = RunLog::default();
        Runner::new(RunnerOptions {
            writer_configs: IndexMap::from([
                ("app".to_string(), writer_config("missing", &[], make_writer(&log, "app", false))),
            ]),
            ..RunnerOptions::default()
        });
    }
}

mod watch {
    use super::*;

    fn single_parser_runner(src_dir: &Path, log: &RunLog) -> Arc<Runner> {
        Arc::new(Runner::new(RunnerOptions {
            parser_configs: IndexMap::from([
                ("src".to_string(), parser_config(src_dir, None)),
            ]),
            writer_configs: IndexMap::from([
                ("app".to_string(), writer_config("src", &[], make_writer(log, "app", false))),
            ]),
            ..RunnerOptions::default()
        }))
    }

    #[tokio::test]
    async fn the_initial_batch_is_skipped() -> Result<()> {
        let src_dir = tempfile::tempdir().expect("tempdir");
        write(src_dir.path(), "F.graphql", "fragment F on User { id }");
        let log = RunLog::default();
        let runner = single_parser_runner(src_dir.path(), &log);

        runner.compile_all().await?;
        runner.watch_with("src", VecSource::new(&[&["F.graphql"]])).await?;
        assert_eq!(runs(&log).len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn changed_files_are_reparsed_incrementally() -> Result<()> {
        let src_dir = tempfile::tempdir().expect("tempdir");
        write(src_dir.path(), "f1.graphql", "fragment A on User { id }");
        write(src_dir.path(), "f2.graphql", "fragment B on User { name }");
        let log = RunLog::default();
        let runner = single_parser_runner(src_dir.path(), &log);

        runner.compile_all().await?;
        let before = runner.documents("src").expect("src should be parsed");

        write(src_dir.path(), "f2.graphql", "fragment B on User { id name }");
        write(src_dir.path(), "f3.graphql", "fragment C on User { id }");
        let source = VecSource::new(&[
            &["f1.graphql", "f2.graphql"],
            &["f2.graphql", "f3.graphql"],
        ]);
        runner.watch_with("src", source).await?;

        let after = runner.documents("src").expect("src should be parsed");
        assert!(Arc::ptr_eq(&before["f1.graphql"], &after["f1.graphql"]));
        assert!(!Arc::ptr_eq(&before["f2.graphql"], &after["f2.graphql"]));
        assert!(after.contains_key("f3.graphql"));

        let runs = runs(&log);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].documents.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn a_bad_change_is_skipped_until_fixed() -> Result<()> {
        let src_dir = tempfile::tempdir().expect("tempdir");
        write(src_dir.path(), "F.graphql", "fragment F on User { id }");
        let log = RunLog::default();
        let runner = single_parser_runner(src_dir.path(), &log);
        runner.compile_all().await?;

        write(src_dir.path(), "F.graphql", "fragment F on User {");
        runner.watch_with("src", VecSource::new(&[&[], &["F.graphql"]])).await?;
        assert_eq!(runs(&log).len(), 1);

        write(src_dir.path(), "F.graphql", "fragment F on User { name }");
        runner.watch_with("src", VecSource::new(&[&[], &["F.graphql"]])).await?;
        assert_eq!(runs(&log).len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn base_changes_rerun_dependent_writers_despite_a_failing_sibling() -> Result<()> {
        let base_dir = tempfile::tempdir().expect("tempdir");
        let src_dir = tempfile::tempdir().expect("tempdir");
        write(base_dir.path(), "Shared.graphql", "fragment Shared on User { id }");
        write(src_dir.path(), "Q.graphql", "query Q { me { ...Shared } }");

        let log = RunLog::default();
        let runner = Arc::new(Runner::new(RunnerOptions {
            parser_configs: IndexMap::from([
                ("src".to_string(), parser_config(src_dir.path(), Some("base"))),
                ("base".to_string(), parser_config(base_dir.path(), None)),
            ]),
            writer_configs: IndexMap::from([
                ("app".to_string(), writer_config("src", &["base"], make_writer(&log, "app", false))),
                ("bad".to_string(), writer_config("src", &["base"], make_writer(&log, "bad", true))),
            ]),
            ..RunnerOptions::default()
        }));

        let summary = runner.compile_all().await?;
        assert_eq!(summary.failed_writers, vec!["bad".to_string()]);

        write(base_dir.path(), "Shared.graphql", "fragment Shared on User { id name }");
        runner.watch_with("base", VecSource::new(&[&[], &["Shared.graphql"]])).await?;

        let runs = runs(&log);
        let writers: Vec<&str> = runs.iter().map(|run| run.writer_name.as_str()).collect();
        assert_eq!(writers, vec!["app", "bad", "app", "bad"]);
        assert_eq!(runs[2].base_documents, vec!["Shared.graphql".to_string()]);
        assert_eq!(runs[2].documents, vec!["Q.graphql".to_string()]);
        Ok(())
    }

    #[tokio::test]
    #[should_panic(expected = "Trying to watch an uncompiled parser config")]
    async fn watching_requires_a_compiled_parser() {
        let src_dir = tempfile::tempdir().expect("tempdir");
        let log = RunLog::default();
        let runner = single_parser_runner(src_dir.path(), &log);

        let _ = runner.watch_with("src", VecSource::new(&[&[]])).await;
    }
}
