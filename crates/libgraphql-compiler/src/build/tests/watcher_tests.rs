use crate::build::ChangeSource;
use crate::build::FileChangeWatcher;
use crate::build::FileMatcher;
use crate::build::WatcherError;
use std::path::PathBuf;
use std::time::Duration;

type Result<T> = std::result::Result<T, WatcherError>;

const EVENT_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::test]
async fn the_first_batch_lists_existing_files() -> Result<()> {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("A.graphql"), "fragment A on User { id }")
        .expect("test file should be writable");
    std::fs::write(dir.path().join("notes.txt"), "not graphql")
        .expect("test file should be writable");

    let mut watcher = FileChangeWatcher::new(dir.path(), FileMatcher::new(["graphql"]))?;
    assert_eq!(watcher.next_batch().await, Some(vec![PathBuf::from("A.graphql")]));
    Ok(())
}

#[tokio::test]
async fn new_files_arrive_relative_to_the_watched_dir() -> Result<()> {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("A.graphql"), "fragment A on User { id }")
        .expect("test file should be writable");

    let mut watcher = FileChangeWatcher::new(dir.path(), FileMatcher::new(["graphql"]))?;
    assert_eq!(watcher.next_batch().await, Some(vec![PathBuf::from("A.graphql")]));

    std::fs::write(dir.path().join("notes.txt"), "not graphql")
        .expect("test file should be writable");
    std::fs::write(dir.path().join("B.graphql"), "fragment B on User { id }")
        .expect("test file should be writable");

    let batch = tokio::time::timeout(EVENT_TIMEOUT, watcher.next_batch())
        .await
        .expect("Expected a change batch before the timeout")
        .expect("watcher should still be running");
    assert!(batch.contains(&PathBuf::from("B.graphql")), "Unexpected batch: {batch:?}");
    assert!(!batch.contains(&PathBuf::from("notes.txt")), "Unexpected batch: {batch:?}");
    Ok(())
}
