use crate::build::FileMatcher;
use async_trait::async_trait;
use indexmap::IndexSet;
use notify::RecommendedWatcher;
use notify::RecursiveMode;
use notify::Watcher;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error)]
pub enum WatcherError {
    #[error("Failed to list the files under {base_dir:?}: {err}")]
    ListFiles {
        base_dir: PathBuf,
        err: walkdir::Error,
    },

    #[error("Failed to watch {base_dir:?}: {err}")]
    Notify {
        base_dir: PathBuf,
        err: notify::Error,
    },
}

/// A stream of file change batches for one directory.
///
/// The first batch lists every matching file that exists when the source is
/// created. Paths are relative to the watched directory.
#[async_trait]
pub trait ChangeSource: Send {
    /// `None` once the source will produce no further batches.
    async fn next_batch(&mut self) -> Option<Vec<PathBuf>>;
}

/// A [`ChangeSource`] fed by filesystem notifications.
pub struct FileChangeWatcher {
    initial_batch: Option<Vec<PathBuf>>,
    receiver: mpsc::UnboundedReceiver<Vec<PathBuf>>,
    // Dropping the watcher stops notifications.
    _watcher: RecommendedWatcher,
}
impl FileChangeWatcher {
    pub fn new(base_dir: &Path, file_matcher: FileMatcher) -> Result<Self, WatcherError> {
        let initial_batch = file_matcher.list_files(base_dir)
            .map_err(|err| WatcherError::ListFiles {
                base_dir: base_dir.to_path_buf(),
                err,
            })?;

        let notify_err = |err: notify::Error| WatcherError::Notify {
            base_dir: base_dir.to_path_buf(),
            err,
        };
        // Notifications carry canonical paths.
        let watched_dir = base_dir.canonicalize()
            .map_err(|err| notify_err(notify::Error::io(err)))?;

        let (sender, receiver) = mpsc::unbounded_channel();
        let event_dir = watched_dir.to_owned();
        let mut watcher = notify::recommended_watcher(
            move |result: notify::Result<notify::Event>| match result {
                Ok(event) => {
                    let changed: Vec<PathBuf> = event.paths.iter()
                        .filter(|path| file_matcher.matches(path))
                        .filter_map(|path| path.strip_prefix(&event_dir).ok())
                        .map(Path::to_path_buf)
                        .collect();
                    if !changed.is_empty() {
                        // The receiver only goes away with the watcher.
                        let _ = sender.send(changed);
                    }
                },
                Err(err) => log::warn!("File watcher error: {err}"),
            },
        ).map_err(notify_err)?;
        watcher.watch(&watched_dir, RecursiveMode::Recursive).map_err(notify_err)?;

        Ok(Self {
            initial_batch: Some(initial_batch),
            receiver,
            _watcher: watcher,
        })
    }
}
#[async_trait]
impl ChangeSource for FileChangeWatcher {
    async fn next_batch(&mut self) -> Option<Vec<PathBuf>> {
        if let Some(initial_batch) = self.initial_batch.take() {
            return Some(initial_batch);
        }

        // Coalesce whatever else has queued up behind the first event.
        let mut changed: IndexSet<PathBuf> = self.receiver.recv().await?.into_iter().collect();
        while let Ok(more) = self.receiver.try_recv() {
            changed.extend(more);
        }
        Some(changed.into_iter().collect())
    }
}
