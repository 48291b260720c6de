use crate::file_reader;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use walkdir::WalkDir;

/// A cheap pre-check deciding whether a matched file is worth parsing.
pub type FileFilter = Arc<dyn Fn(&Path) -> bool + Send + Sync>;

pub fn accept_all() -> FileFilter {
    Arc::new(|_: &Path| true)
}

/// Accept files whose content mentions `needle`.
pub fn content_contains(needle: impl Into<String>) -> FileFilter {
    let needle = needle.into();
    Arc::new(move |file_path: &Path| match file_reader::read_content(file_path) {
        Ok(content) => content.contains(needle.as_str()),
        Err(err) => {
            log::debug!("Skipping unreadable file {file_path:?}: {err}");
            false
        },
    })
}

/// Selects the files under a parser's base directory by extension.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileMatcher {
    extensions: Vec<String>,
}
impl FileMatcher {
    /// Extensions may be given with or without their leading `.`.
    pub fn new<S: AsRef<str>>(extensions: impl IntoIterator<Item = S>) -> Self {
        Self {
            extensions: extensions.into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_string())
                .collect(),
        }
    }

    pub fn matches(&self, file_path: &Path) -> bool {
        file_path.extension()
            .map(|ext| ext.to_string_lossy())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| *allowed == ext))
    }

    /// Every matching file at or under `base_dir`, relative to `base_dir`
    /// and sorted.
    pub fn list_files(&self, base_dir: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
        let mut files = vec![];
        for entry in WalkDir::new(base_dir).follow_links(true) {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || !self.matches(path) {
                log::trace!("Skipping {path:?}.");
                continue;
            }
            if let Ok(relative) = path.strip_prefix(base_dir) {
                files.push(relative.to_path_buf());
            }
        }
        files.sort();
        Ok(files)
    }
}
