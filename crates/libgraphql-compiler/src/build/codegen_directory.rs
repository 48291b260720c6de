use std::collections::HashSet;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

type Result<T> = std::result::Result<T, CodegenDirectoryError>;

pub const ARTIFACT_EXTENSION: &str = "graphql.json";

#[derive(Debug, Error)]
pub enum CodegenDirectoryError {
    #[error("Failed to create output directory {dir:?}: {err}")]
    CreateDir {
        dir: PathBuf,
        err: io::Error,
    },

    #[error("Failed to delete {file_path:?}: {err}")]
    DeleteFile {
        file_path: PathBuf,
        err: io::Error,
    },

    #[error("Failed to read {path:?}: {err}")]
    Read {
        path: PathBuf,
        err: io::Error,
    },

    #[error("Failed to write {file_path:?}: {err}")]
    WriteFile {
        file_path: PathBuf,
        err: io::Error,
    },
}

/// File names in an output directory, classified by how a write changed
/// them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DirectoryChanges {
    pub created: Vec<String>,
    pub deleted: Vec<String>,
    pub unchanged: Vec<String>,
    pub updated: Vec<String>,
}
impl DirectoryChanges {
    pub fn has_changes(&self) -> bool {
        !self.created.is_empty() || !self.updated.is_empty() || !self.deleted.is_empty()
    }
}

/// An output directory of generated artifacts.
///
/// Every file written during one run is tracked so that
/// [`delete_extra_files`](Self::delete_extra_files) can remove stale
/// artifacts afterwards. With `only_validate` nothing on disk is touched; the
/// recorded changes then describe what a real write would have done.
#[derive(Debug)]
pub struct CodegenDirectory {
    changes: DirectoryChanges,
    dir: PathBuf,
    only_validate: bool,
    written: HashSet<String>,
}
impl CodegenDirectory {
    pub async fn new(dir: impl Into<PathBuf>, only_validate: bool) -> Result<Self> {
        let dir = dir.into();
        if !only_validate {
            tokio::fs::create_dir_all(&dir).await
                .map_err(|err| CodegenDirectoryError::CreateDir {
                    dir: dir.to_owned(),
                    err,
                })?;
        }
        Ok(Self {
            changes: DirectoryChanges::default(),
            dir,
            only_validate,
            written: HashSet::new(),
        })
    }

    /// `<name>.graphql.json`
    pub fn artifact_file_name(name: &str) -> String {
        format!("{name}.{ARTIFACT_EXTENSION}")
    }

    pub fn changes(&self) -> &DirectoryChanges {
        &self.changes
    }

    pub fn dir(&self) -> &Path {
        self.dir.as_path()
    }

    pub fn into_changes(self) -> DirectoryChanges {
        self.changes
    }

    pub async fn write_file(&mut self, file_name: &str, content: &str) -> Result<()> {
        let file_path = self.dir.join(file_name);
        self.written.insert(file_name.to_string());

        match tokio::fs::read_to_string(&file_path).await {
            Ok(existing) if existing == content => {
                self.changes.unchanged.push(file_name.to_string());
                return Ok(());
            },
            Ok(_) => self.changes.updated.push(file_name.to_string()),
            Err(err) if err.kind() == io::ErrorKind::NotFound =>
                self.changes.created.push(file_name.to_string()),
            Err(err) => return Err(CodegenDirectoryError::Read {
                path: file_path,
                err,
            }),
        }

        if !self.only_validate {
            tokio::fs::write(&file_path, content).await
                .map_err(|err| CodegenDirectoryError::WriteFile {
                    file_path: file_path.to_owned(),
                    err,
                })?;
        }
        Ok(())
    }

    /// Remove every artifact file that was not written during this run.
    /// Files without the artifact extension are left alone.
    pub async fn delete_extra_files(&mut self) -> Result<()> {
        let read_err = |err: io::Error| CodegenDirectoryError::Read {
            path: self.dir.to_owned(),
            err,
        };
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(read_err(err)),
        };

        let suffix = format!(".{ARTIFACT_EXTENSION}");
        let mut extra = vec![];
        while let Some(entry) = entries.next_entry().await.map_err(read_err)? {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let is_file = entry.file_type().await.map_err(read_err)?.is_file();
            if is_file && file_name.ends_with(&suffix) && !self.written.contains(&file_name) {
                extra.push(file_name);
            }
        }
        extra.sort();

        for file_name in extra {
            if !self.only_validate {
                let file_path = self.dir.join(&file_name);
                tokio::fs::remove_file(&file_path).await
                    .map_err(|err| CodegenDirectoryError::DeleteFile { file_path, err })?;
            }
            self.changes.deleted.push(file_name);
        }
        Ok(())
    }
}
