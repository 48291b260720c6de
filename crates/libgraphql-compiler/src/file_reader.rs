use std::io;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

type Result<T> = std::result::Result<T, ReadContentError>;

const UTF8_BOM: char = '\u{feff}';

/// The UTF-8 text of `file_path`, without a leading byte order mark.
pub fn read_content<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let file_path = file_path.as_ref();
    match read_content_if_exists(file_path)? {
        Some(content) => Ok(content),
        None => Err(ReadContentError::NotAFile {
            file_path: file_path.to_path_buf(),
        }),
    }
}

/// Like [`read_content`], but `None` when nothing (or a directory) is at
/// `file_path`. Files deleted between listing and reading land here.
pub fn read_content_if_exists<P: AsRef<Path>>(file_path: P) -> Result<Option<String>> {
    let file_path = file_path.as_ref();
    let bytes = match std::fs::read(file_path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(_) if file_path.is_dir() => return Ok(None),
        Err(err) => return Err(ReadContentError::Io {
            file_path: file_path.to_path_buf(),
            err,
        }),
    };

    let mut content = String::from_utf8(bytes)
        .map_err(|err| ReadContentError::Decode {
            file_path: file_path.to_path_buf(),
            err,
        })?;
    if content.starts_with(UTF8_BOM) {
        content.remove(0);
    }
    Ok(Some(content))
}

#[derive(Debug, Error)]
pub enum ReadContentError {
    #[error("Failed to decode {file_path:?} as UTF-8: {err}")]
    Decode {
        file_path: PathBuf,
        err: std::string::FromUtf8Error,
    },

    #[error("Failed to read {file_path:?}: {err}")]
    Io {
        file_path: PathBuf,
        err: io::Error,
    },

    #[error("Expected {file_path:?} to be a file")]
    NotAFile {
        file_path: PathBuf,
    },
}
impl ReadContentError {
    pub fn file_path(&self) -> &Path {
        match self {
            Self::Decode { file_path, .. }
                | Self::Io { file_path, .. }
                | Self::NotAFile { file_path } => file_path.as_path(),
        }
    }
}
// `io::Error` has no `PartialEq`; two I/O failures compare by kind.
impl PartialEq for ReadContentError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Decode { file_path: a_path, err: a_err },
                Self::Decode { file_path: b_path, err: b_err }) =>
                a_path == b_path && a_err == b_err,

            (Self::Io { file_path: a_path, err: a_err },
                Self::Io { file_path: b_path, err: b_err }) =>
                a_path == b_path && a_err.kind() == b_err.kind(),

            (Self::NotAFile { file_path: a_path }, Self::NotAFile { file_path: b_path }) =>
                a_path == b_path,

            _ => false,
        }
    }
}
