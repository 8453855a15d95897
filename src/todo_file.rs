//! Reading and replacing the rebase todo file on disk.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Handle to a rebase todo file, usually `.git/rebase-merge/git-rebase-todo`.
#[derive(Debug)]
pub struct TodoFile {
    path: PathBuf,
}

impl TodoFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole todo into memory.
    pub fn read(&self) -> Result<String, Error> {
        fs::read_to_string(&self.path).map_err(|source| Error::Read {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// Replace the todo with `contents`.
    ///
    /// The new text is written to a sibling file which is then renamed over
    /// the original, so the todo is never truncated while it is still being
    /// read and a failed write leaves it untouched.
    pub fn replace(&self, contents: &str) -> Result<(), Error> {
        let staged = self.staging_path();
        fs::write(&staged, contents).map_err(|source| Error::Write {
            path: staged.display().to_string(),
            source,
        })?;

        if let Err(source) = fs::rename(&staged, &self.path) {
            let _ = fs::remove_file(&staged);
            return Err(Error::Swap {
                path: self.path.display().to_string(),
                source,
            });
        }

        tracing::debug!(path = %self.path.display(), "todo replaced");
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("todo"));
        name.push(".remaster");
        self.path.with_file_name(name)
    }
}

/// Errors from todo file access.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read todo file '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to move the rewritten todo over '{path}'")]
    Swap {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
