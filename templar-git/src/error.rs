//! Error types for templar-git.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from version-control operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// An error from libgit2 (missing revision, network failure, ...).
    /// Fetch failures are transient: surfaced immediately, never retried here.
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The repository has no working tree (bare repository).
    #[error("repository at {path} has no working tree")]
    NoWorkingTree { path: PathBuf },
}

/// Convenience constructor for [`GitError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> GitError {
    GitError::Io {
        path: path.into(),
        source,
    }
}
