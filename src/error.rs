//! Error types for reading, rewriting and writing source files

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::rewrite::RewriteError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("'{}' is not inside a git working tree", path.display())]
    NotInRepository { path: PathBuf },

    #[error("'{}' does not exist at revision '{rev}'", path.display())]
    NotInRevision { path: PathBuf, rev: String },

    #[error("'{}' is not valid UTF-8", path.display())]
    NotUtf8 { path: PathBuf },

    #[error(transparent)]
    Rewrite(#[from] RewriteError),

    #[error("{count} lazy import(s) survived the rewrite, refusing to write (use --force to write anyway)")]
    Leftovers { count: usize },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
