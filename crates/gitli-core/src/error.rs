//! Error types for gitli

use crate::IssueId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Issue #{0} not found")]
    NotFound(IssueId),

    #[error("Malformed record in {} (line {line}): {reason}", .path.display())]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Missing store file {}. Run 'gitli init' first.", .0.display())]
    MissingStore(PathBuf),

    #[error("Unable to find a git repository")]
    NoRepository,

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        Error::MalformedRecord {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }
}
