use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a tree from an external source. Tree
/// mutation itself never fails; guarded operations fall back to no-ops.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("malformed record on line {line}: expected 6 fields")]
    MalformedRecord { line: usize },

    #[error("invalid citation count {value:?} on line {line}")]
    InvalidCitations { line: usize, value: String },
}
