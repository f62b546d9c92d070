use std::path::PathBuf;

use thiserror::Error;

/// Errors returned while constructing or querying a [`crate::LazyCsv`].
///
/// Grounded on the error-kind taxonomy of spec §7: invalid arguments,
/// I/O failure and boundary failure each get their own variant so callers
/// can match on what went wrong instead of parsing a message.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LazyCsvError {
    /// `buffer_size` was zero, or a [`crate::Sequence`] was given a zero
    /// step.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Opening, stat-ing, mmap-ing or writing one of the four files failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `(row, col)` pair (or a resolved negative index) fell outside
    /// `[0, rows) x [0, cols)`.
    #[error("index out of bounds: ({row}, {col}) but reader has {rows} rows and {cols} cols")]
    Boundary {
        row: i64,
        col: i64,
        rows: usize,
        cols: usize,
    },
}

pub type Result<T> = std::result::Result<T, LazyCsvError>;
