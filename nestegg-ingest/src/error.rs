//! Error taxonomy for statement ingestion.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatementError>;

/// Everything that can stop a statement import.
///
/// Every variant is fatal to the parse that raised it: the caller gets a
/// header and holdings, or one of these; never a partial result. Rows the
/// format defines as noise (subtotals, blanks, the account-id footer) are
/// skipped silently and never reach an error path.
#[derive(Error, Debug)]
pub enum StatementError {
    /// The path cannot be opened, or the CSV stream fails mid-read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Banner or account header row missing, short, or non-numeric.
    #[error("malformed statement header: {0}")]
    MalformedHeader(String),

    /// A row that classified as a holding failed field extraction.
    #[error("malformed holding row {row}: {reason}")]
    MalformedHoldingRow { row: usize, reason: String },

    /// Filename does not encode a statement date.
    #[error("unrecognized statement filename {name:?}: expected Statement<MDDYYYY> or Statement<MMDDYYYY>")]
    UnrecognizedFilenameDate { name: String },
}

impl StatementError {
    pub(crate) fn io(path: &Path, source: csv::Error) -> StatementError {
        StatementError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
