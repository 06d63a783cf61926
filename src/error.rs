use thiserror::Error;

/// Crate-wide error type.
///
/// The batch path keeps its three outcome classes distinguishable: a
/// successful call returns the rows-changed count, a failed row returns
/// [`SqliteTypedError::RowFailure`] with the offending row's index, and a
/// call against a closed connection returns
/// [`SqliteTypedError::ConnectionError`] before anything is attempted.
#[derive(Debug, Error)]
pub enum SqliteTypedError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Prepare error: {0}")]
    PrepareError(String),

    #[error("Query did not yield a row: {0}")]
    NoResult(String),

    #[error("Transaction error: {0}")]
    TransactionError(String),

    #[error("Row {index} failed: {message}")]
    RowFailure { index: usize, message: String },

    #[error("SQL execution error: {0}")]
    ExecutionError(String),
}

impl SqliteTypedError {
    /// True when the error identifies a specific failed batch row.
    #[must_use]
    pub fn failing_row(&self) -> Option<usize> {
        match self {
            SqliteTypedError::RowFailure { index, .. } => Some(*index),
            _ => None,
        }
    }
}
