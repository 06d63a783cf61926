//! Multi-row writes over one reused prepared statement.

use tracing::{debug, warn};

use crate::codec::SqlRow;
use crate::connection::Connection;
use crate::engine::{EngineConnection, Step};
use crate::error::SqliteTypedError;
use crate::statement::PreparedStatement;
use crate::transaction::TransactionGuard;

impl<C: EngineConnection> Connection<C> {
    /// Write every row in `rows` through one prepared statement, optionally
    /// wrapped in a transaction, and return the engine's total-changes
    /// delta across the whole batch.
    ///
    /// Reusing one statement amortizes compile cost; the transaction wrap
    /// makes the batch all-or-nothing at the caller's option. The delta is
    /// the net rows changed, not the row count: rows that are no-ops (for
    /// example `INSERT OR IGNORE` hitting an existing key) contribute zero.
    ///
    /// Rows whose `reset` fails are skipped, with a warning, and count as
    /// neither success nor failure.
    ///
    /// # Errors
    /// - [`SqliteTypedError::ConnectionError`] when closed; nothing is
    ///   attempted.
    /// - [`SqliteTypedError::TransactionError`] if BEGIN fails; no rows
    ///   attempted.
    /// - [`SqliteTypedError::PrepareError`] if compilation fails; rolled
    ///   back, no rows attempted.
    /// - [`SqliteTypedError::RowFailure`] with the index of the first row
    ///   whose bind or step failed; rolled back if a transaction was
    ///   begun, and no further rows are attempted.
    pub fn execute_batch<R: SqlRow>(
        &self,
        sql: &str,
        rows: &[R],
        use_transaction: bool,
    ) -> Result<u64, SqliteTypedError> {
        let engine = self.engine()?;
        let baseline = engine.total_changes();

        let tx = if use_transaction {
            Some(TransactionGuard::begin(engine)?)
        } else {
            None
        };

        // Guard drop rolls back if prepare fails here.
        let mut stmt = PreparedStatement::prepare(engine, sql)?;

        for (index, row) in rows.iter().enumerate() {
            if !stmt.reset() {
                warn!(index, "statement reset failed, skipping row");
                continue;
            }
            if let Err(e) = stmt.bind_row(row) {
                return Err(Self::fail_row(tx, index, &e.to_string()));
            }
            match stmt.step() {
                // A write statement reports Done; anything else, including
                // an unexpected result row, fails this row.
                Ok(Step::Done) => {}
                Ok(Step::Row) => {
                    return Err(Self::fail_row(tx, index, "statement returned a result row"));
                }
                Ok(Step::Busy) => {
                    return Err(Self::fail_row(tx, index, "database is busy"));
                }
                Err(e) => {
                    return Err(Self::fail_row(tx, index, &e.to_string()));
                }
            }
        }

        // Finalize before commit, matching the statement's single-batch
        // lifetime.
        drop(stmt);
        if let Some(tx) = tx {
            tx.commit()?;
        }
        Ok(engine.total_changes().saturating_sub(baseline))
    }

    fn fail_row(
        tx: Option<TransactionGuard<'_, C>>,
        index: usize,
        message: &str,
    ) -> SqliteTypedError {
        debug!(index, message, "batch row failed");
        if let Some(tx) = tx {
            tx.rollback();
        }
        SqliteTypedError::RowFailure {
            index,
            message: message.to_owned(),
        }
    }
}
