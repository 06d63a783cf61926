//! Single-statement execution: typed reads and fire-and-forget writes.

use tracing::debug;

use crate::codec::{SqlRow, SqlScalar};
use crate::connection::Connection;
use crate::engine::{EngineConnection, Step};
use crate::error::SqliteTypedError;
use crate::statement::PreparedStatement;

impl<C: EngineConnection> Connection<C> {
    /// Run `sql` to completion and collect every result row as the tuple
    /// shape `R`, in the order the engine produced them.
    ///
    /// `bindvals` uses the all-text convenience binding at ordinals
    /// 1..=len; pass an empty slice for parameterless queries.
    ///
    /// # Errors
    /// `ConnectionError` when closed, `PrepareError` for bad SQL, and
    /// `ExecutionError` if a step fails or reports the database busy.
    pub fn query_many<R: SqlRow>(
        &self,
        sql: &str,
        bindvals: &[&str],
    ) -> Result<Vec<R>, SqliteTypedError> {
        let engine = self.engine()?;
        let mut stmt = PreparedStatement::prepare(engine, sql)?;
        stmt.bind_text_params(bindvals)?;

        let mut rows = Vec::new();
        loop {
            match stmt.step()? {
                Step::Row => rows.push(stmt.extract_row::<R>()),
                Step::Done => break,
                Step::Busy => {
                    return Err(SqliteTypedError::ExecutionError(
                        "database is busy".into(),
                    ));
                }
            }
        }
        Ok(rows)
    }

    /// Run `sql` and extract a single scalar from column 0 of the first
    /// result row.
    ///
    /// The statement is stepped exactly once: extra result rows are
    /// silently ignored, never an error.
    ///
    /// # Errors
    /// `NoResult` (carrying the query text) if the first step does not
    /// yield a row; otherwise as [`Connection::query_many`].
    pub fn query_one<T: SqlScalar>(
        &self,
        sql: &str,
        bindvals: &[&str],
    ) -> Result<T, SqliteTypedError> {
        let engine = self.engine()?;
        let mut stmt = PreparedStatement::prepare(engine, sql)?;
        stmt.bind_text_params(bindvals)?;

        match stmt.step()? {
            Step::Row => Ok(stmt.scalar::<T>()),
            Step::Done | Step::Busy => Err(SqliteTypedError::NoResult(sql.to_owned())),
        }
    }

    /// Run `sql` for its side effect, discarding any result rows.
    ///
    /// A `Busy` step yields the current thread and steps again, with no
    /// backoff, retry limit, or timeout: a contended lock spins until the
    /// holder releases it.
    ///
    /// # Errors
    /// `ConnectionError` when closed, `PrepareError` for bad SQL, and
    /// `ExecutionError` if the step fails.
    pub fn execute(&self, sql: &str, bindvals: &[&str]) -> Result<(), SqliteTypedError> {
        let engine = self.engine()?;
        let mut stmt = PreparedStatement::prepare(engine, sql)?;
        stmt.bind_text_params(bindvals)?;

        loop {
            match stmt.step()? {
                Step::Busy => {
                    debug!(sql, "step returned busy, retrying");
                    std::thread::yield_now();
                }
                Step::Row | Step::Done => return Ok(()),
            }
        }
    }
}
