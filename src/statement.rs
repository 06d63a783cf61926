//! Owned wrapper around one compiled statement handle.

use crate::codec::{SqlRow, SqlScalar};
use crate::engine::{EngineConnection, EngineStatement, Step};
use crate::error::SqliteTypedError;

/// A compiled query handle scoped to a single logical operation.
///
/// The native handle is exclusively owned by the call that created it and
/// finalized on drop, on every exit path.
pub struct PreparedStatement<'conn, C: EngineConnection + 'conn> {
    stmt: C::Statement<'conn>,
}

impl<'conn, C: EngineConnection> PreparedStatement<'conn, C> {
    /// Compile `sql` on `engine`.
    ///
    /// # Errors
    /// Returns [`SqliteTypedError::PrepareError`] with the engine's message
    /// if compilation fails.
    pub fn prepare(engine: &'conn C, sql: &str) -> Result<Self, SqliteTypedError> {
        Ok(Self {
            stmt: engine.prepare(sql)?,
        })
    }

    /// Bind a flat list of text parameters at ordinals 1..=len.
    ///
    /// This is the simplified all-text binding mode: every parameter is
    /// supplied as text regardless of the target column type, and every
    /// value is copied at bind time.
    ///
    /// # Errors
    /// Propagates the first failing bind.
    pub fn bind_text_params(&mut self, bindvals: &[&str]) -> Result<(), SqliteTypedError> {
        for (i, value) in bindvals.iter().enumerate() {
            self.stmt.bind_text(i + 1, value)?;
        }
        Ok(())
    }

    /// Bind one typed row shape at parameter ordinals 1..=N.
    ///
    /// # Errors
    /// Propagates the first failing bind.
    pub fn bind_row<R: SqlRow>(&mut self, row: &R) -> Result<(), SqliteTypedError> {
        row.bind_row(&mut self.stmt)
    }

    /// Extract the current result row as the shape `R`, columns 0..N-1.
    pub fn extract_row<R: SqlRow>(&self) -> R {
        R::extract_row(&self.stmt)
    }

    /// Read a single scalar from result column 0.
    pub fn scalar<T: SqlScalar>(&self) -> T {
        T::read_column(&self.stmt, 0)
    }

    /// Clear cursor state for reuse; `false` signals the caller may skip
    /// this execution rather than abort.
    pub fn reset(&mut self) -> bool {
        self.stmt.reset()
    }

    /// Advance execution by one step.
    ///
    /// # Errors
    /// Surfaces engine step failures; `Busy` is a status, not an error.
    pub fn step(&mut self) -> Result<Step, SqliteTypedError> {
        self.stmt.step()
    }
}
