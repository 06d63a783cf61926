//! Capability boundary to the underlying SQLite engine.
//!
//! The rest of the crate only ever talks to the database through these two
//! traits, which mirror the handful of C-level primitives the layer needs:
//! prepare, bind by ordinal, step, column reads, reset, exec-raw-sql, and
//! the total-changes counter. Keeping the surface this narrow lets tests
//! drive every execution path with a scripted stub engine.

pub mod sqlite;

use crate::error::SqliteTypedError;

pub use sqlite::{SqliteEngine, SqliteStatement};

/// Result of advancing a statement by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A result row is available for column reads.
    Row,
    /// Execution finished; for DML this is the success status.
    Done,
    /// A lock held elsewhere blocked the step; not a query error.
    Busy,
}

/// One compiled statement handle.
///
/// Parameter ordinals are 1-based and result-column ordinals are 0-based,
/// matching SQLite's own convention. Column reads are infallible and apply
/// SQLite's column-conversion table when the stored class differs from the
/// requested one (integer read as double yields the same number, numbers
/// read as text yield their decimal rendering, text read as a number is
/// parsed by longest numeric prefix). An absent (NULL) text or blob reads
/// as empty, an absent numeric reads as zero.
pub trait EngineStatement {
    fn bind_int(&mut self, ordinal: usize, value: i32) -> Result<(), SqliteTypedError>;
    fn bind_int64(&mut self, ordinal: usize, value: i64) -> Result<(), SqliteTypedError>;
    fn bind_double(&mut self, ordinal: usize, value: f64) -> Result<(), SqliteTypedError>;
    fn bind_text(&mut self, ordinal: usize, value: &str) -> Result<(), SqliteTypedError>;
    fn bind_blob(&mut self, ordinal: usize, value: &[u8]) -> Result<(), SqliteTypedError>;

    /// Advance execution by one step.
    fn step(&mut self) -> Result<Step, SqliteTypedError>;

    /// Clear cursor state for reuse. Returns a status rather than failing
    /// hard so a batch caller may choose to skip rows whose reset fails.
    fn reset(&mut self) -> bool;

    fn column_int(&self, col: usize) -> i32;
    fn column_int64(&self, col: usize) -> i64;
    fn column_double(&self, col: usize) -> f64;
    fn column_text(&self, col: usize) -> String;
    fn column_blob(&self, col: usize) -> Vec<u8>;
}

/// One live engine connection.
pub trait EngineConnection {
    type Statement<'conn>: EngineStatement
    where
        Self: 'conn;

    /// Compile `sql` into a statement handle.
    ///
    /// # Errors
    /// Returns [`SqliteTypedError::PrepareError`] carrying the engine's
    /// message if compilation fails.
    fn prepare(&self, sql: &str) -> Result<Self::Statement<'_>, SqliteTypedError>;

    /// Run `sql` directly, bypassing the prepare/bind/step machinery.
    ///
    /// # Errors
    /// Returns [`SqliteTypedError::ExecutionError`] with the engine's
    /// message on failure.
    fn exec_raw(&self, sql: &str) -> Result<(), SqliteTypedError>;

    /// Engine-wide counter of rows changed since the connection opened.
    fn total_changes(&self) -> u64;
}
