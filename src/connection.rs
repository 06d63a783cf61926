//! Connection wrapper and lifecycle.

use std::path::Path;

use crate::engine::{EngineConnection, SqliteEngine};
use crate::error::SqliteTypedError;

/// A database connection parameterized over the engine capability surface.
///
/// Defaults to the rusqlite-backed [`SqliteEngine`]. The wrapper is
/// synchronous and single-threaded per call; it does not coordinate
/// concurrent use of one handle.
pub struct Connection<C: EngineConnection = SqliteEngine> {
    engine: Option<C>,
}

impl Connection<SqliteEngine> {
    /// Open (creating if needed) the database file at `path`.
    ///
    /// # Errors
    /// Returns [`SqliteTypedError::ConnectionError`] if the open fails.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SqliteTypedError> {
        SqliteEngine::open(path).map(Self::from_engine)
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    /// Returns [`SqliteTypedError::ConnectionError`] if the open fails.
    pub fn open_in_memory() -> Result<Self, SqliteTypedError> {
        SqliteEngine::open_in_memory().map(Self::from_engine)
    }
}

impl<C: EngineConnection> Connection<C> {
    /// Adopt an already-open engine handle.
    #[must_use]
    pub fn from_engine(engine: C) -> Self {
        Self {
            engine: Some(engine),
        }
    }

    /// Drop the engine handle. Every subsequent call fails with
    /// [`SqliteTypedError::ConnectionError`] before touching the engine.
    pub fn close(&mut self) {
        self.engine = None;
    }

    /// Whether a live engine handle is attached.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.engine.is_some()
    }

    pub(crate) fn engine(&self) -> Result<&C, SqliteTypedError> {
        self.engine
            .as_ref()
            .ok_or_else(|| SqliteTypedError::ConnectionError("no live database connection".into()))
    }

    /// Run `sql` directly against the engine, outside the prepare/bind/step
    /// machinery. Useful for DDL and setup batches.
    ///
    /// # Errors
    /// Returns [`SqliteTypedError::ConnectionError`] when closed, otherwise
    /// the engine's execution error with its message text.
    pub fn execute_raw(&self, sql: &str) -> Result<(), SqliteTypedError> {
        self.engine()?.exec_raw(sql)
    }

    /// Engine-wide counter of rows changed since the connection opened;
    /// zero when the connection is closed.
    #[must_use]
    pub fn total_changes(&self) -> u64 {
        self.engine.as_ref().map_or(0, EngineConnection::total_changes)
    }
}
