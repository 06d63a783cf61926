//! Thin transaction pass-through: BEGIN / COMMIT / ROLLBACK.
//!
//! No nesting, no savepoints. Each operation issues one fixed SQL
//! statement through the engine's exec-raw capability.

use tracing::debug;

use crate::connection::Connection;
use crate::engine::EngineConnection;
use crate::error::SqliteTypedError;

/// Scope-bound transaction over one engine connection.
///
/// Rolls back on drop unless committed or rolled back explicitly, so every
/// early-error exit from a batch leaves the database clean.
pub(crate) struct TransactionGuard<'conn, C: EngineConnection> {
    engine: &'conn C,
    active: bool,
}

impl<'conn, C: EngineConnection> TransactionGuard<'conn, C> {
    pub(crate) fn begin(engine: &'conn C) -> Result<Self, SqliteTypedError> {
        engine
            .exec_raw("BEGIN")
            .map_err(|e| SqliteTypedError::TransactionError(e.to_string()))?;
        Ok(Self {
            engine,
            active: true,
        })
    }

    pub(crate) fn commit(mut self) -> Result<(), SqliteTypedError> {
        self.active = false;
        self.engine
            .exec_raw("COMMIT")
            .map_err(|e| SqliteTypedError::TransactionError(e.to_string()))
    }

    pub(crate) fn rollback(mut self) {
        self.active = false;
        if let Err(e) = self.engine.exec_raw("ROLLBACK") {
            debug!(error = %e, "rollback failed");
        }
    }
}

impl<C: EngineConnection> Drop for TransactionGuard<'_, C> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.engine.exec_raw("ROLLBACK");
        }
    }
}

impl<C: EngineConnection> Connection<C> {
    /// Begin a transaction; `true` on success.
    pub fn begin_transaction(&self) -> bool {
        self.execute_raw("BEGIN").is_ok()
    }

    /// Commit the open transaction; `true` on success.
    pub fn commit_transaction(&self) -> bool {
        self.execute_raw("COMMIT").is_ok()
    }

    /// Roll back the open transaction; `true` on success.
    pub fn rollback_transaction(&self) -> bool {
        self.execute_raw("ROLLBACK").is_ok()
    }
}
