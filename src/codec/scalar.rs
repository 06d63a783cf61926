//! Per-type marshalling contract for a single column value.

use crate::engine::EngineStatement;
use crate::error::SqliteTypedError;

mod private {
    pub trait Sealed {}

    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f64 {}
    impl Sealed for String {}
    impl Sealed for Vec<u8> {}
}

/// Bidirectional conversion between one native value and one SQLite column.
///
/// The set of implementors is closed: 32-bit integer, 64-bit integer,
/// double, text, and blob. The trait is sealed, so asking for any other
/// kind is a compile-time failure rather than a runtime one. The codec
/// itself never converts between kinds; when a stored value's class
/// differs from the requested one, the engine's own column conversions
/// apply (see [`EngineStatement`]).
///
/// Reads of absent (NULL) text or blob columns yield an empty string or
/// empty vec rather than an error; this lossy simplification of SQL NULL
/// is part of the contract.
pub trait SqlScalar: private::Sealed + Sized {
    /// Read this value from the 0-based result column `col`.
    fn read_column<S: EngineStatement>(stmt: &S, col: usize) -> Self;

    /// Bind this value at the 1-based parameter `ordinal`.
    ///
    /// # Errors
    /// Propagates the engine's bind failure, typically an out-of-range
    /// ordinal.
    fn bind_parameter<S: EngineStatement>(
        &self,
        stmt: &mut S,
        ordinal: usize,
    ) -> Result<(), SqliteTypedError>;
}

impl SqlScalar for i32 {
    fn read_column<S: EngineStatement>(stmt: &S, col: usize) -> Self {
        stmt.column_int(col)
    }

    fn bind_parameter<S: EngineStatement>(
        &self,
        stmt: &mut S,
        ordinal: usize,
    ) -> Result<(), SqliteTypedError> {
        stmt.bind_int(ordinal, *self)
    }
}

impl SqlScalar for i64 {
    fn read_column<S: EngineStatement>(stmt: &S, col: usize) -> Self {
        stmt.column_int64(col)
    }

    fn bind_parameter<S: EngineStatement>(
        &self,
        stmt: &mut S,
        ordinal: usize,
    ) -> Result<(), SqliteTypedError> {
        stmt.bind_int64(ordinal, *self)
    }
}

impl SqlScalar for f64 {
    fn read_column<S: EngineStatement>(stmt: &S, col: usize) -> Self {
        stmt.column_double(col)
    }

    fn bind_parameter<S: EngineStatement>(
        &self,
        stmt: &mut S,
        ordinal: usize,
    ) -> Result<(), SqliteTypedError> {
        stmt.bind_double(ordinal, *self)
    }
}

impl SqlScalar for String {
    fn read_column<S: EngineStatement>(stmt: &S, col: usize) -> Self {
        stmt.column_text(col)
    }

    fn bind_parameter<S: EngineStatement>(
        &self,
        stmt: &mut S,
        ordinal: usize,
    ) -> Result<(), SqliteTypedError> {
        stmt.bind_text(ordinal, self.as_str())
    }
}

impl SqlScalar for Vec<u8> {
    fn read_column<S: EngineStatement>(stmt: &S, col: usize) -> Self {
        stmt.column_blob(col)
    }

    fn bind_parameter<S: EngineStatement>(
        &self,
        stmt: &mut S,
        ordinal: usize,
    ) -> Result<(), SqliteTypedError> {
        stmt.bind_blob(ordinal, self.as_slice())
    }
}
