//! rusqlite-backed implementation of the engine capability traits.

use std::collections::VecDeque;
use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{Connection as RusqliteConnection, ErrorCode, Statement};

use super::{EngineConnection, EngineStatement, Step};
use crate::error::SqliteTypedError;

/// A live SQLite database handle.
pub struct SqliteEngine {
    conn: RusqliteConnection,
}

impl SqliteEngine {
    /// Open (creating if needed) the database file at `path`.
    ///
    /// # Errors
    /// Returns [`SqliteTypedError::ConnectionError`] with the engine's
    /// message if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SqliteTypedError> {
        RusqliteConnection::open(path)
            .map(|conn| Self { conn })
            .map_err(|e| SqliteTypedError::ConnectionError(e.to_string()))
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    /// Returns [`SqliteTypedError::ConnectionError`] if SQLite refuses the
    /// open, which in practice only happens under resource exhaustion.
    pub fn open_in_memory() -> Result<Self, SqliteTypedError> {
        RusqliteConnection::open_in_memory()
            .map(|conn| Self { conn })
            .map_err(|e| SqliteTypedError::ConnectionError(e.to_string()))
    }

    /// Wrap an already-open rusqlite connection.
    #[must_use]
    pub fn from_rusqlite(conn: RusqliteConnection) -> Self {
        Self { conn }
    }
}

impl EngineConnection for SqliteEngine {
    type Statement<'conn>
        = SqliteStatement<'conn>
    where
        Self: 'conn;

    fn prepare(&self, sql: &str) -> Result<Self::Statement<'_>, SqliteTypedError> {
        self.conn
            .prepare(sql)
            .map(SqliteStatement::new)
            .map_err(|e| SqliteTypedError::PrepareError(e.to_string()))
    }

    fn exec_raw(&self, sql: &str) -> Result<(), SqliteTypedError> {
        self.conn
            .execute_batch(sql)
            .map_err(|e| SqliteTypedError::ExecutionError(e.to_string()))
    }

    fn total_changes(&self) -> u64 {
        // rusqlite has no safe binding for sqlite3_total_changes; the SQL
        // function reads the same counter.
        self.conn
            .query_row("SELECT total_changes()", [], |row| row.get::<_, i64>(0))
            .map(|n| u64::try_from(n).unwrap_or(0))
            .unwrap_or(0)
    }
}

/// Statement handle exposing step-at-a-time semantics over rusqlite.
///
/// rusqlite's safe API only steps through a `Rows` cursor that borrows the
/// statement, so each execution buffers its result rows up front and then
/// hands them out one `step` at a time. The layer above materialises every
/// row anyway, so the observable behaviour is unchanged.
pub struct SqliteStatement<'conn> {
    stmt: Statement<'conn>,
    column_count: usize,
    executed: bool,
    pending: VecDeque<Vec<Value>>,
    current: Option<Vec<Value>>,
}

impl<'conn> SqliteStatement<'conn> {
    fn new(stmt: Statement<'conn>) -> Self {
        let column_count = stmt.column_count();
        Self {
            stmt,
            column_count,
            executed: false,
            pending: VecDeque::new(),
            current: None,
        }
    }

    fn execute_and_buffer(&mut self) -> Result<Step, SqliteTypedError> {
        let mut fetched = VecDeque::new();
        let mut rows = self.stmt.raw_query();
        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    let mut values = Vec::with_capacity(self.column_count);
                    for col in 0..self.column_count {
                        let value_ref = row
                            .get_ref(col)
                            .map_err(|e| SqliteTypedError::ExecutionError(e.to_string()))?;
                        values.push(Value::from(value_ref));
                    }
                    fetched.push_back(values);
                }
                Ok(None) => break,
                // Leave `executed` unset so the next step re-runs the
                // statement; bindings survive the implicit reset.
                Err(e) if is_busy(&e) => return Ok(Step::Busy),
                Err(e) => return Err(SqliteTypedError::ExecutionError(e.to_string())),
            }
        }
        drop(rows);
        self.executed = true;
        self.pending = fetched;
        Ok(Step::Done)
    }

    fn bind_err(e: &rusqlite::Error) -> SqliteTypedError {
        SqliteTypedError::ExecutionError(e.to_string())
    }
}

fn is_busy(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::DatabaseBusy)
}

impl EngineStatement for SqliteStatement<'_> {
    fn bind_int(&mut self, ordinal: usize, value: i32) -> Result<(), SqliteTypedError> {
        self.stmt
            .raw_bind_parameter(ordinal, value)
            .map_err(|e| Self::bind_err(&e))
    }

    fn bind_int64(&mut self, ordinal: usize, value: i64) -> Result<(), SqliteTypedError> {
        self.stmt
            .raw_bind_parameter(ordinal, value)
            .map_err(|e| Self::bind_err(&e))
    }

    fn bind_double(&mut self, ordinal: usize, value: f64) -> Result<(), SqliteTypedError> {
        self.stmt
            .raw_bind_parameter(ordinal, value)
            .map_err(|e| Self::bind_err(&e))
    }

    fn bind_text(&mut self, ordinal: usize, value: &str) -> Result<(), SqliteTypedError> {
        // rusqlite binds the slice by its exact byte length.
        self.stmt
            .raw_bind_parameter(ordinal, value)
            .map_err(|e| Self::bind_err(&e))
    }

    fn bind_blob(&mut self, ordinal: usize, value: &[u8]) -> Result<(), SqliteTypedError> {
        self.stmt
            .raw_bind_parameter(ordinal, value)
            .map_err(|e| Self::bind_err(&e))
    }

    fn step(&mut self) -> Result<Step, SqliteTypedError> {
        if !self.executed
            && let Step::Busy = self.execute_and_buffer()?
        {
            return Ok(Step::Busy);
        }
        Ok(match self.pending.pop_front() {
            Some(values) => {
                self.current = Some(values);
                Step::Row
            }
            None => {
                self.current = None;
                Step::Done
            }
        })
    }

    fn reset(&mut self) -> bool {
        // The native handle was already reset when the row cursor dropped;
        // only the buffered cursor state needs clearing.
        self.executed = false;
        self.pending.clear();
        self.current = None;
        true
    }

    fn column_int(&self, col: usize) -> i32 {
        self.column_int64(col) as i32
    }

    fn column_int64(&self, col: usize) -> i64 {
        match self.current.as_ref().and_then(|row| row.get(col)) {
            Some(Value::Integer(i)) => *i,
            Some(Value::Real(f)) => *f as i64,
            Some(Value::Text(s)) => integer_prefix(s),
            Some(Value::Blob(b)) => integer_prefix(&String::from_utf8_lossy(b)),
            Some(Value::Null) | None => 0,
        }
    }

    fn column_double(&self, col: usize) -> f64 {
        match self.current.as_ref().and_then(|row| row.get(col)) {
            Some(Value::Integer(i)) => *i as f64,
            Some(Value::Real(f)) => *f,
            Some(Value::Text(s)) => real_prefix(s),
            Some(Value::Blob(b)) => real_prefix(&String::from_utf8_lossy(b)),
            Some(Value::Null) | None => 0.0,
        }
    }

    fn column_text(&self, col: usize) -> String {
        match self.current.as_ref().and_then(|row| row.get(col)) {
            Some(Value::Integer(i)) => i.to_string(),
            Some(Value::Real(f)) => f.to_string(),
            Some(Value::Text(s)) => s.clone(),
            Some(Value::Blob(b)) => String::from_utf8_lossy(b).into_owned(),
            Some(Value::Null) | None => String::new(),
        }
    }

    fn column_blob(&self, col: usize) -> Vec<u8> {
        match self.current.as_ref().and_then(|row| row.get(col)) {
            Some(Value::Integer(i)) => i.to_string().into_bytes(),
            Some(Value::Real(f)) => f.to_string().into_bytes(),
            Some(Value::Text(s)) => s.clone().into_bytes(),
            Some(Value::Blob(b)) => b.clone(),
            Some(Value::Null) | None => Vec::new(),
        }
    }
}

/// Longest leading integer, SQLite text-to-integer style: optional sign,
/// then decimal digits, stopping at the first non-digit. Saturates on
/// overflow.
fn integer_prefix(s: &str) -> i64 {
    let t = s.trim_start();
    let (negative, rest) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t.strip_prefix('+').unwrap_or(t)),
    };
    let mut n: i64 = 0;
    for digit in rest.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(digit - b'0');
        n = if negative {
            n.saturating_mul(10).saturating_sub(digit)
        } else {
            n.saturating_mul(10).saturating_add(digit)
        };
    }
    n
}

/// Longest leading floating-point number, SQLite text-to-real style.
fn real_prefix(s: &str) -> f64 {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(&b'+' | &b'-')) {
        end += 1;
    }
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if bytes.get(end) == Some(&b'.') {
        end += 1;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
    }
    if matches!(bytes.get(end), Some(&b'e' | &b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(&b'+' | &b'-')) {
            exp += 1;
        }
        if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
            while bytes.get(exp).is_some_and(u8::is_ascii_digit) {
                exp += 1;
            }
            end = exp;
        }
    }
    t[..end].parse().unwrap_or(0.0)
}
