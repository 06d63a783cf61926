//! Typed parameter binding and row materialization for SQLite.
//!
//! Callers declare the tuple shape of a query's result rows (or of the
//! rows they are about to write) at compile time; this crate handles the
//! type-correct marshalling both directions, plus batch writes with
//! optional transaction wrapping and first-failing-row reporting.
//!
//! ```no_run
//! use sqlite_typed::{Connection, SqliteTypedError};
//!
//! fn main() -> Result<(), SqliteTypedError> {
//!     let conn = Connection::open("app.db")?;
//!     conn.execute_raw("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, score REAL)")?;
//!
//!     let rows = vec![
//!         (1_i64, "ada".to_string(), 9.5_f64),
//!         (2_i64, "grace".to_string(), 9.9_f64),
//!     ];
//!     let changed =
//!         conn.execute_batch("INSERT INTO users VALUES (?1, ?2, ?3)", &rows, true)?;
//!     assert_eq!(changed, 2);
//!
//!     let names: Vec<(String, f64)> =
//!         conn.query_many("SELECT name, score FROM users WHERE id > ?1", &["0"])?;
//!     let count: i64 = conn.query_one("SELECT count(*) FROM users", &[])?;
//!     assert_eq!(names.len() as i64, count);
//!     Ok(())
//! }
//! ```
//!
//! The database engine is consumed through the narrow capability traits in
//! [`engine`], so every execution path can be driven by a scripted stub in
//! tests.

pub mod batch;
pub mod codec;
pub mod connection;
pub mod engine;
pub mod error;
pub mod executor;
pub mod prelude;
pub mod statement;
pub mod transaction;

pub use codec::{SqlRow, SqlScalar};
pub use connection::Connection;
pub use engine::{EngineConnection, EngineStatement, SqliteEngine, Step};
pub use error::SqliteTypedError;
pub use statement::PreparedStatement;
