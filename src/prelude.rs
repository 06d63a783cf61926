//! Convenient imports for common functionality.

pub use crate::codec::{SqlRow, SqlScalar};
pub use crate::connection::Connection;
pub use crate::engine::{EngineConnection, EngineStatement, SqliteEngine, Step};
pub use crate::error::SqliteTypedError;
pub use crate::statement::PreparedStatement;
