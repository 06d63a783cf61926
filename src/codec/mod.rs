//! Typed marshalling between native values and SQLite columns.
//!
//! - [`scalar`]: the per-type contract for one column or parameter.
//! - [`row`]: tuple composition of that contract into whole-row binding
//!   and extraction.

pub mod row;
pub mod scalar;

pub use row::SqlRow;
pub use scalar::SqlScalar;
