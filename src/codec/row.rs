//! Whole-row composition of the scalar codec over heterogeneous tuples.

use super::scalar::SqlScalar;
use crate::engine::EngineStatement;
use crate::error::SqliteTypedError;

/// A fixed, ordered, heterogeneous row shape.
///
/// Implemented for tuples of arity 1 through 16 whose elements are
/// [`SqlScalar`]. The same shape drives both directions of one call:
/// extraction reads result columns 0..N-1 strictly left to right (tuple
/// expressions evaluate in that order, so the contract is enforced by the
/// language), and binding writes parameters at ordinals 1..N (field index
/// plus one, because parameter ordinals are 1-based while fields and
/// result columns are 0-based).
pub trait SqlRow: Sized {
    /// Number of fields in the shape.
    const ARITY: usize;

    /// Read one result row, columns 0..N-1, left to right.
    fn extract_row<S: EngineStatement>(stmt: &S) -> Self;

    /// Bind every field, parameter ordinals 1..N.
    ///
    /// # Errors
    /// Propagates the first failing bind.
    fn bind_row<S: EngineStatement>(&self, stmt: &mut S) -> Result<(), SqliteTypedError>;
}

macro_rules! impl_sql_row {
    ($($field:ident : $idx:tt),+) => {
        impl<$($field: SqlScalar),+> SqlRow for ($($field,)+) {
            const ARITY: usize = 0 $(+ impl_sql_row!(@one $field))+;

            fn extract_row<S: EngineStatement>(stmt: &S) -> Self {
                ($($field::read_column(stmt, $idx),)+)
            }

            fn bind_row<S: EngineStatement>(
                &self,
                stmt: &mut S,
            ) -> Result<(), SqliteTypedError> {
                $(self.$idx.bind_parameter(stmt, $idx + 1)?;)+
                Ok(())
            }
        }
    };
    (@one $field:ident) => { 1 };
}

impl_sql_row!(A: 0);
impl_sql_row!(A: 0, B: 1);
impl_sql_row!(A: 0, B: 1, C: 2);
impl_sql_row!(A: 0, B: 1, C: 2, D: 3);
impl_sql_row!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_sql_row!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_sql_row!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_sql_row!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);
impl_sql_row!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8);
impl_sql_row!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9);
impl_sql_row!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10);
impl_sql_row!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10, L: 11);
impl_sql_row!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10, L: 11, M: 12);
impl_sql_row!(
    A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10, L: 11, M: 12, N: 13
);
impl_sql_row!(
    A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10, L: 11, M: 12, N: 13,
    O: 14
);
impl_sql_row!(
    A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10, L: 11, M: 12, N: 13,
    O: 14, P: 15
);
