//! Error types for the smooth table.
//!
//! Only construction can fail from the caller's point of view. The
//! windowing fault is never returned from an event callback: it is logged,
//! stored on the table, and the pass stops early so the host stays
//! responsive. Hosts read it back with
//! [`SmoothTable::take_fault`](crate::table::SmoothTable::take_fault).

use thiserror::Error;

/// Failures of the smooth table core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The table was constructed with zero rows or zero columns.
    ///
    /// This is a caller bug: a grid needs at least one cell to recycle.
    #[error("Table needs at least one row and one column (got {rows} rows, {columns} columns)")]
    EmptyGrid {
        /// Requested visible row count.
        rows: usize,
        /// Requested column count.
        columns: usize,
    },

    /// The gap-fill pass needed a spare row but the pool had none left.
    ///
    /// The pool holds `visible rows + 2` rows. Running dry means the
    /// viewport needs more rows than that, which happens when the cell height
    /// rounds down so far that more rows fit the page than were provisioned.
    #[error(
        "Spare rows exhausted at y={y}: pool of {capacity} rows cannot cover {window_rows} window rows"
    )]
    SpareRowsExhausted {
        /// Canvas position that could not be covered.
        y: u64,
        /// Number of rows in the pool.
        capacity: usize,
        /// Number of rows the window needed.
        window_rows: usize,
    },
}
