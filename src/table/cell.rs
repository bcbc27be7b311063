//! Capability interface for pooled cells

use super::types::CellRect;

/// A reusable widget occupying one grid slot.
///
/// The table never creates or destroys cells after construction. It only
/// moves them around the canvas; content is assigned by fill-in handlers
/// registered with
/// [`SmoothTable::connect_fill_in`](crate::table::SmoothTable::connect_fill_in),
/// which run right before [`Cell::place`].
pub trait Cell {
    /// Move the cell to `rect` on the backing canvas.
    fn place(&mut self, rect: CellRect);

    /// Take the cell off the canvas.
    ///
    /// Called once right after the factory creates the cell, and whenever its
    /// row is parked.
    fn release(&mut self);

    /// The table was mapped to the screen.
    fn map(&mut self) {}
}
