//! Cell pool - the fixed grid of reusable cells
//!
//! The pool holds `visible_rows + 2` rows of `columns` cells each. The two
//! extra rows cover the partially visible rows at the top and bottom of the
//! viewport when the scroll offset is not aligned to a row boundary.

use super::cell::Cell;
use super::error::TableError;
use super::types::VirtualRow;

/// Where a pool row currently sits on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Top edge on the canvas.
    pub y: u64,
    /// Virtual row the cells are showing.
    pub row: VirtualRow,
}

/// One row of reusable cells.
#[derive(Debug)]
pub struct PoolRow<C> {
    cells: Vec<C>,
    placement: Option<Placement>,
}

impl<C: Cell> PoolRow<C> {
    /// Cells in column order.
    pub fn cells(&self) -> &[C] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [C] {
        &mut self.cells
    }

    /// Current placement, `None` while parked.
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Top edge on the canvas, `None` while parked.
    pub fn y(&self) -> Option<u64> {
        self.placement.map(|p| p.y)
    }

    /// Virtual row shown by this pool row, `None` while parked.
    pub fn virtual_row(&self) -> Option<VirtualRow> {
        self.placement.map(|p| p.row)
    }

    pub(crate) fn set_placement(&mut self, placement: Placement) {
        self.placement = Some(placement);
    }

    /// Release every cell and forget the placement.
    ///
    /// Returns `false` if the row was already parked; cells are not released
    /// twice.
    pub(crate) fn park(&mut self) -> bool {
        if self.placement.take().is_none() {
            return false;
        }
        for cell in &mut self.cells {
            cell.release();
        }
        true
    }
}

/// Fixed grid of `(visible_rows + 2) x columns` cells.
#[derive(Debug)]
pub struct CellPool<C> {
    rows: Vec<PoolRow<C>>,
    columns: usize,
}

impl<C: Cell> CellPool<C> {
    /// Build the pool, calling `factory` once per cell in row-major order.
    ///
    /// Every cell is released right after creation so it starts off-canvas.
    ///
    /// # Errors
    /// Returns [`TableError::EmptyGrid`] if `visible_rows` or `columns` is zero.
    pub fn new(
        visible_rows: usize,
        columns: usize,
        mut factory: impl FnMut() -> C,
    ) -> Result<Self, TableError> {
        if visible_rows == 0 || columns == 0 {
            return Err(TableError::EmptyGrid {
                rows: visible_rows,
                columns,
            });
        }

        let rows = (0..visible_rows + 2)
            .map(|_| PoolRow {
                cells: (0..columns)
                    .map(|_| {
                        let mut cell = factory();
                        cell.release();
                        cell
                    })
                    .collect(),
                placement: None,
            })
            .collect();

        Ok(Self { rows, columns })
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows that fit the viewport.
    pub fn visible_rows(&self) -> usize {
        self.rows.len() - 2
    }

    /// Total number of pool rows, buffer rows included.
    pub fn capacity(&self) -> usize {
        self.rows.len()
    }

    /// All pool rows in pool order (not canvas order).
    pub fn rows(&self) -> &[PoolRow<C>] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [PoolRow<C>] {
        &mut self.rows
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &C> {
        self.rows.iter().flat_map(|row| row.cells.iter())
    }

    /// Every cell, row by row, mutably.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut C> {
        self.rows.iter_mut().flat_map(|row| row.cells.iter_mut())
    }

    /// Virtual rows currently shown, in ascending order.
    pub fn placed_rows(&self) -> Vec<VirtualRow> {
        let mut placed: Vec<VirtualRow> =
            self.rows.iter().filter_map(PoolRow::virtual_row).collect();
        placed.sort_unstable();
        placed
    }

    /// Park every row.
    pub(crate) fn park_all(&mut self) {
        for row in &mut self.rows {
            row.park();
        }
    }
}

/// Virtual rows needed to show `count` items in `columns` columns.
pub fn virtual_rows_for(count: usize, columns: usize) -> usize {
    count.div_ceil(columns)
}
