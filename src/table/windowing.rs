//! Row windowing engine
//!
//! On every scroll position change the pool rows are split into rows that
//! still show part of the viewport and spare rows. Spare rows are recycled
//! into the gaps of the window, top to bottom, so a scroll costs work
//! proportional to the rows entering the viewport, not to the dataset or
//! even the viewport.
//!
//! # Window
//! A virtual row `r` belongs to the window when it overlaps the page and
//! the content:
//!
//! ```text
//! r * cell_height < min(value + page_size, virtual_rows * cell_height)
//! (r + 1) * cell_height > value
//! ```
//!
//! Rows merely touching the page edge are not part of it.

use super::cell::Cell;
use super::error::TableError;
use super::fill::FillHandlers;
use super::pool::{CellPool, Placement, PoolRow};
use super::types::{CellIndex, CellRect, VirtualRow};
use std::collections::VecDeque;
use std::iter;
use std::ops::Range;
use tracing::{error, trace};

/// Geometry a windowing pass works from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Scroll offset.
    pub value: u64,
    /// Visible extent.
    pub page_size: u64,
    /// Uniform row height.
    pub cell_height: u32,
    /// Width shared out between the columns.
    pub width: u32,
    /// Rows of the dataset.
    pub virtual_rows: usize,
}

impl Viewport {
    /// Bottom edge of the page.
    pub fn page_end(&self) -> u64 {
        self.value + self.page_size
    }

    /// Bottom edge of the content.
    pub fn content_end(&self) -> u64 {
        VirtualRow::new(self.virtual_rows).top(self.cell_height)
    }

    /// Scroll offset rounded down to a row boundary.
    pub fn head_y(&self) -> u64 {
        match self.cell_height {
            0 => 0,
            height => self.value - self.value % u64::from(height),
        }
    }

    fn fill_end(&self) -> u64 {
        self.page_end().min(self.content_end())
    }

    /// Virtual rows that must be placed once the pass settles.
    pub fn window(&self) -> Range<usize> {
        if self.cell_height == 0 {
            return 0..0;
        }
        let height = u64::from(self.cell_height);
        let first = (self.value / height) as usize;
        let end = self.fill_end().div_ceil(height) as usize;
        first..end.max(first)
    }

    /// Whether a row with its top edge at `y` belongs to the window.
    pub fn shows(&self, y: u64) -> bool {
        y < self.fill_end() && y + u64::from(self.cell_height) > self.value
    }
}

/// What a windowing pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassStats {
    /// Every row was treated as spare.
    pub full_retile: bool,
    /// Rows left where they were.
    pub kept: usize,
    /// Rows recycled into the window.
    pub filled: usize,
    /// Rows taken off the canvas.
    pub parked: usize,
}

/// Run one windowing pass over `pool`.
///
/// With `full_retile` every row is recycled, which is what a new allocation
/// needs since row geometry changed. Leftover spare rows are parked.
///
/// # Errors
/// Returns [`TableError::SpareRowsExhausted`] (already logged) when the
/// window needs more rows than the pool has. Rows recycled before that
/// point stay placed.
pub(crate) fn reflow<C: Cell>(
    pool: &mut CellPool<C>,
    viewport: &Viewport,
    full_retile: bool,
    handlers: &mut FillHandlers<C>,
) -> Result<PassStats, TableError> {
    let (visible, mut spare) = partition(pool.rows(), viewport, full_retile);
    let mut stats = PassStats {
        full_retile,
        kept: visible.len(),
        ..PassStats::default()
    };

    if visible.len() < viewport.window().len() {
        stats.filled = fill_gaps(pool, viewport, &visible, &mut spare, handlers)?;
    }

    for index in spare {
        if pool.rows_mut()[index].park() {
            stats.parked += 1;
        }
    }

    Ok(stats)
}

/// Split rows into visible `(y, pool index)` pairs sorted by `y`, and spare
/// pool indices in pool order.
fn partition<C: Cell>(
    rows: &[PoolRow<C>],
    viewport: &Viewport,
    full_retile: bool,
) -> (Vec<(u64, usize)>, VecDeque<usize>) {
    let mut visible: Vec<(u64, usize)> = Vec::with_capacity(rows.len());
    let mut spare = VecDeque::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        match row.y() {
            Some(y) if !full_retile && viewport.shows(y) => {
                // After equal keys, so ties keep pool order
                let at = visible.partition_point(|&(other, _)| other <= y);
                visible.insert(at, (y, index));
            }
            _ => spare.push_back(index),
        }
    }

    (visible, spare)
}

/// Recycle spare rows into every gap of the window, top to bottom.
///
/// Spare rows are taken front first. Returns the number of rows recycled.
fn fill_gaps<C: Cell>(
    pool: &mut CellPool<C>,
    viewport: &Viewport,
    visible: &[(u64, usize)],
    spare: &mut VecDeque<usize>,
    handlers: &mut FillHandlers<C>,
) -> Result<usize, TableError> {
    let height = u64::from(viewport.cell_height);
    let columns = pool.columns();
    let mut filled = 0;
    let mut cursor = viewport.head_y();

    let stops = visible
        .iter()
        .map(|&(y, _)| Some(y))
        .chain(iter::once(None));

    for stop in stops {
        let gap_end = stop.unwrap_or_else(|| viewport.fill_end());
        while cursor < gap_end {
            let Some(index) = spare.pop_front() else {
                let fault = TableError::SpareRowsExhausted {
                    y: cursor,
                    capacity: pool.capacity(),
                    window_rows: viewport.window().len(),
                };
                error!(%fault, filled, "Spare rows should not be empty");
                return Err(fault);
            };
            allocate_row(&mut pool.rows_mut()[index], cursor, viewport, columns, handlers);
            filled += 1;
            cursor += height;
        }
        if let Some(y) = stop {
            cursor = y + height;
        }
    }

    Ok(filled)
}

/// Point `row` at the virtual row starting at `y`: fill every cell, then
/// place it.
fn allocate_row<C: Cell>(
    row: &mut PoolRow<C>,
    y: u64,
    viewport: &Viewport,
    columns: usize,
    handlers: &mut FillHandlers<C>,
) {
    let virtual_row = VirtualRow::at_y(y, viewport.cell_height);
    let first = virtual_row.first_cell(columns).get();
    let cell_width = viewport.width / columns as u32;
    trace!(row = virtual_row.get(), y, "Recycling pool row");

    for (column, cell) in row.cells_mut().iter_mut().enumerate() {
        handlers.emit(cell, CellIndex::new(first + column));
        cell.place(CellRect {
            x: column as u32 * cell_width,
            y,
            width: cell_width,
            height: viewport.cell_height,
        });
    }

    row.set_placement(Placement {
        y,
        row: virtual_row,
    });
}

#[cfg(test)]
#[path = "windowing_tests.rs"]
mod tests;
