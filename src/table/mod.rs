//! Smooth table - a virtualized grid over a fixed pool of cells
//!
//! The table shows `count` items in `columns` columns, `rows` rows at a
//! time, using only `(rows + 2) * columns` cells. Scrolling recycles the
//! rows that left the viewport into the rows that entered it and asks the
//! host to fill them through fill-in handlers.
//!
//! # Module Structure
//!
//! - `types`: Geometry and index newtypes (Allocation, CellRect, CellIndex, VirtualRow)
//! - `cell`: Cell - capability interface for pooled widgets
//! - `pool`: CellPool - the fixed grid of reusable cells
//! - `adjustment`: Adjustment - shared scrollable range and its synchronizer
//! - `windowing`: the row recycling pass
//! - `canvas`: Canvas - virtual surface moved under the viewport
//! - `fill`: fill-in handler registry
//! - `reflow`: ReflowGuard - resize echo suppression
//! - `error`: TableError
//!
//! # Driving the table
//!
//! ```
//! use smoothtable::table::{Allocation, Cell, CellRect, SmoothTable};
//!
//! #[derive(Default)]
//! struct Label {
//!     text: String,
//!     rect: Option<CellRect>,
//! }
//!
//! impl Cell for Label {
//!     fn place(&mut self, rect: CellRect) {
//!         self.rect = Some(rect);
//!     }
//!     fn release(&mut self) {
//!         self.rect = None;
//!     }
//! }
//!
//! let mut table = SmoothTable::new(3, 3, Label::default).unwrap();
//! table.connect_fill_in(|cell: &mut Label, index| cell.text = index.to_string());
//! table.set_count(100);
//! table.realize();
//! table.size_allocate(Allocation::sized(90, 30));
//!
//! table.scroll_to(20);
//! let rows: Vec<usize> = table.placed_rows().iter().map(|r| r.get()).collect();
//! assert_eq!(rows, vec![2, 3, 4]);
//! ```

pub mod adjustment;
pub mod canvas;
pub mod cell;
pub mod error;
mod fill;
pub mod pool;
pub mod reflow;
pub mod types;
pub mod windowing;

pub use adjustment::{Adjustment, AdjustmentSignal, AdjustmentValues};
pub use canvas::Canvas;
pub use cell::Cell;
pub use error::TableError;
pub use fill::HandlerId;
pub use pool::{CellPool, Placement, PoolRow};
pub use reflow::ReflowGuard;
pub use types::{Allocation, CellIndex, CellRect, VirtualRow};
pub use windowing::{PassStats, Viewport};

use fill::FillHandlers;
use tracing::{debug, trace};

/// Virtualized grid recycling a fixed pool of cells.
///
/// All methods are synchronous and must be called from the thread that owns
/// the table; fill-in handlers run inline.
#[derive(Debug)]
pub struct SmoothTable<C> {
    pool: CellPool<C>,
    handlers: FillHandlers<C>,
    adjustment: Adjustment,
    canvas: Option<Canvas>,
    allocation: Allocation,
    /// Allocation the last windowing pass ran with.
    last_allocation: Option<Allocation>,
    cell_height: u32,
    count: usize,
    virtual_rows: usize,
    guard: ReflowGuard,
    mapped: bool,
    fault: Option<TableError>,
    last_pass: Option<PassStats>,
}

impl<C: Cell> SmoothTable<C> {
    /// Create a table showing `rows` rows of `columns` cells.
    ///
    /// `factory` is called `(rows + 2) * columns` times. The table starts
    /// with an internal adjustment; hosts with their own scrollbar call
    /// [`SmoothTable::bind`].
    ///
    /// # Errors
    /// Returns [`TableError::EmptyGrid`] if `rows` or `columns` is zero.
    pub fn new(
        rows: usize,
        columns: usize,
        factory: impl FnMut() -> C,
    ) -> Result<Self, TableError> {
        let pool = CellPool::new(rows, columns, factory)?;
        debug!(rows, columns, cells = pool.cells().count(), "Created cell pool");

        Ok(Self {
            pool,
            handlers: FillHandlers::new(),
            adjustment: Adjustment::new(),
            canvas: None,
            allocation: Allocation::default(),
            last_allocation: None,
            cell_height: 0,
            count: 0,
            virtual_rows: 0,
            guard: ReflowGuard::default(),
            mapped: false,
            fault: None,
            last_pass: None,
        })
    }

    // ===== Read-only properties =====

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.pool.columns()
    }

    /// Number of rows that fit the viewport.
    pub fn rows(&self) -> usize {
        self.pool.visible_rows()
    }

    /// Scroll offset rounded down to a row boundary.
    pub fn head(&self) -> u64 {
        self.viewport().head_y()
    }

    /// Uniform row height, derived from the allocation.
    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    /// Number of items.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Rows needed for all items: `ceil(count / columns)`.
    pub fn virtual_rows(&self) -> usize {
        self.virtual_rows
    }

    /// Current allocation.
    pub fn allocation(&self) -> Allocation {
        self.allocation
    }

    /// The bound scrollable range.
    pub fn adjustment(&self) -> &Adjustment {
        &self.adjustment
    }

    /// Backing canvas, present while realized.
    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    /// Whether [`SmoothTable::realize`] ran (and no unrealize since).
    pub fn is_realized(&self) -> bool {
        self.canvas.is_some()
    }

    /// Whether [`SmoothTable::map`] ran while realized.
    pub fn is_mapped(&self) -> bool {
        self.mapped
    }

    /// The cell pool.
    pub fn pool(&self) -> &CellPool<C> {
        &self.pool
    }

    /// Every cell, row by row in pool order.
    pub fn cells(&self) -> impl Iterator<Item = &C> {
        self.pool.cells()
    }

    /// Every cell, row by row in pool order, mutably.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut C> {
        self.pool.cells_mut()
    }

    /// Virtual rows currently placed, ascending.
    pub fn placed_rows(&self) -> Vec<VirtualRow> {
        self.pool.placed_rows()
    }

    /// Size the table asks for: nothing, it takes whatever it is given.
    pub fn size_request(&self) -> (u32, u32) {
        (0, 0)
    }

    /// Statistics of the most recent windowing pass.
    pub fn last_pass(&self) -> Option<PassStats> {
        self.last_pass
    }

    /// Internal-consistency fault recorded by the last failing pass.
    pub fn fault(&self) -> Option<&TableError> {
        self.fault.as_ref()
    }

    /// Take the recorded fault, clearing it.
    pub fn take_fault(&mut self) -> Option<TableError> {
        self.fault.take()
    }

    /// Geometry the next windowing pass would use.
    pub fn viewport(&self) -> Viewport {
        let values = self.adjustment.values();
        Viewport {
            value: values.value,
            page_size: u64::from(self.allocation.height),
            cell_height: self.cell_height,
            width: self.allocation.width,
            virtual_rows: self.virtual_rows,
        }
    }

    // ===== Events =====

    /// Register a fill-in handler.
    ///
    /// Handlers run once per cell whenever its row is recycled, in ascending
    /// item order, and must set the cell's content for the given index before
    /// returning. The last row may carry indices at or past `count`.
    pub fn connect_fill_in(
        &mut self,
        handler: impl FnMut(&mut C, CellIndex) + 'static,
    ) -> HandlerId {
        self.handlers.connect(handler)
    }

    /// Remove a fill-in handler. Returns `false` if it was not connected.
    pub fn disconnect_fill_in(&mut self, id: HandlerId) -> bool {
        self.handlers.disconnect(id)
    }

    // ===== Host operations =====

    /// Set the number of items.
    ///
    /// Recomputes the virtual row count, resizes the canvas, resynchronizes
    /// the range and re-tiles every visible row, since the items behind them
    /// may have changed.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        self.virtual_rows = pool::virtual_rows_for(count, self.columns());
        debug!(count, virtual_rows = self.virtual_rows, "Item count set");

        self.last_allocation = None;
        self.resize_canvas();
        self.sync_range(true);
    }

    /// Attach to a host-owned scrollable range.
    ///
    /// `None`, or the adjustment already bound, is a no-op. The range is
    /// re-derived from the table geometry right away, and a windowing pass
    /// runs when the bound value differs from the current one or had to be
    /// clamped.
    pub fn bind(&mut self, adjustment: Option<Adjustment>) {
        let Some(adjustment) = adjustment else {
            return;
        };
        if adjustment.ptr_eq(&self.adjustment) {
            return;
        }
        let moved = adjustment.value() != self.adjustment.value();
        debug!(moved, "Binding new adjustment");
        self.adjustment = adjustment;
        self.sync_range(moved);
    }

    /// Scroll to `value` (clamped) and run a windowing pass if it moved.
    ///
    /// Returns the value actually applied.
    pub fn scroll_to(&mut self, value: u64) -> u64 {
        let before = self.adjustment.value();
        let applied = self.adjustment.set_value(value);
        if applied != before {
            self.on_position_changed();
        }
        applied
    }

    /// Windowing pass: recycle rows that left the viewport into the rows
    /// that entered it.
    ///
    /// Call after changing the bound adjustment's value directly. A no-op
    /// while unrealized. A new allocation since the previous pass re-tiles
    /// every row. Never fails; an undersized pool is logged and recorded
    /// (see [`SmoothTable::fault`]).
    pub fn on_position_changed(&mut self) {
        if self.canvas.is_none() {
            trace!("Position changed while unrealized");
            return;
        }
        let viewport = self.viewport();

        if viewport.cell_height == 0 {
            // Nothing fits; retile once rows have a height again
            self.last_allocation = None;
            self.pool.park_all();
            trace!("Zero cell height, parked every row");
        } else {
            let full_retile = self.last_allocation != Some(self.allocation);
            self.last_allocation = Some(self.allocation);

            match windowing::reflow(&mut self.pool, &viewport, full_retile, &mut self.handlers) {
                Ok(stats) => {
                    if stats.filled > 0 {
                        self.guard.arm(self.allocation);
                    }
                    trace!(?stats, value = viewport.value, "Windowing pass");
                    self.last_pass = Some(stats);
                }
                Err(fault) => {
                    self.guard.arm(self.allocation);
                    self.fault = Some(fault);
                    self.last_pass = None;
                }
            }
        }

        if let Some(canvas) = self.canvas.as_mut() {
            canvas.move_to(viewport.value);
            canvas.process_updates();
        }
    }

    // ===== Lifecycle =====

    /// Create the backing canvas and lay out the current allocation.
    pub fn realize(&mut self) {
        if self.canvas.is_some() {
            return;
        }
        let values = self.adjustment.values();
        self.canvas = Some(Canvas::new(
            self.allocation.width,
            values.upper,
            values.value,
        ));
        debug!(allocation = ?self.allocation, "Realized");

        self.last_allocation = None;
        self.resize_canvas();
        self.sync_range(true);
    }

    /// Accept a new allocation.
    ///
    /// The row height becomes `allocation.height / rows`. An allocation that
    /// echoes the one a gap-fill pass just ran with is ignored once.
    pub fn size_allocate(&mut self, allocation: Allocation) {
        if self.guard.swallow_echo(allocation) {
            trace!(?allocation, "Ignoring allocation echoed by reflow");
            return;
        }

        self.allocation = allocation;
        self.cell_height = allocation.height / self.rows() as u32;
        debug!(?allocation, cell_height = self.cell_height, "Size allocated");

        self.resize_canvas();
        self.sync_range(true);
    }

    /// Map every cell to the screen. A no-op while unrealized.
    pub fn map(&mut self) {
        if self.canvas.is_none() {
            return;
        }
        self.mapped = true;
        for cell in self.pool.cells_mut() {
            cell.map();
        }
    }

    /// Drop the canvas and park every row.
    pub fn unrealize(&mut self) {
        if self.canvas.take().is_none() {
            return;
        }
        self.mapped = false;
        self.last_allocation = None;
        self.guard = ReflowGuard::Idle;
        self.pool.park_all();
        debug!("Unrealized");
    }

    fn resize_canvas(&mut self) {
        let height = self.virtual_rows as u64 * u64::from(self.cell_height);
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.resize(self.allocation.width, height);
        }
    }

    /// Resynchronize the adjustment and run a pass if it asked for one.
    fn sync_range(&mut self, force: bool) {
        let sync = adjustment::sync_range(
            &self.adjustment,
            self.virtual_rows,
            self.cell_height,
            u64::from(self.allocation.height),
            force,
        );
        if sync.value_changed() {
            self.on_position_changed();
        }
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
