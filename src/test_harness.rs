//! Shared fixtures for whitebox tests
//!
//! Provides a cell that records everything the table does to it, and a
//! builder for realized tables whose fill-in events are captured in order.

use crate::table::{Allocation, Cell, CellIndex, CellRect, SmoothTable};
use std::cell::RefCell;
use std::rc::Rc;

/// Cell that remembers its placement, content and lifecycle calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingCell {
    /// Creation order, stable for the cell's lifetime.
    pub id: usize,
    /// Current canvas rectangle, `None` while released.
    pub rect: Option<CellRect>,
    /// Content assigned by the last fill-in event.
    pub content: Option<CellIndex>,
    /// Number of `release` calls.
    pub releases: usize,
    /// Number of `place` calls.
    pub placements: usize,
    /// Whether `map` was called.
    pub mapped: bool,
}

impl RecordingCell {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            rect: None,
            content: None,
            releases: 0,
            placements: 0,
            mapped: false,
        }
    }
}

impl Cell for RecordingCell {
    fn place(&mut self, rect: CellRect) {
        self.rect = Some(rect);
        self.placements += 1;
    }

    fn release(&mut self) {
        self.rect = None;
        self.releases += 1;
    }

    fn map(&mut self) {
        self.mapped = true;
    }
}

/// Factory handing out cells with increasing ids.
pub fn recording_factory() -> impl FnMut() -> RecordingCell {
    let mut next = 0;
    move || {
        let cell = RecordingCell::new(next);
        next += 1;
        cell
    }
}

/// Fill-in events captured in emission order.
pub type FillLog = Rc<RefCell<Vec<CellIndex>>>;

/// Build a table, record its fill-in events, set `count`, realize it and
/// allocate `width x height`.
///
/// The log is cleared before returning so callers only see events caused by
/// their own actions.
pub fn realized_table(
    rows: usize,
    columns: usize,
    count: usize,
    width: u32,
    height: u32,
) -> (SmoothTable<RecordingCell>, FillLog) {
    let mut table =
        SmoothTable::new(rows, columns, recording_factory()).expect("non-empty grid");
    let log: FillLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    table.connect_fill_in(move |cell: &mut RecordingCell, index| {
        cell.content = Some(index);
        sink.borrow_mut().push(index);
    });
    table.set_count(count);
    table.realize();
    table.size_allocate(Allocation::sized(width, height));
    log.borrow_mut().clear();
    (table, log)
}

/// Drain the captured fill-in events as raw indices.
pub fn drain(log: &FillLog) -> Vec<usize> {
    log.borrow_mut().drain(..).map(|index| index.get()).collect()
}

/// Convert a ratatui buffer to a string, one line per row.
///
/// Trailing whitespace is trimmed on every line so snapshots stay stable.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}
