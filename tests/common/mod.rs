//! Shared fixtures for integration tests.

#![allow(dead_code)] // Not every test binary uses every helper

use smoothtable::table::{Allocation, Cell, CellIndex, CellRect, SmoothTable};
use std::cell::RefCell;
use std::rc::Rc;

/// Cell that remembers where it was placed and which item it shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeCell {
    pub rect: Option<CellRect>,
    pub index: Option<CellIndex>,
}

impl Cell for ProbeCell {
    fn place(&mut self, rect: CellRect) {
        self.rect = Some(rect);
    }

    fn release(&mut self) {
        self.rect = None;
    }
}

/// Item indices passed to the fill-in handler, in emission order.
pub type FillLog = Rc<RefCell<Vec<usize>>>;

/// Realized table of `rows x columns` over `count` items, allocated
/// `width x height`. The returned log starts empty.
pub fn table(
    rows: usize,
    columns: usize,
    count: usize,
    width: u32,
    height: u32,
) -> (SmoothTable<ProbeCell>, FillLog) {
    let mut table = SmoothTable::new(rows, columns, ProbeCell::default).expect("non-empty grid");
    let log: FillLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    table.connect_fill_in(move |cell: &mut ProbeCell, index| {
        cell.index = Some(index);
        sink.borrow_mut().push(index.get());
    });
    table.set_count(count);
    table.realize();
    table.size_allocate(Allocation::sized(width, height));
    log.borrow_mut().clear();
    (table, log)
}

/// Virtual rows currently placed, ascending.
pub fn placed(table: &SmoothTable<ProbeCell>) -> Vec<usize> {
    table.placed_rows().iter().map(|row| row.get()).collect()
}

/// Item indices shown by placed cells, ascending.
pub fn shown(table: &SmoothTable<ProbeCell>) -> Vec<usize> {
    let mut indices: Vec<usize> = table
        .cells()
        .filter(|cell| cell.rect.is_some())
        .filter_map(|cell| cell.index.map(|index| index.get()))
        .collect();
    indices.sort_unstable();
    indices
}

/// Take every logged fill-in index.
pub fn drain(log: &FillLog) -> Vec<usize> {
    log.borrow_mut().drain(..).collect()
}

/// Rows overlapping `[value, value + page)` among `virtual_rows` rows of
/// `cell_height`, computed independently of the table.
pub fn expected_window(value: u64, page: u64, cell_height: u64, virtual_rows: usize) -> Vec<usize> {
    (0..virtual_rows)
        .filter(|&r| {
            let top = r as u64 * cell_height;
            top < value + page && top + cell_height > value
        })
        .collect()
}
