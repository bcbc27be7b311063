//! Text label used as the demo's pooled cell

use crate::table::{Cell, CellIndex, CellRect};

/// A cell showing one item's index.
///
/// Indices at or past the item count (the tail of the last row) show
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelCell {
    text: String,
    rect: Option<CellRect>,
    mapped: bool,
}

impl LabelCell {
    /// Label for `index` out of `count` items.
    pub fn set_label(&mut self, index: CellIndex, count: usize) {
        self.text.clear();
        if index.get() < count {
            self.text.push_str(&index.to_string());
        }
    }

    /// Current label.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Canvas rectangle, `None` while parked.
    pub fn rect(&self) -> Option<CellRect> {
        self.rect
    }

    /// Whether the cell was mapped.
    pub fn is_mapped(&self) -> bool {
        self.mapped
    }
}

impl Cell for LabelCell {
    fn place(&mut self, rect: CellRect) {
        self.rect = Some(rect);
    }

    fn release(&mut self) {
        self.rect = None;
    }

    fn map(&mut self) {
        self.mapped = true;
    }
}
