//! Backing canvas that holds the whole virtual content
//!
//! Cells are placed in canvas coordinates. Scrolling moves the canvas
//! under the viewport instead of moving every cell.

use super::types::CellRect;

/// Virtual surface sized to the full content height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u64,
    offset: u64,
    flushes: u64,
}

impl Canvas {
    /// Create a canvas scrolled to `offset`.
    pub fn new(width: u32, height: u64, offset: u64) -> Self {
        Self {
            width,
            height,
            offset,
            flushes: 0,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels (the full virtual content).
    pub fn height(&self) -> u64 {
        self.height
    }

    /// Scroll offset: the canvas sits at `-offset` inside the viewport.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of flushes requested so far.
    pub fn flush_count(&self) -> u64 {
        self.flushes
    }

    pub(crate) fn resize(&mut self, width: u32, height: u64) {
        self.width = width;
        self.height = height;
    }

    pub(crate) fn move_to(&mut self, offset: u64) {
        self.offset = offset;
    }

    pub(crate) fn process_updates(&mut self) {
        self.flushes += 1;
    }

    /// Top edge of `rect` relative to the viewport; negative when it starts
    /// above the viewport.
    pub fn viewport_y(&self, rect: &CellRect) -> i64 {
        rect.y as i64 - self.offset as i64
    }
}
