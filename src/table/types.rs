//! Core geometry and index newtypes

/// Area the host assigns to the table, in pixels.
///
/// Two allocations are equal only when every field matches; the windowing
/// engine compares whole allocations to decide on a full re-tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Allocation {
    /// Horizontal position inside the parent.
    pub x: i32,
    /// Vertical position inside the parent.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels. This is also the scroll page size.
    pub height: u32,
}

impl Allocation {
    /// Create a new allocation.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Allocation at the parent's origin.
    pub fn sized(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }
}

/// Rectangle of a cell on the backing canvas.
///
/// `y` is measured from the top of the virtual content, so it can be far
/// larger than the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    /// Left edge.
    pub x: u32,
    /// Top edge on the canvas.
    pub y: u64,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CellRect {
    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> u64 {
        self.y + u64::from(self.height)
    }
}

/// Flat index of a dataset item, as delivered by fill-in events.
///
/// Items are laid out row-major: item `i` lives in virtual row
/// `i / columns`, column `i % columns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CellIndex(usize);

impl CellIndex {
    /// Create a new CellIndex from a raw value.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw value.
    pub fn get(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for CellIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Logical row of the dataset. 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VirtualRow(usize);

impl VirtualRow {
    /// Create a new VirtualRow from a raw value.
    pub fn new(row: usize) -> Self {
        Self(row)
    }

    /// Get the raw value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Row whose top edge sits at `y`, for rows of `cell_height` pixels.
    ///
    /// # Panics
    /// Panics if `cell_height` is zero.
    pub fn at_y(y: u64, cell_height: u32) -> Self {
        Self((y / u64::from(cell_height)) as usize)
    }

    /// Top edge of this row, for rows of `cell_height` pixels.
    pub fn top(&self, cell_height: u32) -> u64 {
        self.0 as u64 * u64::from(cell_height)
    }

    /// Index of the item in this row's first column.
    pub fn first_cell(&self, columns: usize) -> CellIndex {
        CellIndex(self.0 * columns)
    }
}
