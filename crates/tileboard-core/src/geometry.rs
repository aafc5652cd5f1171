#![forbid(unsafe_code)]

//! Grid-cell geometry.
//!
//! Coordinates are grid cells, 0-indexed with the origin at the top-left.
//! Rows grow downwards and columns grow to the right.

/// Row and column count of a placement surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridGeometry {
    /// Number of rows.
    pub rows: u16,
    /// Number of columns.
    pub cols: u16,
}

impl GridGeometry {
    /// Create a new geometry.
    #[inline]
    pub const fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    #[inline]
    pub const fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// A grid with no rows or no columns has no cells to place into.
    #[inline]
    pub const fn is_degenerate(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

/// An axis-aligned block of grid cells.
///
/// Covers rows `[row, row + height)` and columns `[col, col + width)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellRect {
    /// Top row (inclusive).
    pub row: u16,
    /// Left column (inclusive).
    pub col: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl CellRect {
    /// Create a new cell rectangle.
    #[inline]
    pub const fn new(row: u16, col: u16, width: u16, height: u16) -> Self {
        Self {
            row,
            col,
            width,
            height,
        }
    }

    /// Bottom row (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.row.saturating_add(self.height)
    }

    /// Right column (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.col.saturating_add(self.width)
    }

    /// Area in cells.
    #[inline]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Check if the rectangle covers no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a cell is covered.
    #[inline]
    pub const fn contains(&self, row: u16, col: u16) -> bool {
        row >= self.row && row < self.bottom() && col >= self.col && col < self.right()
    }

    /// Check whether two rectangles share at least one cell.
    #[inline]
    pub fn intersects(&self, other: &CellRect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.row < other.bottom()
            && other.row < self.bottom()
            && self.col < other.right()
            && other.col < self.right()
    }

    /// Ordinary bounds check: every covered cell lies inside the grid.
    #[inline]
    pub fn fits_within(&self, geometry: GridGeometry) -> bool {
        u32::from(self.row) + u32::from(self.height) <= u32::from(geometry.rows)
            && u32::from(self.col) + u32::from(self.width) <= u32::from(geometry.cols)
    }

    /// Bounds check with one row and one column of slack past the far edges.
    ///
    /// A rectangle touching the last row or last column is rejected. Tile
    /// placement uses this rule, so an item can only ever occupy
    /// `[0, rows - 1) x [0, cols - 1)`.
    #[inline]
    pub fn fits_with_margin(&self, geometry: GridGeometry) -> bool {
        u32::from(self.row) + u32::from(self.height) < u32::from(geometry.rows)
            && u32::from(self.col) + u32::from(self.width) < u32::from(geometry.cols)
    }

    /// Covered cells as `(row, col)` in row-major order.
    pub fn cells(self) -> impl Iterator<Item = (u16, u16)> {
        let (col, right) = (self.col, self.right());
        (self.row..self.bottom()).flat_map(move |r| (col..right).map(move |c| (r, c)))
    }
}
