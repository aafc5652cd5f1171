#![forbid(unsafe_code)]

//! Randomized first-fit tile placement.
//!
//! Items are placed largest-area first. Each item draws a random start cell
//! and scans candidate origins over the grid as a torus in row-major order
//! from there; the first origin whose footprint is free and leaves one row and
//! one column of slack past the far edges wins. Items with no such origin are
//! dropped.
//!
//! # Invariants
//!
//! For every run:
//! - no two placed footprints share a cell;
//! - every footprint satisfies `row + height < rows` and `col + width < cols`;
//! - placements come out in processing order (area descending, input order on
//!   ties).
//!
//! The start cell is random, so two runs over the same input may differ in
//! origins but never in the invariants above.

use std::cmp::Reverse;

use tileboard_core::geometry::{CellRect, GridGeometry};

use crate::rng::{SeededRng, StartRng, draw_start};

/// One tile to place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementItem<Id> {
    /// Opaque identifier, handed back unchanged in the [`Placement`].
    pub id: Id,
    /// Width in columns (>= 1).
    pub width: u16,
    /// Height in rows (>= 1).
    pub height: u16,
}

impl<Id> PlacementItem<Id> {
    /// Create a new item.
    pub fn new(id: Id, width: u16, height: u16) -> Self {
        Self { id, width, height }
    }

    /// Sort key: area in cells.
    #[inline]
    pub fn area(&self) -> u32 {
        u32::from(self.width) * u32::from(self.height)
    }

    /// Whether the slack rule could ever admit this item on `geometry`.
    #[inline]
    pub fn is_placeable_on(&self, geometry: GridGeometry) -> bool {
        self.width < geometry.cols && self.height < geometry.rows
    }
}

/// A placed tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement<Id> {
    pub id: Id,
    /// Top-left row of the footprint.
    pub origin_row: u16,
    /// Top-left column of the footprint.
    pub origin_col: u16,
    pub width: u16,
    pub height: u16,
}

impl<Id> Placement<Id> {
    /// Occupied cells.
    #[inline]
    pub fn rect(&self) -> CellRect {
        CellRect::new(self.origin_row, self.origin_col, self.width, self.height)
    }
}

/// Outcome of a placement run, including the items that found no room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementReport<Id> {
    /// Placed items in processing order.
    pub placed: Vec<Placement<Id>>,
    /// Ids of dropped items in processing order.
    pub dropped: Vec<Id>,
}

impl<Id> Default for PlacementReport<Id> {
    fn default() -> Self {
        Self {
            placed: Vec::new(),
            dropped: Vec::new(),
        }
    }
}

/// Row-major occupancy mask for one run.
#[derive(Debug, Clone)]
pub(crate) struct OccupancyGrid {
    geometry: GridGeometry,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    pub(crate) fn new(geometry: GridGeometry) -> Self {
        Self {
            geometry,
            cells: vec![false; geometry.cell_count()],
        }
    }

    #[inline]
    fn index(&self, row: u16, col: u16) -> usize {
        row as usize * self.geometry.cols as usize + col as usize
    }

    /// Every cell of `rect` is free. `rect` must lie inside the grid.
    pub(crate) fn is_free(&self, rect: CellRect) -> bool {
        rect.cells().all(|(row, col)| !self.cells[self.index(row, col)])
    }

    /// Mark every cell of `rect` occupied. `rect` must lie inside the grid.
    pub(crate) fn occupy(&mut self, rect: CellRect) {
        for (row, col) in rect.cells() {
            let idx = self.index(row, col);
            self.cells[idx] = true;
        }
    }

    #[cfg(test)]
    pub(crate) fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Scan for the first acceptable origin of a `width x height` footprint.
///
/// Candidates are visited in row-major order over the grid wrapped as a
/// torus, starting at `start` (which may equal `rows`/`cols` and wraps).
/// Returns `(row, col)` of the first origin that passes the slack rule and
/// covers only free cells. The grid is not modified.
pub(crate) fn first_fit(
    grid: &OccupancyGrid,
    width: u16,
    height: u16,
    start: (u16, u16),
) -> Option<(u16, u16)> {
    let GridGeometry { rows, cols } = grid.geometry;
    if rows == 0 || cols == 0 {
        return None;
    }
    let (start_row, start_col) = (u32::from(start.0), u32::from(start.1));
    for i in 0..u32::from(rows) {
        let row = ((start_row + i) % u32::from(rows)) as u16;
        for j in 0..u32::from(cols) {
            let col = ((start_col + j) % u32::from(cols)) as u16;
            let candidate = CellRect::new(row, col, width, height);
            if !candidate.fits_with_margin(grid.geometry) {
                continue;
            }
            if grid.is_free(candidate) {
                return Some((row, col));
            }
        }
    }
    None
}

/// Place `items` on a `geometry` grid using an entropy-seeded random source.
///
/// Returns one [`Placement`] per item that found room, largest area first.
pub fn place<Id: Clone>(geometry: GridGeometry, items: &[PlacementItem<Id>]) -> Vec<Placement<Id>> {
    let mut rng = SeededRng::from_entropy();
    place_report(geometry, items, &mut rng).placed
}

/// Like [`place`] with a caller-supplied random source.
pub fn place_with_rng<Id: Clone, R: StartRng + ?Sized>(
    geometry: GridGeometry,
    items: &[PlacementItem<Id>],
    rng: &mut R,
) -> Vec<Placement<Id>> {
    place_report(geometry, items, rng).placed
}

/// Run the placement and report both placed and dropped items.
///
/// One start cell is drawn per processed item (row first, then column), so
/// with a fixed seed the outcome for a prefix of the processing order does
/// not depend on the items after it.
pub fn place_report<Id: Clone, R: StartRng + ?Sized>(
    geometry: GridGeometry,
    items: &[PlacementItem<Id>],
    rng: &mut R,
) -> PlacementReport<Id> {
    let span = tileboard_core::debug_span!(
        "tile_place",
        rows = geometry.rows,
        cols = geometry.cols,
        items = items.len()
    );
    let _guard = span.enter();

    let mut order: Vec<&PlacementItem<Id>> = items.iter().collect();
    // Stable: equal areas keep input order.
    order.sort_by_key(|item| Reverse(item.area()));

    let mut report = PlacementReport {
        placed: Vec::with_capacity(order.len()),
        dropped: Vec::new(),
    };

    if geometry.is_degenerate() {
        tileboard_core::debug!(dropped = order.len(), "degenerate grid, nothing placed");
        report.dropped = order.into_iter().map(|item| item.id.clone()).collect();
        return report;
    }

    let mut grid = OccupancyGrid::new(geometry);
    for item in order {
        let start_row = draw_start(rng, geometry.rows);
        let start_col = draw_start(rng, geometry.cols);
        match first_fit(&grid, item.width, item.height, (start_row, start_col)) {
            Some((row, col)) => {
                let placement = Placement {
                    id: item.id.clone(),
                    origin_row: row,
                    origin_col: col,
                    width: item.width,
                    height: item.height,
                };
                grid.occupy(placement.rect());
                tileboard_core::trace!(
                    row,
                    col,
                    width = item.width,
                    height = item.height,
                    "tile placed"
                );
                report.placed.push(placement);
            }
            None => {
                tileboard_core::trace!(
                    width = item.width,
                    height = item.height,
                    "tile dropped"
                );
                report.dropped.push(item.id.clone());
            }
        }
    }

    tileboard_core::debug!(
        placed = report.placed.len(),
        dropped = report.dropped.len(),
        "placement complete"
    );
    report
}
