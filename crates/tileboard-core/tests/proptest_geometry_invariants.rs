//! Property-based invariant tests for grid-cell geometry.
//!
//! 1. `intersects` is symmetric.
//! 2. `intersects` agrees with a shared covered cell.
//! 3. `cells()` yields exactly `area()` distinct covered cells.
//! 4. The margin check implies the ordinary bounds check.
//! 5. A rectangle passing the margin check never touches the last row/column.
//! 6. No panics on extreme u16 values.

use std::collections::HashSet;

use proptest::prelude::*;
use tileboard_core::geometry::{CellRect, GridGeometry};

// ── Helpers ─────────────────────────────────────────────────────────────

fn small_rect_strategy() -> impl Strategy<Value = CellRect> {
    (0u16..=20, 0u16..=20, 0u16..=8, 0u16..=8).prop_map(|(r, c, w, h)| CellRect::new(r, c, w, h))
}

fn rect_strategy() -> impl Strategy<Value = CellRect> {
    (any::<u16>(), any::<u16>(), any::<u16>(), any::<u16>())
        .prop_map(|(r, c, w, h)| CellRect::new(r, c, w, h))
}

fn geometry_strategy() -> impl Strategy<Value = GridGeometry> {
    (0u16..=40, 0u16..=40).prop_map(|(rows, cols)| GridGeometry::new(rows, cols))
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Symmetry
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn intersects_symmetric(a in small_rect_strategy(), b in small_rect_strategy()) {
        prop_assert_eq!(a.intersects(&b), b.intersects(&a), "a={:?}, b={:?}", a, b);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Intersection agrees with cell sets
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn intersects_iff_shared_cell(a in small_rect_strategy(), b in small_rect_strategy()) {
        let cells_a: HashSet<_> = a.cells().collect();
        let shared = b.cells().any(|cell| cells_a.contains(&cell));
        prop_assert_eq!(a.intersects(&b), shared, "a={:?}, b={:?}", a, b);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Cell enumeration matches area
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cells_match_area(a in small_rect_strategy()) {
        let cells: HashSet<_> = a.cells().collect();
        prop_assert_eq!(cells.len() as u32, a.area());
        for (row, col) in cells {
            prop_assert!(a.contains(row, col));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-5. Margin rule
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn margin_implies_within(a in small_rect_strategy(), grid in geometry_strategy()) {
        if a.fits_with_margin(grid) {
            prop_assert!(a.fits_within(grid));
        }
    }

    #[test]
    fn margin_keeps_last_row_and_col_free(a in small_rect_strategy(), grid in geometry_strategy()) {
        if a.fits_with_margin(grid) {
            for (row, col) in a.cells() {
                prop_assert!(row + 1 < grid.rows, "row {} touches edge of {:?}", row, grid);
                prop_assert!(col + 1 < grid.cols, "col {} touches edge of {:?}", col, grid);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Extreme values
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn no_panic_on_extremes(a in rect_strategy(), b in rect_strategy(), rows in any::<u16>(), cols in any::<u16>()) {
        let grid = GridGeometry::new(rows, cols);
        let _ = a.bottom();
        let _ = a.right();
        let _ = a.area();
        let _ = a.intersects(&b);
        let _ = a.fits_within(grid);
        let _ = a.fits_with_margin(grid);
        let _ = grid.cell_count();
    }
}
