#![forbid(unsafe_code)]

//! Resize-driven relayout with stale-frame rejection.
//!
//! Every viewport resize recomputes the layout from scratch. Computations can
//! overlap, and the engine itself carries no sequencing, so the session tags
//! each frame with a generation and only commits the most recently issued one.
//!
//! ```ignore
//! let mut session = LayoutSession::new(catalog.placement_items());
//! let early = session.relayout(GridGeometry::new(6, 10));
//! let late = session.relayout(GridGeometry::new(8, 12));
//! session.accept(late)?;
//! assert!(session.accept(early).is_err());
//! ```

use std::fmt;

use tileboard_core::geometry::GridGeometry;

use crate::placement::{PlacementItem, PlacementReport, place_report};
use crate::rng::{SeededRng, StartRng};

/// One computed layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutFrame {
    /// Issue order, starting at 1.
    pub generation: u64,
    pub geometry: GridGeometry,
    pub report: PlacementReport<String>,
}

/// A frame could not be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// A newer frame has been issued since this one.
    Stale { frame: u64, latest: u64 },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stale { frame, latest } => {
                write!(f, "layout frame {frame} is stale (latest issued: {latest})")
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// Layout state for one dashboard page.
#[derive(Debug)]
pub struct LayoutSession<R = SeededRng> {
    items: Vec<PlacementItem<String>>,
    rng: R,
    issued: u64,
    current: Option<LayoutFrame>,
}

impl LayoutSession<SeededRng> {
    /// Session with an entropy-seeded random source.
    pub fn new(items: Vec<PlacementItem<String>>) -> Self {
        Self::with_rng(items, SeededRng::from_entropy())
    }
}

impl<R: StartRng> LayoutSession<R> {
    /// Session with a caller-supplied random source.
    pub fn with_rng(items: Vec<PlacementItem<String>>, rng: R) -> Self {
        Self {
            items,
            rng,
            issued: 0,
            current: None,
        }
    }

    /// Items laid out by each [`relayout`](Self::relayout).
    pub fn items(&self) -> &[PlacementItem<String>] {
        &self.items
    }

    /// Swap the item set (e.g. after the catalog was edited).
    ///
    /// The committed frame is kept until the next relayout is accepted.
    pub fn set_items(&mut self, items: Vec<PlacementItem<String>>) {
        self.items = items;
    }

    /// Compute a fresh layout for `geometry` and issue it as the newest frame.
    pub fn relayout(&mut self, geometry: GridGeometry) -> LayoutFrame {
        self.issued += 1;
        let report = place_report(geometry, &self.items, &mut self.rng);
        tileboard_core::debug!(
            generation = self.issued,
            rows = geometry.rows,
            cols = geometry.cols,
            placed = report.placed.len(),
            "layout frame issued"
        );
        LayoutFrame {
            generation: self.issued,
            geometry,
            report,
        }
    }

    /// Commit `frame` if it is the latest issued.
    ///
    /// # Errors
    ///
    /// [`SessionError::Stale`] if a newer frame has been issued; the committed
    /// frame is left unchanged.
    pub fn accept(&mut self, frame: LayoutFrame) -> Result<&LayoutFrame, SessionError> {
        if frame.generation != self.issued {
            tileboard_core::debug!(
                frame = frame.generation,
                latest = self.issued,
                "discarding stale layout frame"
            );
            return Err(SessionError::Stale {
                frame: frame.generation,
                latest: self.issued,
            });
        }
        Ok(self.current.insert(frame))
    }

    /// Last committed frame.
    pub fn current(&self) -> Option<&LayoutFrame> {
        self.current.as_ref()
    }

    /// Generation of the newest issued frame (0 before the first relayout).
    pub fn latest_generation(&self) -> u64 {
        self.issued
    }
}
