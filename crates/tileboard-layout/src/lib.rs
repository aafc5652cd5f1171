#![forbid(unsafe_code)]

//! Dashboard tile placement.
//!
//! - [`placement`] - randomized first-fit placement of rectangular tiles
//! - [`rng`] - injectable random source for start cells
//! - [`catalog`] - the program payload the dashboard backend serves
//! - [`tracks`] - grid geometry from computed CSS track lists
//! - [`tile`] - placed programs as renderable tiles
//! - [`session`] - resize-driven relayout with stale-frame rejection
//!
//! ```ignore
//! use tileboard_layout::{ProgramCatalog, geometry_from_templates, place, build_tiles};
//!
//! let catalog = ProgramCatalog::from_json(payload)?;
//! let geometry = geometry_from_templates(rows_template, cols_template);
//! let placed = place(geometry, &catalog.placement_items());
//! let tiles = build_tiles(&catalog, &placed, "https://home.example/");
//! ```

pub mod catalog;
pub mod placement;
pub mod rng;
pub mod session;
pub mod tile;
pub mod tracks;

pub use catalog::{CatalogError, IconRef, ProgramCatalog, ProgramEntry, ProgramKind};
pub use placement::{
    Placement, PlacementItem, PlacementReport, place, place_report, place_with_rng,
};
pub use rng::{SeededRng, StartRng};
pub use session::{LayoutFrame, LayoutSession, SessionError};
pub use tile::{TileView, build_tiles, grid_area};
pub use tileboard_core::geometry::{CellRect, GridGeometry};
pub use tracks::{count_tracks, geometry_from_templates};
