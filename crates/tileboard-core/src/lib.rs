#![forbid(unsafe_code)]

//! Core: grid-cell geometry and the logging facade shared by the tileboard crates.

pub mod geometry;
pub mod logging;

pub use geometry::{CellRect, GridGeometry};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace};
