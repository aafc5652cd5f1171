#![forbid(unsafe_code)]

//! Grid geometry from computed CSS track lists.
//!
//! A computed `grid-template-rows` / `grid-template-columns` value is a
//! space-separated list of resolved track sizes (`"120px 120px 120px"`), so
//! the track count is the number of spaces plus one.

use tileboard_core::geometry::GridGeometry;

/// Number of tracks in a computed template value.
pub fn count_tracks(template: &str) -> u16 {
    let spaces = template.bytes().filter(|&b| b == b' ').count();
    u16::try_from(spaces.saturating_add(1)).unwrap_or(u16::MAX)
}

/// Geometry of a container from its computed row and column templates.
pub fn geometry_from_templates(rows: &str, cols: &str) -> GridGeometry {
    GridGeometry::new(count_tracks(rows), count_tracks(cols))
}
