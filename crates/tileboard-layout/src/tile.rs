#![forbid(unsafe_code)]

//! Placed programs as renderable tiles.
//!
//! A [`TileView`] is everything the page needs to draw one program tile: its
//! CSS grid area, border colour, hover title, click target and icon.

use serde::Serialize;

use crate::catalog::{ProgramCatalog, ProgramEntry, ProgramKind};
use crate::placement::Placement;

/// Favicon lookup used when a program has a link but no uploaded icon.
pub const FAVICON_SERVICE: &str = "https://s2.googleusercontent.com/s2/favicons?domain_url=";

/// Route serving uploaded icons.
pub const ICON_ROUTE: &str = "/image/icon/";

/// Renderable tile for one placed program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileView {
    pub id: String,
    /// `row-start / column-start / span rows / span columns`, 1-based.
    pub grid_area: String,
    pub border_color: &'static str,
    /// `None` for palette types without a named category.
    pub kind: Option<ProgramKind>,
    pub title: String,
    pub label: Option<String>,
    pub link: Option<String>,
    pub icon: Option<String>,
}

/// CSS `grid-area` for a placement.
pub fn grid_area<Id>(placement: &Placement<Id>) -> String {
    format!(
        "{}/{}/span {}/span {}",
        u32::from(placement.origin_row) + 1,
        u32::from(placement.origin_col) + 1,
        placement.height,
        placement.width
    )
}

/// Resolve a root-relative link (`/path`) against `base` (the page location).
pub fn resolve_link(url: &str, base: &str) -> String {
    match url.strip_prefix('/') {
        Some(rest) => format!("{base}{rest}"),
        None => url.to_owned(),
    }
}

/// Hover title from the display name and resolved link.
pub fn tile_title(name: Option<&str>, link: Option<&str>) -> String {
    match (name, link) {
        (None, None) => "N/A".to_owned(),
        (None, Some(link)) => link.to_owned(),
        (Some(name), None) => name.to_owned(),
        (Some(name), Some(link)) => format!("{name}\n{link}"),
    }
}

impl TileView {
    /// Build the tile for `placement` of `entry`.
    ///
    /// Returns `None` if the entry's type has no border colour.
    pub fn new(placement: &Placement<String>, entry: &ProgramEntry, base: &str) -> Option<Self> {
        let border_color = entry.border_color()?;
        let link = entry.url.as_deref().map(|url| resolve_link(url, base));
        let icon = match (&entry.icon_image, &link) {
            (Some(icon), _) => Some(format!("{ICON_ROUTE}{icon}")),
            (None, Some(link)) => Some(format!("{FAVICON_SERVICE}{link}")),
            (None, None) => None,
        };
        Some(Self {
            id: placement.id.clone(),
            grid_area: grid_area(placement),
            border_color,
            kind: entry.kind(),
            title: tile_title(entry.display_name.as_deref(), link.as_deref()),
            label: entry.display_name.clone(),
            link,
            icon,
        })
    }
}

/// Tiles for every placement whose id is in the catalog, in placement order.
pub fn build_tiles(
    catalog: &ProgramCatalog,
    placements: &[Placement<String>],
    base: &str,
) -> Vec<TileView> {
    placements
        .iter()
        .filter_map(|p| TileView::new(p, catalog.get(&p.id)?, base))
        .collect()
}
