#![forbid(unsafe_code)]

//! Layout runs with JSONL output.
//!
//! # JSONL Schema
//!
//! ```json
//! {"event":"layout_start","generation":1,"rows":6,"cols":10,"items":7}
//! {"event":"tile","generation":1,"id":"mail","grid_area":"1/3/span 1/span 2","border_color":"#EEEEEE",...}
//! {"event":"tile_dropped","generation":1,"id":"huge"}
//! {"event":"layout_complete","generation":1,"placed":6,"dropped":1,"checksum":"..."}
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::{self, Write};

use serde_json::{Value, json};
use tileboard_layout::{
    CatalogError, GridGeometry, LayoutSession, ProgramCatalog, SeededRng, build_tiles,
};

use crate::config::HarnessConfig;
use crate::storm::{self, StormConfig};

/// Totals over every frame of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: usize,
    pub placed: usize,
    pub dropped: usize,
}

/// Parse either the full initial payload or a bare program storage object.
pub fn load_catalog(text: &str) -> Result<ProgramCatalog, CatalogError> {
    match ProgramCatalog::from_connect_init(text) {
        Err(CatalogError::MissingMember(_)) => ProgramCatalog::from_json(text),
        other => other,
    }
}

/// Geometries a run lays out: the configured one, or a storm starting there.
pub fn geometries(config: &HarnessConfig) -> Vec<GridGeometry> {
    match config.storm {
        Some(count) => {
            let storm_config = StormConfig::default()
                .with_seed(config.seed.unwrap_or(0))
                .with_initial(config.geometry);
            // Sweeps and oscillations head for the storm's upper bound.
            let pattern = config
                .storm_shape
                .pattern(count, config.geometry, storm_config.max);
            let storm_config = storm_config.with_pattern(pattern);
            tracing::debug!(
                pattern = storm_config.pattern.name(),
                count,
                seed = storm_config.seed,
                "generating resize storm"
            );
            let mut geometries = storm::generate(&storm_config);
            geometries.truncate(count);
            geometries
        }
        None => vec![config.geometry],
    }
}

fn emit<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    writeln!(out, "{value}")
}

/// Lay out `catalog` for every geometry of `config`, writing JSONL to `out`.
///
/// Every frame is the newest issued when it is accepted, so each one is
/// committed; a storm therefore reports one complete layout per geometry.
pub fn run<W: Write>(
    config: &HarnessConfig,
    catalog: &ProgramCatalog,
    out: &mut W,
) -> io::Result<RunSummary> {
    let rng = match config.seed {
        Some(seed) => SeededRng::new(seed),
        None => SeededRng::from_entropy(),
    };
    let mut session = LayoutSession::with_rng(catalog.placement_items(), rng);
    let mut summary = RunSummary::default();

    for geometry in geometries(config) {
        let frame = session.relayout(geometry);
        let generation = frame.generation;
        emit(
            out,
            &json!({
                "event": "layout_start",
                "generation": generation,
                "rows": geometry.rows,
                "cols": geometry.cols,
                "items": session.items().len(),
            }),
        )?;

        let tiles = build_tiles(catalog, &frame.report.placed, &config.base_url);
        let mut hasher = DefaultHasher::new();
        for tile in &tiles {
            tile.grid_area.hash(&mut hasher);
            let mut record = serde_json::to_value(tile).map_err(io::Error::other)?;
            if let Value::Object(map) = &mut record {
                map.insert("event".into(), json!("tile"));
                map.insert("generation".into(), json!(generation));
            }
            emit(out, &record)?;
        }
        for id in &frame.report.dropped {
            emit(
                out,
                &json!({"event": "tile_dropped", "generation": generation, "id": id}),
            )?;
        }

        let (placed, dropped) = (tiles.len(), frame.report.dropped.len());
        session.accept(frame).map_err(io::Error::other)?;
        emit(
            out,
            &json!({
                "event": "layout_complete",
                "generation": generation,
                "placed": placed,
                "dropped": dropped,
                "checksum": format!("{:016x}", hasher.finish()),
            }),
        )?;

        tracing::debug!(generation, placed, dropped, "frame committed");
        summary.frames += 1;
        summary.placed += placed;
        summary.dropped += dropped;
    }

    Ok(summary)
}
