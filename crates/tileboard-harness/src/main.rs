#![forbid(unsafe_code)]

//! Tileboard layout driver.
//!
//! Reads a program payload (the full initial payload or a bare
//! `program-storage` object), lays it out and prints one JSON record per
//! line to stdout.
//!
//! # Running
//!
//! ```sh
//! TILEBOARD_INPUT=programs.json TILEBOARD_ROWS=6 TILEBOARD_COLS=10 \
//!     cargo run -p tileboard-harness
//! TILEBOARD_STORM=50 TILEBOARD_SEED=7 cargo run -p tileboard-harness < programs.json
//! ```

use std::io::{self, Read, Write};

use tileboard_core::logging::{LogFormat, install_subscriber};
use tileboard_harness::{HarnessConfig, load_catalog, run};

fn main() -> io::Result<()> {
    let config = HarnessConfig::from_env()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    let installed = install_subscriber(if config.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    });
    if !installed {
        tracing::warn!("a global tracing subscriber was already installed; keeping it");
    }

    let text = match &config.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let mut catalog =
        load_catalog(&text).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    if config.sanitize {
        catalog.sanitize();
    }

    tracing::info!(
        programs = catalog.len(),
        rows = config.geometry.rows,
        cols = config.geometry.cols,
        storm = config.storm.unwrap_or(0),
        "starting layout run"
    );

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let summary = run::run(&config, &catalog, &mut out)?;
    out.flush()?;

    tracing::info!(
        frames = summary.frames,
        placed = summary.placed,
        dropped = summary.dropped,
        "layout run complete"
    );
    Ok(())
}
