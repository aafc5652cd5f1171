#![forbid(unsafe_code)]

//! Tileboard harness: env-configured layout runs and resize storms.
//!
//! - [`config`] - [`HarnessConfig`] from `TILEBOARD_*` variables
//! - [`storm`] - deterministic geometry sequences
//! - [`run`] - session-driven layout with JSONL output

pub mod config;
pub mod run;
pub mod storm;

pub use config::{ConfigError, HarnessConfig};
pub use run::{RunSummary, load_catalog};
pub use storm::{StormConfig, StormPattern, StormShape};
