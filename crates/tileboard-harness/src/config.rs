#![forbid(unsafe_code)]

//! Harness configuration from environment variables.
//!
//! | Variable                  | Meaning                                          |
//! |---------------------------|--------------------------------------------------|
//! | `TILEBOARD_INPUT`         | Payload file (stdin when unset)                  |
//! | `TILEBOARD_ROWS`          | Grid rows                                        |
//! | `TILEBOARD_COLS`          | Grid columns                                     |
//! | `TILEBOARD_ROW_TEMPLATE`  | Computed `grid-template-rows` (if no ROWS)       |
//! | `TILEBOARD_COL_TEMPLATE`  | Computed `grid-template-columns` (if no COLS)    |
//! | `TILEBOARD_SEED`          | Fixed seed (entropy when unset)                  |
//! | `TILEBOARD_STORM`         | Number of resize events to replay                |
//! | `TILEBOARD_STORM_PATTERN` | `burst` (default), `sweep` or `oscillate`        |
//! | `TILEBOARD_BASE_URL`      | Base for root-relative program links             |
//! | `TILEBOARD_SANITIZE`      | Clamp sizes as the program editor does           |
//! | `TILEBOARD_LOG_JSON`      | Log as JSON to stderr                            |

use std::fmt;
use std::path::PathBuf;

use tileboard_layout::{GridGeometry, count_tracks};

use crate::storm::StormShape;

/// Grid used when neither counts nor templates are given.
pub const DEFAULT_GEOMETRY: GridGeometry = GridGeometry::new(6, 10);

/// A variable is set but cannot be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidNumber { var: &'static str, value: String },
    UnknownStormPattern { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber { var, value } => {
                write!(f, "{var} must be a non-negative integer, got {value:?}")
            }
            Self::UnknownStormPattern { value } => write!(
                f,
                "TILEBOARD_STORM_PATTERN must be burst, sweep or oscillate, got {value:?}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Everything a harness run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub input: Option<PathBuf>,
    pub geometry: GridGeometry,
    pub seed: Option<u64>,
    pub storm: Option<usize>,
    pub storm_shape: StormShape,
    pub base_url: String,
    pub sanitize: bool,
    pub log_json: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            input: None,
            geometry: DEFAULT_GEOMETRY,
            seed: None,
            storm: None,
            storm_shape: StormShape::default(),
            base_url: "/".into(),
            sanitize: false,
            log_json: false,
        }
    }
}

impl HarnessConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup` (variable name to value).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let string = |name: &str| {
            lookup(name).and_then(|value| {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
        };
        let number = |name: &'static str| -> Result<Option<u64>, ConfigError> {
            string(name)
                .map(|value| {
                    value
                        .parse::<u64>()
                        .map_err(|_| ConfigError::InvalidNumber { var: name, value })
                })
                .transpose()
        };
        let count = |name: &'static str| -> Result<Option<u16>, ConfigError> {
            match number(name)? {
                Some(n) => u16::try_from(n).map(Some).map_err(|_| ConfigError::InvalidNumber {
                    var: name,
                    value: n.to_string(),
                }),
                None => Ok(None),
            }
        };

        let rows = match count("TILEBOARD_ROWS")? {
            Some(rows) => rows,
            None => string("TILEBOARD_ROW_TEMPLATE")
                .map_or(DEFAULT_GEOMETRY.rows, |t| count_tracks(&t)),
        };
        let cols = match count("TILEBOARD_COLS")? {
            Some(cols) => cols,
            None => string("TILEBOARD_COL_TEMPLATE")
                .map_or(DEFAULT_GEOMETRY.cols, |t| count_tracks(&t)),
        };

        let flag = |name: &str| {
            string(name)
                .is_some_and(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "True" | "yes" | "on"))
        };

        let mut config = Self::default()
            .with_geometry(GridGeometry::new(rows, cols))
            .with_sanitize(flag("TILEBOARD_SANITIZE"))
            .with_log_json(flag("TILEBOARD_LOG_JSON"));
        if let Some(path) = string("TILEBOARD_INPUT") {
            config = config.with_input(path);
        }
        if let Some(seed) = number("TILEBOARD_SEED")? {
            config = config.with_seed(seed);
        }
        if let Some(storm) = number("TILEBOARD_STORM")? {
            config = config.with_storm(storm as usize);
        }
        if let Some(name) = string("TILEBOARD_STORM_PATTERN") {
            let shape = StormShape::from_name(&name)
                .ok_or(ConfigError::UnknownStormPattern { value: name })?;
            config = config.with_storm_shape(shape);
        }
        if let Some(base) = string("TILEBOARD_BASE_URL") {
            config = config.with_base_url(base);
        }
        Ok(config)
    }

    /// Set the payload file.
    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = Some(path.into());
        self
    }

    /// Set the grid geometry.
    pub fn with_geometry(mut self, geometry: GridGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Fix the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replay a resize storm of `events` geometries.
    pub fn with_storm(mut self, events: usize) -> Self {
        self.storm = Some(events);
        self
    }

    /// Set the storm shape used when a storm is replayed.
    pub fn with_storm_shape(mut self, shape: StormShape) -> Self {
        self.storm_shape = shape;
        self
    }

    /// Set the base location for root-relative links.
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.base_url = base.into();
        self
    }

    /// Coerce program sizes the way the editor saves them before layout.
    pub fn with_sanitize(mut self, enabled: bool) -> Self {
        self.sanitize = enabled;
        self
    }

    /// Enable or disable JSON logs.
    pub fn with_log_json(mut self, enabled: bool) -> Self {
        self.log_json = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = HarnessConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, HarnessConfig::default());
    }

    #[test]
    fn explicit_counts_win_over_templates() {
        let config = HarnessConfig::from_lookup(lookup(&[
            ("TILEBOARD_ROWS", "4"),
            ("TILEBOARD_ROW_TEMPLATE", "1px 1px"),
            ("TILEBOARD_COL_TEMPLATE", "1px 1px 1px"),
        ]))
        .unwrap();
        assert_eq!(config.geometry, GridGeometry::new(4, 3));
    }

    #[test]
    fn reads_all_fields() {
        let config = HarnessConfig::from_lookup(lookup(&[
            ("TILEBOARD_INPUT", "programs.json"),
            ("TILEBOARD_SEED", " 99 "),
            ("TILEBOARD_STORM", "12"),
            ("TILEBOARD_BASE_URL", "https://home.example/"),
            ("TILEBOARD_SANITIZE", "yes"),
            ("TILEBOARD_LOG_JSON", "1"),
        ]))
        .unwrap();
        assert_eq!(config.input, Some(PathBuf::from("programs.json")));
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.storm, Some(12));
        assert_eq!(config.base_url, "https://home.example/");
        assert!(config.sanitize);
        assert!(config.log_json);
    }

    #[test]
    fn storm_pattern_by_name() {
        let config =
            HarnessConfig::from_lookup(lookup(&[("TILEBOARD_STORM_PATTERN", "sweep")])).unwrap();
        assert_eq!(config.storm_shape, StormShape::Sweep);
        let err = HarnessConfig::from_lookup(lookup(&[("TILEBOARD_STORM_PATTERN", "zigzag")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownStormPattern {
                value: "zigzag".into()
            }
        );
    }

    #[test]
    fn blank_values_are_unset() {
        let config = HarnessConfig::from_lookup(lookup(&[("TILEBOARD_SEED", "  ")])).unwrap();
        assert_eq!(config.seed, None);
    }

    #[test]
    fn bad_numbers_are_reported() {
        let err = HarnessConfig::from_lookup(lookup(&[("TILEBOARD_COLS", "ten")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: "TILEBOARD_COLS",
                value: "ten".into()
            }
        );
        let err = HarnessConfig::from_lookup(lookup(&[("TILEBOARD_ROWS", "70000")])).unwrap_err();
        assert!(err.to_string().starts_with("TILEBOARD_ROWS"));
    }
}
