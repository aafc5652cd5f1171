#![forbid(unsafe_code)]

//! Deterministic resize storms over grid geometries.
//!
//! A viewport resize changes the container's track counts, and each change
//! triggers a full relayout. A storm replays a sequence of such geometries so
//! a layout run can be checked frame by frame. Same seed, same sequence.

use tileboard_layout::{GridGeometry, SeededRng, StartRng};

/// Shape of a storm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StormPattern {
    /// Random walk: each step nudges rows and/or columns by up to 3.
    Burst { count: usize },
    /// Linear sweep between two geometries.
    Sweep {
        from: GridGeometry,
        to: GridGeometry,
        steps: usize,
    },
    /// Alternate between two geometries.
    Oscillate {
        a: GridGeometry,
        b: GridGeometry,
        cycles: usize,
    },
}

impl StormPattern {
    /// Pattern name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Burst { .. } => "burst",
            Self::Sweep { .. } => "sweep",
            Self::Oscillate { .. } => "oscillate",
        }
    }
}

/// Storm shape chosen by name, before its geometries are known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StormShape {
    #[default]
    Burst,
    Sweep,
    Oscillate,
}

impl StormShape {
    /// Parse `burst`, `sweep` or `oscillate` (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "burst" => Some(Self::Burst),
            "sweep" => Some(Self::Sweep),
            "oscillate" => Some(Self::Oscillate),
            _ => None,
        }
    }

    /// Pattern of at least `events` geometries from `initial` toward `target`.
    ///
    /// Oscillation rounds up to whole cycles.
    pub fn pattern(self, events: usize, initial: GridGeometry, target: GridGeometry) -> StormPattern {
        match self {
            Self::Burst => StormPattern::Burst { count: events },
            Self::Sweep => StormPattern::Sweep {
                from: initial,
                to: target,
                steps: events,
            },
            Self::Oscillate => StormPattern::Oscillate {
                a: initial,
                b: target,
                cycles: events.div_ceil(2),
            },
        }
    }
}

/// Configuration for storm generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StormConfig {
    pub seed: u64,
    pub pattern: StormPattern,
    /// Starting geometry for random walks.
    pub initial: GridGeometry,
    /// Smallest geometry a random walk may reach.
    pub min: GridGeometry,
    /// Largest geometry a random walk may reach.
    pub max: GridGeometry,
}

impl Default for StormConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            pattern: StormPattern::Burst { count: 20 },
            initial: GridGeometry::new(6, 10),
            min: GridGeometry::new(1, 1),
            max: GridGeometry::new(24, 40),
        }
    }
}

impl StormConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_pattern(mut self, pattern: StormPattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_initial(mut self, initial: GridGeometry) -> Self {
        self.initial = initial;
        self
    }

    pub fn with_bounds(mut self, min: GridGeometry, max: GridGeometry) -> Self {
        self.min = min;
        self.max = max;
        self
    }
}

/// Generate the geometry sequence for `config`.
pub fn generate(config: &StormConfig) -> Vec<GridGeometry> {
    match &config.pattern {
        StormPattern::Burst { count } => burst(config, *count),
        StormPattern::Sweep { from, to, steps } => sweep(*from, *to, *steps),
        StormPattern::Oscillate { a, b, cycles } => {
            (0..*cycles).flat_map(|_| [*a, *b]).collect()
        }
    }
}

fn burst(config: &StormConfig, count: usize) -> Vec<GridGeometry> {
    let mut rng = SeededRng::new(config.seed);
    let mut step = |value: u16, min: u16, max: u16| -> u16 {
        // 0..=6 maps to a delta in -3..=3.
        let delta = (rng.next_u64() % 7) as i32 - 3;
        (i32::from(value) + delta).clamp(i32::from(min), i32::from(max.max(min))) as u16
    };

    let mut current = config.initial;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        current = GridGeometry::new(
            step(current.rows, config.min.rows, config.max.rows),
            step(current.cols, config.min.cols, config.max.cols),
        );
        out.push(current);
    }
    out
}

fn sweep(from: GridGeometry, to: GridGeometry, steps: usize) -> Vec<GridGeometry> {
    let lerp = |a: u16, b: u16, t: f64| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u16;
    (0..steps)
        .map(|i| {
            let t = if steps > 1 {
                i as f64 / (steps - 1) as f64
            } else {
                1.0
            };
            GridGeometry::new(lerp(from.rows, to.rows, t), lerp(from.cols, to.cols, t))
        })
        .collect()
}
