#![forbid(unsafe_code)]

//! Random source for placement start cells.
//!
//! The engine only needs a uniform draw in `[0, 1)` per item. Keeping the
//! source behind [`StartRng`] lets tests pin the start cell while production
//! callers use an entropy-seeded [`SeededRng`].

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of pseudo-random start cells.
pub trait StartRng {
    /// Next raw 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64 {
        // Top 53 bits fill the f64 mantissa exactly.
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

impl<R: StartRng + ?Sized> StartRng for &mut R {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }

    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Simple LCG PRNG. Same seed, same sequence.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a generator from a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    /// Create a generator seeded from the wall clock.
    ///
    /// A process-wide counter is mixed in so generators created within the
    /// same clock tick still diverge.
    pub fn from_entropy() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let mut hasher = DefaultHasher::new();
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
            .hash(&mut hasher);
        COUNTER.fetch_add(1, Ordering::Relaxed).hash(&mut hasher);
        std::process::id().hash(&mut hasher);
        Self::new(hasher.finish())
    }
}

impl StartRng for SeededRng {
    fn next_u64(&mut self) -> u64 {
        // LCG parameters from Numerical Recipes
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }
}

/// Draw a start index in `[0, bound]` by rounding `unit * bound`.
///
/// The upper bound is inclusive; it wraps to row/column 0 during the
/// torus scan.
pub(crate) fn draw_start<R: StartRng + ?Sized>(rng: &mut R, bound: u16) -> u16 {
    let unit = rng.next_unit().clamp(0.0, 1.0);
    (unit * f64::from(bound)).round() as u16
}
