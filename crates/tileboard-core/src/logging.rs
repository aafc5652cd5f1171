#![forbid(unsafe_code)]

//! Logging and tracing support.
//!
//! With the `tracing` feature, `debug!`, `debug_span!` and `trace!` are
//! re-exported here and at the crate root. Without it, no-op macros with the
//! same names keep call sites compiling at zero cost.
//!
//! The `tracing-json` feature adds [`install_subscriber`], which the harness
//! binary uses to route spans to stderr as text or JSON.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace};

// Same names, expanding to nothing, when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
mod noop_macros {
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}

/// A no-op span for when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Enter the no-op span (does nothing).
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }
}

/// A no-op span guard.
#[cfg(not(feature = "tracing"))]
pub struct NoopGuard;

/// Output format for [`install_subscriber`].
#[cfg(feature = "tracing-json")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// Install a global stderr subscriber filtered by `RUST_LOG` (default `info`).
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn install_subscriber(format: LogFormat) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    }
}
