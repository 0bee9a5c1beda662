//! Tracing setup for the service.
//!
//! Level precedence, highest first:
//!   1. `-v` flags on the command line
//!   2. `RUST_LOG`, when set and parseable
//!   3. `BFHL_LOG_LEVEL` / `[server] log_level` (already merged by the config loader)

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Where the effective level comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSource<'a> {
    /// Derived from `-v` flags; ignores `RUST_LOG`.
    Flags(LevelFilter),
    /// Resolved config level; `RUST_LOG` may replace it.
    Configured(&'a str),
}

/// `-v` → warn, `-vv` → info, `-vvv` → debug, more → trace.
pub fn verbosity_level(count: u8) -> Option<LevelFilter> {
    match count {
        0 => None,
        1 => Some(LevelFilter::WARN),
        2 => Some(LevelFilter::INFO),
        3 => Some(LevelFilter::DEBUG),
        _ => Some(LevelFilter::TRACE),
    }
}

/// Install the global subscriber (stderr, fmt layer). Call once.
pub fn init(source: LevelSource<'_>) -> Result<(), AppError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(source, rust_log.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))
}

/// Pick the filter for `source`, given the raw `RUST_LOG` value.
///
/// A `RUST_LOG` that does not parse is ignored rather than fatal; the
/// configured level has been validated at load time and is always usable.
pub fn build_filter(source: LevelSource<'_>, rust_log: Option<&str>) -> Result<EnvFilter, AppError> {
    let level = match source {
        LevelSource::Flags(level) => level,
        LevelSource::Configured(configured) => {
            let level = parse_level(configured)?;
            let directives = rust_log.map(str::trim).filter(|s| !s.is_empty());
            if let Some(filter) = directives.and_then(|d| EnvFilter::try_new(d).ok()) {
                return Ok(filter);
            }
            level
        }
    };

    EnvFilter::try_new(level.to_string())
        .map_err(|e| AppError::Logger(format!("cannot build filter for '{level}': {e}")))
}

/// Accepts a single level name (`error` … `trace`, or `off`). Directive
/// syntax is reserved for `RUST_LOG`.
pub fn parse_level(level: &str) -> Result<LevelFilter, AppError> {
    if level.is_empty() {
        return Err(AppError::Logger("log level must not be empty".into()));
    }
    level
        .parse::<LevelFilter>()
        .map_err(|_| AppError::Logger(format!("unrecognised log level: '{level}'")))
}
