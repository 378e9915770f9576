//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Output goes to stderr in compact single-line form without timestamps,
//! which keeps SLURM job logs diffable across runs. `RUST_LOG` overrides
//! the level derived from CLI flags when no explicit flag was given.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level derived from CLI flags.
    pub level_filter: LevelFilter,
    /// When true, `RUST_LOG` takes precedence over `level_filter`.
    pub use_env_filter: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// # Panics
///
/// Panics if called more than once.
pub fn init_logging(config: &LogConfig) {
    let filter = if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(config.level_filter))
    } else {
        level_filter(config.level_filter)
    };
    let layer = fmt::layer().compact().with_target(false).without_time();
    tracing_subscriber::registry().with(filter).with(layer).init();
}

fn level_filter(level: LevelFilter) -> EnvFilter {
    let level = level.to_string().to_lowercase();
    EnvFilter::new(format!(
        "{level},cgmf_cli={level},cgmf_codec={level},cgmf_generate={level},cgmf_model={level}"
    ))
}
