//! File-backed logging.
//!
//! The TUI owns the terminal, so log output goes to a file under the cache
//! directory instead of stderr. Filter via `SPECDECK_LOG` (env-filter
//! syntax). Initialization failures are silently skipped: logging must never
//! keep the viewer from starting.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Environment variable controlling the log filter.
pub const LOG_FILTER_ENV: &str = "SPECDECK_LOG";

/// Default filter when the env var is unset.
const DEFAULT_FILTER: &str = "specdeck=info";

/// Initialize the global subscriber writing to
/// `<cache_dir>/specdeck/specdeck.log`.
pub fn init() {
    let Some(cache_dir) = dirs::cache_dir() else {
        return;
    };
    let log_dir = cache_dir.join("specdeck");
    if std::fs::create_dir_all(&log_dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::create(log_dir.join("specdeck.log")) else {
        return;
    };

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
}
