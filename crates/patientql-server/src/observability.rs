//! Process-wide tracing subscriber.
//!
//! The filter sits behind a reload layer so the level from `[logging]` can
//! be applied after the config file is read. `RUST_LOG`, when set, wins
//! over both the startup default and the configured level.

use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

type FilterHandle = reload::Handle<EnvFilter, Registry>;

static FILTER: OnceLock<FilterHandle> = OnceLock::new();

fn rust_log_filter() -> Option<EnvFilter> {
    std::env::var_os(EnvFilter::DEFAULT_ENV)?;
    EnvFilter::try_from_default_env().ok()
}

pub fn init_tracing() {
    init_tracing_with_level("info");
}

/// Installs the subscriber. Later calls are no-ops.
pub fn init_tracing_with_level(level: &str) {
    let filter = rust_log_filter().unwrap_or_else(|| EnvFilter::new(level));
    let (filter_layer, handle) = reload::Layer::new(filter);
    if FILTER.set(handle).is_err() {
        return;
    }

    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_target(true))
        .try_init();
}

/// Swaps the active filter for `level` unless `RUST_LOG` is set.
pub fn apply_logging_level(level: &str) {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return;
    }
    match FILTER.get() {
        Some(handle) => {
            if let Err(e) = handle.reload(EnvFilter::new(level)) {
                eprintln!("Failed to apply logging level '{level}': {e}");
            }
        }
        None => init_tracing_with_level(level),
    }
}
