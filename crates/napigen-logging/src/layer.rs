//! Subscriber assembly

use crate::reload::ReloadHandle;
use napigen_core::LogLevel;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::reload;

/// Convert LogLevel to tracing LevelFilter
pub fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}

/// Install the global subscriber.
///
/// Events are written to stderr so generated output on stdout stays clean.
/// When `RUST_LOG` is set it decides what is shown and `level` only seeds
/// the reloadable filter. Calling this twice keeps the first subscriber.
pub fn init_logging(level: LogLevel) -> &'static ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().ok();
    let initial = if env_filter.is_some() {
        LevelFilter::TRACE
    } else {
        level_filter(level)
    };
    let (filter, handle) = reload::Layer::new(initial);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(env_filter)
        .with(fmt_layer);

    let reload_handle = ReloadHandle::global();
    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        reload_handle.set_handle(handle);
    }
    reload_handle
}

#[cfg(test)]
#[path = "layer/layer_tests.rs"]
mod layer_tests;
