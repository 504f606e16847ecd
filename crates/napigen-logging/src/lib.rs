//! napigen-logging - Tracing setup for the napigen tools
//!
//! This crate provides:
//! - [`init_logging`] installing a stderr fmt subscriber
//! - [`ReloadHandle`] for changing the level after initialization
//!
//! `RUST_LOG` takes precedence over the level passed to [`init_logging`].

mod layer;
mod reload;

pub use layer::{init_logging, level_filter};
pub use napigen_core::LogLevel;
pub use reload::ReloadHandle;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, ReloadHandle, init_logging};
}
