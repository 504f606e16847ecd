//! napigen-runtime - In-process reference bridge for napigen schemas
//!
//! This crate provides:
//! - [`Marshaller`] converting boundary values to native storage and back
//!   with the same rules as the emitted `FromNapi` / `ToNapi`
//! - [`ReferenceBridge`] dispatching sync calls and scheduling async calls
//!   whose [`Completion`] settles exactly once
//! - [`AsyncRuntime`] owning the worker pool async exports run on

mod bridge;
mod error;
mod marshal;
mod runtime;

pub use bridge::{Completion, HandlerResult, ReferenceBridge};
pub use error::{BridgeError, BridgeResult};
pub use marshal::{Marshaller, NativeValue, StructValue, narrow};
pub use runtime::{AsyncRuntime, RuntimeConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AsyncRuntime, BridgeError, Completion, HandlerResult, NativeValue, ReferenceBridge,
        StructValue,
    };
}
