//! napigen-emit - Renderers turning the schema IR into addon sources
//!
//! One [`Emitter`] produces six files:
//! - value struct header and source with `FromNapi` / `ToNapi` marshallers
//! - the N-API bridge header and source, including async workers
//! - a typed TypeScript facade
//! - an implementation stub, created once and then owned by the user
//!
//! [`OutputWriter`] replaces machine-owned files atomically and never
//! overwrites an existing hand-editable file.

mod bridge;
mod code_writer;
mod emitter;
mod error;
mod facade;
mod output;
mod structs;
mod stub;

pub use bridge::BridgeRenderer;
pub use code_writer::{CodeWriter, IndentGuard};
pub use emitter::Emitter;
pub use error::{EmitError, EmitResult};
pub use facade::FacadeRenderer;
pub use output::{GeneratedFile, OutputWriter, Ownership, WriteReport};
pub use structs::{StructRenderer, dependency_order};
pub use stub::StubRenderer;

/// First line of every machine-owned C++ file
pub const GENERATED_BANNER: &str = "// Auto-generated by napigen. Do not edit.";

pub(crate) const INDENT: &str = "    ";
