//! napigen-extract - Front ends producing the napigen schema IR
//!
//! Two front ends share one [`IrBuilder`]:
//! - [`parse_from_source`] reads decorated TypeScript with tree-sitter
//! - [`parse_from_live_annotations`] reads metadata captured by running
//!   decorators
//!
//! Both return an [`Extraction`] holding the IR and every diagnostic raised
//! while building it.

mod annotations;
mod builder;
mod error;
mod raw;
mod source;

pub use annotations::{LiveExport, LiveField, LiveMetadata, LiveStruct, parse_from_live_annotations};
pub use builder::{Extraction, IrBuilder};
pub use error::{ExtractError, ExtractResult};
pub use raw::{RawExport, RawField, RawParam, RawSchema, RawStruct};
pub use source::{SourceFile, parse_from_source};
