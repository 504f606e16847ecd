//! Unresolved declarations produced by the front ends.
//!
//! Types are still annotation text here; [`IrBuilder`](crate::IrBuilder)
//! resolves them against the full set of struct names.

use napigen_core::SourceLocation;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSchema {
    pub structs: Vec<RawStruct>,
    pub exports: Vec<RawExport>,
}

impl RawSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, other: RawSchema) {
        self.structs.extend(other.structs);
        self.exports.extend(other.exports);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStruct {
    pub name: String,
    pub fields: Vec<RawField>,
    pub docs: Vec<String>,
    pub location: Option<SourceLocation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    pub name: String,
    /// `None` when the field has no annotation
    pub type_text: Option<String>,
    /// Declared with `?`
    pub optional: bool,
    pub docs: Vec<String>,
    pub location: Option<SourceLocation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParam {
    pub name: String,
    pub type_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawExport {
    pub owning_class: Option<String>,
    pub method_name: String,
    pub is_static: bool,
    /// Carries a synchronous export marker
    pub sync_marker: bool,
    /// Carries an asynchronous export marker
    pub async_marker: bool,
    pub params: Vec<RawParam>,
    /// `None` when the method has no return annotation
    pub return_text: Option<String>,
    pub docs: Vec<String>,
    pub location: Option<SourceLocation>,
}

impl RawExport {
    /// Human-readable `Owner.method` used in diagnostics
    pub fn display_name(&self) -> String {
        match &self.owning_class {
            Some(owner) => format!("{owner}.{}", self.method_name),
            None => self.method_name.clone(),
        }
    }
}
