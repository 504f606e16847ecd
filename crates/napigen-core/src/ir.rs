//! Intermediate representation shared by both front ends and all renderers.
//!
//! The IR is built once per generation run and consumed read-only. It is
//! plain data: serializable to JSON, owning no external resources.
//!
//! # Structure
//!
//! - [`SchemaIr`]: every value struct and every export of one run
//! - [`StructSchema`] / [`FieldSchema`]: a value struct and its fields
//! - [`ExportSchema`] / [`ParameterSchema`]: an operation callable across the boundary
//!
//! # Examples
//!
//! ```
//! use napigen_core::{ExportSchema, FieldSchema, ScalarKind, SchemaIr, SemanticType, StructSchema};
//!
//! let input = StructSchema::new("InputData")
//!     .with_field(FieldSchema::new("name", SemanticType::Scalar(ScalarKind::Text)));
//! let export = ExportSchema::method("Solver", "process")
//!     .with_param("input", SemanticType::Struct("InputData".into()))
//!     .returning(SemanticType::Struct("InputData".into()));
//!
//! let ir = SchemaIr::new(vec![input], vec![export]);
//! assert_eq!(ir.exports[0].name, "Solver_process");
//! ```

use crate::types::SemanticType;
use serde::{Deserialize, Serialize};

/// A field of a value struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: SemanticType,

    /// Derived once from `ty` at construction
    pub is_array: bool,

    #[serde(default)]
    pub is_optional: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, ty: SemanticType) -> Self {
        let is_array = ty.is_array();
        Self {
            name: name.into(),
            ty,
            is_array,
            is_optional: false,
            docs: Vec::new(),
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.is_optional = optional;
        self
    }

    pub fn with_docs(mut self, docs: Vec<String>) -> Self {
        self.docs = docs;
        self
    }
}

/// A value struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructSchema {
    pub name: String,

    pub fields: Vec<FieldSchema>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
}

impl StructSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            docs: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_docs(mut self, docs: Vec<String>) -> Self {
        self.docs = docs;
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of the structs this struct refers to, in field order
    pub fn struct_dependencies(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(|f| f.ty.struct_name())
    }

    /// Structs held by value, which must be complete before this one.
    ///
    /// Array elements are excluded; a forward declaration is enough for them.
    pub fn value_dependencies(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(|f| match &f.ty {
            SemanticType::Struct(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

/// A declared parameter of an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSchema {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: SemanticType,
}

/// An operation exposed across the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSchema {
    /// Boundary entry point: `Owner_method`, or the bare name of a free function
    pub name: String,

    #[serde(default)]
    pub owning_class: Option<String>,

    pub method_name: String,

    #[serde(default)]
    pub is_static: bool,

    #[serde(default)]
    pub is_async: bool,

    /// Type of the single input, `None` when the export takes no argument
    #[serde(default)]
    pub param_type: Option<SemanticType>,

    /// Result type, `None` for `void`
    #[serde(default)]
    pub return_type: Option<SemanticType>,

    #[serde(default)]
    pub parameters: Vec<ParameterSchema>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
}

impl ExportSchema {
    /// Compute the boundary entry point name
    pub fn boundary_name(owning_class: Option<&str>, method_name: &str) -> String {
        match owning_class {
            Some(owner) => format!("{owner}_{method_name}"),
            None => method_name.to_string(),
        }
    }

    /// A static method of `owner`
    pub fn method(owner: impl Into<String>, method_name: impl Into<String>) -> Self {
        let owner = owner.into();
        let method_name = method_name.into();
        Self {
            name: Self::boundary_name(Some(&owner), &method_name),
            owning_class: Some(owner),
            method_name,
            is_static: true,
            is_async: false,
            param_type: None,
            return_type: None,
            parameters: Vec::new(),
            docs: Vec::new(),
        }
    }

    /// A free function
    pub fn function(name: impl Into<String>) -> Self {
        let method_name = name.into();
        Self {
            name: method_name.clone(),
            owning_class: None,
            method_name,
            is_static: false,
            is_async: false,
            param_type: None,
            return_type: None,
            parameters: Vec::new(),
            docs: Vec::new(),
        }
    }

    /// Append a parameter; the first one becomes `param_type`
    pub fn with_param(mut self, name: impl Into<String>, ty: SemanticType) -> Self {
        if self.parameters.is_empty() {
            self.param_type = Some(ty.clone());
        }
        self.parameters.push(ParameterSchema {
            name: name.into(),
            ty,
        });
        self
    }

    pub fn returning(mut self, ty: SemanticType) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn with_docs(mut self, docs: Vec<String>) -> Self {
        self.docs = docs;
        self
    }

    /// Name of the input parameter, defaulting to `param`
    pub fn param_name(&self) -> &str {
        self.parameters
            .first()
            .map(|p| p.name.as_str())
            .unwrap_or("param")
    }
}

/// Everything extracted in one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaIr {
    #[serde(default)]
    pub structs: Vec<StructSchema>,

    #[serde(default)]
    pub exports: Vec<ExportSchema>,
}

impl SchemaIr {
    pub fn new(structs: Vec<StructSchema>, exports: Vec<ExportSchema>) -> Self {
        Self { structs, exports }
    }

    pub fn struct_by_name(&self, name: &str) -> Option<&StructSchema> {
        self.structs.iter().find(|s| s.name == name)
    }

    pub fn export_by_name(&self, name: &str) -> Option<&ExportSchema> {
        self.exports.iter().find(|e| e.name == name)
    }

    /// Exports grouped by owning class, in order of first appearance.
    ///
    /// Free functions are grouped under `None`.
    pub fn exports_by_owner(&self) -> Vec<(Option<&str>, Vec<&ExportSchema>)> {
        let mut groups: Vec<(Option<&str>, Vec<&ExportSchema>)> = Vec::new();
        for export in &self.exports {
            let owner = export.owning_class.as_deref();
            match groups.iter_mut().find(|(o, _)| *o == owner) {
                Some((_, members)) => members.push(export),
                None => groups.push((owner, vec![export])),
            }
        }
        groups
    }

    pub fn has_async_exports(&self) -> bool {
        self.exports.iter().any(|e| e.is_async)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
#[path = "ir/ir_tests.rs"]
mod ir_tests;
