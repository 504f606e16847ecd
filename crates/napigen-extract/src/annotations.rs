//! Runtime-reflection front end.
//!
//! When decorators run at program start they can record what
//! `reflect-metadata` reports (`design:type`, `design:paramtypes`,
//! `design:returntype`) and dump it as JSON. Reflection only yields
//! constructor names (`String`, `Number`, `Boolean`, `Array`, class names),
//! so array element types must be recorded explicitly by the decorator.
//!
//! ```json
//! {
//!   "structs": [
//!     { "className": "InputData",
//!       "fields": [
//!         { "name": "name", "designType": "String" },
//!         { "name": "numbers", "designType": "Array", "elementType": "Number" }
//!       ] }
//!   ],
//!   "exports": [
//!     { "className": "Solver", "methodName": "process", "isStatic": true,
//!       "paramTypes": ["InputData"], "returnType": "OutputData" }
//!   ]
//! }
//! ```

use crate::builder::{Extraction, IrBuilder};
use crate::error::{ExtractError, ExtractResult};
use crate::raw::{RawExport, RawField, RawParam, RawSchema, RawStruct};
use napigen_core::Markers;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Metadata captured from live decorators
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMetadata {
    #[serde(default)]
    pub structs: Vec<LiveStruct>,

    #[serde(default)]
    pub exports: Vec<LiveExport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveStruct {
    pub class_name: String,

    /// Decorator that registered the class, when recorded
    #[serde(default)]
    pub marker: Option<String>,

    #[serde(default)]
    pub fields: Vec<LiveField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveField {
    pub name: String,

    /// Constructor name from `design:type`; absent when none was emitted
    #[serde(default)]
    pub design_type: Option<String>,

    #[serde(default)]
    pub element_type: Option<String>,

    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveExport {
    #[serde(default)]
    pub class_name: Option<String>,

    pub method_name: String,

    #[serde(default = "default_true")]
    pub is_static: bool,

    /// Used when `marker` is absent
    #[serde(default)]
    pub is_async: bool,

    #[serde(default)]
    pub marker: Option<String>,

    #[serde(default)]
    pub param_types: Vec<String>,

    #[serde(default)]
    pub param_names: Vec<String>,

    #[serde(default)]
    pub param_element_types: Vec<Option<String>>,

    #[serde(default)]
    pub return_type: Option<String>,

    #[serde(default)]
    pub return_element_type: Option<String>,
}

fn default_true() -> bool {
    true
}

impl LiveMetadata {
    pub fn from_json(json: &str) -> ExtractResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> ExtractResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// Build the IR from captured decorator metadata.
///
/// Records carrying an explicit `marker` that is not one of `markers` are
/// skipped.
pub fn parse_from_live_annotations(metadata: &LiveMetadata, markers: &Markers) -> Extraction {
    let mut raw = RawSchema::new();

    for record in &metadata.structs {
        if let Some(marker) = &record.marker
            && !markers.is_struct(marker)
        {
            tracing::debug!(
                "skipping {}: marker '{}' is not a struct marker",
                record.class_name,
                marker
            );
            continue;
        }
        raw.structs.push(RawStruct {
            name: record.class_name.clone(),
            fields: record.fields.iter().map(live_field).collect(),
            docs: Vec::new(),
            location: None,
        });
    }

    for record in &metadata.exports {
        let (sync_marker, async_marker) = match &record.marker {
            Some(marker) => (markers.is_export(marker), markers.is_async_export(marker)),
            None => (!record.is_async, record.is_async),
        };
        if !sync_marker && !async_marker {
            tracing::debug!("skipping {}: not an export marker", record.method_name);
            continue;
        }
        raw.exports.push(live_export(record, sync_marker, async_marker));
    }

    IrBuilder::new().build(raw)
}

fn live_field(field: &LiveField) -> RawField {
    RawField {
        name: field.name.clone(),
        type_text: field
            .design_type
            .as_deref()
            .map(|design| type_text(design, field.element_type.as_deref())),
        optional: field.optional,
        docs: Vec::new(),
        location: None,
    }
}

fn live_export(record: &LiveExport, sync_marker: bool, async_marker: bool) -> RawExport {
    let params = record
        .param_types
        .iter()
        .enumerate()
        .map(|(i, design)| {
            let element = record.param_element_types.get(i).cloned().flatten();
            RawParam {
                name: record
                    .param_names
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| "param".to_string()),
                type_text: Some(type_text(design, element.as_deref())),
            }
        })
        .collect();

    let return_text = record.return_type.as_deref().map(|design| match design {
        "Promise" => match record.return_element_type.as_deref() {
            Some(element) => format!("Promise<{}>", type_text(element, None)),
            None => design.to_string(),
        },
        _ => type_text(design, record.return_element_type.as_deref()),
    });

    RawExport {
        owning_class: record.class_name.clone(),
        method_name: record.method_name.clone(),
        is_static: record.is_static,
        sync_marker,
        async_marker,
        params,
        return_text,
        docs: Vec::new(),
        location: None,
    }
}

/// Map a reflected constructor name onto annotation text
fn type_text(design: &str, element: Option<&str>) -> String {
    match design {
        "String" => "string".to_string(),
        "Number" => "number".to_string(),
        "Boolean" => "boolean".to_string(),
        "Array" => match element {
            Some(element) => format!("{}[]", type_text(element, None)),
            None => "Array".to_string(),
        },
        "undefined" | "void" => "void".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "annotations/annotations_tests.rs"]
mod annotations_tests;
