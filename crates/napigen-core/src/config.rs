//! Generator configuration loaded from `napigen.toml`

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Name of the configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "napigen.toml";

/// Top-level generator configuration
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub markers: Markers,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Decorator names recognised by the front ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    /// Marks a class as a value struct
    #[serde(rename = "struct", default = "default_struct_markers")]
    pub struct_markers: Vec<String>,

    /// Marks a static method as a synchronous export
    #[serde(default = "default_export_markers")]
    pub export: Vec<String>,

    /// Marks a static method as an asynchronous export
    #[serde(default = "default_async_export_markers")]
    pub async_export: Vec<String>,
}

fn default_struct_markers() -> Vec<String> {
    vec!["Struct".to_string()]
}

fn default_export_markers() -> Vec<String> {
    vec!["Export".to_string()]
}

fn default_async_export_markers() -> Vec<String> {
    vec!["AsyncExport".to_string()]
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            struct_markers: default_struct_markers(),
            export: default_export_markers(),
            async_export: default_async_export_markers(),
        }
    }
}

impl Markers {
    pub fn is_struct(&self, decorator: &str) -> bool {
        self.struct_markers.iter().any(|m| m == decorator)
    }

    pub fn is_export(&self, decorator: &str) -> bool {
        self.export.iter().any(|m| m == decorator)
    }

    pub fn is_async_export(&self, decorator: &str) -> bool {
        self.async_export.iter().any(|m| m == decorator)
    }
}

/// Output file names and module settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_structs_header")]
    pub structs_header: String,

    #[serde(default = "default_structs_source")]
    pub structs_source: String,

    #[serde(default = "default_api_header")]
    pub api_header: String,

    #[serde(default = "default_api_source")]
    pub api_source: String,

    #[serde(default = "default_facade")]
    pub facade: String,

    /// Hand-editable; written only when absent
    #[serde(default = "default_stub")]
    pub stub: String,

    /// Name passed to `NODE_API_MODULE`
    #[serde(default = "default_module_name")]
    pub module_name: String,

    /// Path the facade loads the compiled addon from
    #[serde(default = "default_addon_path")]
    pub addon_path: String,

    /// Banner placed at the top of the facade
    #[serde(default = "default_facade_header")]
    pub facade_header: String,
}

fn default_structs_header() -> String {
    "generated_structs.hpp".to_string()
}

fn default_structs_source() -> String {
    "generated_structs.cpp".to_string()
}

fn default_api_header() -> String {
    "generated_api.h".to_string()
}

fn default_api_source() -> String {
    "generated_api.cpp".to_string()
}

fn default_facade() -> String {
    "index.ts".to_string()
}

fn default_stub() -> String {
    "implementation.cpp".to_string()
}

fn default_module_name() -> String {
    "addon".to_string()
}

fn default_addon_path() -> String {
    "./build/Release/addon.node".to_string()
}

fn default_facade_header() -> String {
    "// Auto-generated by napigen. Do not edit.".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            structs_header: default_structs_header(),
            structs_source: default_structs_source(),
            api_header: default_api_header(),
            api_source: default_api_source(),
            facade: default_facade(),
            stub: default_stub(),
            module_name: default_module_name(),
            addon_path: default_addon_path(),
            facade_header: default_facade_header(),
        }
    }
}

impl OutputConfig {
    /// All configured file names, machine-owned first
    pub fn file_names(&self) -> [&str; 6] {
        [
            self.structs_header.as_str(),
            self.structs_source.as_str(),
            self.api_header.as_str(),
            self.api_source.as_str(),
            self.facade.as_str(),
            self.stub.as_str(),
        ]
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        let config: GeneratorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file that must exist
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Load `explicit` if given, otherwise `dir/napigen.toml` if present,
    /// otherwise defaults
    pub fn load_or_default(explicit: Option<&Path>, dir: &Path) -> CoreResult<Self> {
        if let Some(path) = explicit {
            tracing::debug!("loading config from {}", path.display());
            return Self::from_file(path);
        }

        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!("loading config from {}", candidate.display());
            Self::from_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        let markers = [
            ("struct", &self.markers.struct_markers),
            ("export", &self.markers.export),
            ("async_export", &self.markers.async_export),
        ];
        for (kind, names) in markers {
            if names.is_empty() {
                return Err(CoreError::InvalidConfig(format!(
                    "markers.{kind} must name at least one decorator"
                )));
            }
            if let Some(bad) = names.iter().find(|n| !is_identifier(n)) {
                return Err(CoreError::InvalidConfig(format!(
                    "markers.{kind} contains invalid decorator name '{bad}'"
                )));
            }
        }

        let sync_async_overlap = self
            .markers
            .export
            .iter()
            .find(|m| self.markers.async_export.contains(m));
        if let Some(name) = sync_async_overlap {
            return Err(CoreError::InvalidConfig(format!(
                "'{name}' is both an export and an async_export marker"
            )));
        }

        if !is_identifier(&self.output.module_name) {
            return Err(CoreError::InvalidConfig(format!(
                "output.module_name '{}' is not a valid identifier",
                self.output.module_name
            )));
        }

        let mut seen = HashSet::new();
        for name in self.output.file_names() {
            if name.trim().is_empty() {
                return Err(CoreError::InvalidConfig(
                    "output file names cannot be empty".to_string(),
                ));
            }
            if !seen.insert(name) {
                return Err(CoreError::InvalidConfig(format!(
                    "output file name '{name}' is used twice"
                )));
            }
        }

        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;

#[cfg(test)]
#[path = "config/config_parameterized_tests.rs"]
mod config_parameterized_tests;
