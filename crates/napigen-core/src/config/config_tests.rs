#![allow(non_snake_case)]

use super::*;
use std::io::Write;

#[test]
fn GeneratorConfig___default___uses_conventional_names() {
    let config = GeneratorConfig::default();

    assert_eq!(config.output.structs_header, "generated_structs.hpp");
    assert_eq!(config.output.api_source, "generated_api.cpp");
    assert_eq!(config.output.facade, "index.ts");
    assert_eq!(config.output.stub, "implementation.cpp");
    assert_eq!(config.output.module_name, "addon");
    assert_eq!(config.markers.struct_markers, vec!["Struct"]);
}

#[test]
fn GeneratorConfig___from_toml_str___empty_yields_defaults() {
    let config = GeneratorConfig::from_toml_str("").unwrap();

    assert_eq!(config, GeneratorConfig::default());
}

#[test]
fn GeneratorConfig___from_toml_str___partial_tables_keep_defaults() {
    let toml = r#"
[markers]
struct = ["Struct", "Record"]

[output]
module_name = "solver"
"#;

    let config = GeneratorConfig::from_toml_str(toml).unwrap();

    assert!(config.markers.is_struct("Record"));
    assert!(config.markers.is_export("Export"));
    assert_eq!(config.output.module_name, "solver");
    assert_eq!(config.output.facade, "index.ts");
}

#[test]
fn GeneratorConfig___from_toml_str___malformed_returns_config_parse() {
    let result = GeneratorConfig::from_toml_str("[markers\nstruct = 1");

    assert!(matches!(result, Err(CoreError::ConfigParse(_))));
}

#[test]
fn GeneratorConfig___validate___rejects_duplicate_file_names() {
    let mut config = GeneratorConfig::default();
    config.output.stub = config.output.api_source.clone();

    let result = config.validate();

    assert!(matches!(result, Err(CoreError::InvalidConfig(_))));
}

#[test]
fn GeneratorConfig___validate___rejects_overlapping_export_markers() {
    let mut config = GeneratorConfig::default();
    config.markers.async_export.push("Export".to_string());

    let err = config.validate().unwrap_err();

    assert!(err.to_string().contains("both an export and an async_export"));
}

#[test]
fn GeneratorConfig___validate___rejects_empty_marker_list() {
    let mut config = GeneratorConfig::default();
    config.markers.export.clear();

    assert!(config.validate().is_err());
}

#[test]
fn GeneratorConfig___from_file___reads_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[output]\naddon_path = \"./native/solver.node\"").unwrap();

    let config = GeneratorConfig::from_file(file.path()).unwrap();

    assert_eq!(config.output.addon_path, "./native/solver.node");
}

#[test]
fn GeneratorConfig___from_file___missing_returns_io() {
    let dir = tempfile::tempdir().unwrap();

    let result = GeneratorConfig::from_file(&dir.path().join("absent.toml"));

    assert!(matches!(result, Err(CoreError::Io { .. })));
}

#[test]
fn GeneratorConfig___load_or_default___missing_default_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let config = GeneratorConfig::load_or_default(None, dir.path()).unwrap();

    assert_eq!(config, GeneratorConfig::default());
}

#[test]
fn GeneratorConfig___load_or_default___picks_up_file_in_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(DEFAULT_CONFIG_FILE),
        "[output]\nmodule_name = \"picked\"\n",
    )
    .unwrap();

    let config = GeneratorConfig::load_or_default(None, dir.path()).unwrap();

    assert_eq!(config.output.module_name, "picked");
}

#[test]
fn GeneratorConfig___load_or_default___explicit_path_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let explicit = dir.path().join("custom.toml");

    let result = GeneratorConfig::load_or_default(Some(&explicit), dir.path());

    assert!(result.is_err());
}
