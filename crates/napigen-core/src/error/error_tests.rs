#![allow(non_snake_case)]

use super::*;

#[test]
fn CoreError___invalid_config___returns_code_3() {
    let err = CoreError::InvalidConfig("bad module name".into());

    assert_eq!(err.error_code(), 3);
}

#[test]
fn CoreError___invalid_config___displays_correctly() {
    let err = CoreError::InvalidConfig("bad module name".into());

    assert_eq!(err.to_string(), "invalid configuration: bad module name");
}

#[test]
fn CoreError___io___displays_path() {
    let err = CoreError::io(
        "missing/napigen.toml",
        std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
    );

    let display = err.to_string();

    assert!(display.starts_with("failed to read missing/napigen.toml"));
    assert_eq!(err.error_code(), 1);
}

#[test]
fn CoreError___from_serde_json___converts_to_json() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid").unwrap_err();

    let err: CoreError = json_err.into();

    assert!(matches!(err, CoreError::Json(_)));
    assert_eq!(err.error_code(), 4);
}

#[test]
fn CoreError___from_toml___converts_to_config_parse() {
    let toml_err = toml::from_str::<toml::Value>("= nope").unwrap_err();

    let err: CoreError = toml_err.into();

    assert!(matches!(err, CoreError::ConfigParse(_)));
    assert_eq!(err.error_code(), 2);
}
