#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case("addon", true ; "plain")]
#[test_case("_private", true ; "leading underscore")]
#[test_case("solver2", true ; "trailing digit")]
#[test_case("2solver", false ; "leading digit")]
#[test_case("my-addon", false ; "hyphen")]
#[test_case("", false ; "empty")]
fn GeneratorConfig___validate___module_name(name: &str, valid: bool) {
    let mut config = GeneratorConfig::default();
    config.output.module_name = name.to_string();

    assert_eq!(config.validate().is_ok(), valid);
}

#[test_case("Struct", true, false, false ; "struct marker")]
#[test_case("Export", false, true, false ; "export marker")]
#[test_case("AsyncExport", false, false, true ; "async marker")]
#[test_case("Injectable", false, false, false ; "unrelated decorator")]
fn Markers___default___classifies(name: &str, is_struct: bool, is_export: bool, is_async: bool) {
    let markers = Markers::default();

    assert_eq!(markers.is_struct(name), is_struct);
    assert_eq!(markers.is_export(name), is_export);
    assert_eq!(markers.is_async_export(name), is_async);
}
