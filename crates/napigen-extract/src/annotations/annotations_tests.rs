#![allow(non_snake_case)]

use super::*;
use napigen_core::{DiagnosticCode, ScalarKind, SemanticType};
use test_case::test_case;

const SOLVER_METADATA: &str = r#"{
  "structs": [
    { "className": "InputData",
      "fields": [
        { "name": "name", "designType": "String" },
        { "name": "value", "designType": "Number" },
        { "name": "numbers", "designType": "Array", "elementType": "Number" }
      ] },
    { "className": "OutputData",
      "fields": [
        { "name": "greeting", "designType": "String" },
        { "name": "doubled", "designType": "Number" },
        { "name": "squared", "designType": "Array", "elementType": "Number" }
      ] }
  ],
  "exports": [
    { "className": "Solver", "methodName": "process", "isStatic": true,
      "paramTypes": ["InputData"], "paramNames": ["input"], "returnType": "OutputData" },
    { "className": "Solver", "methodName": "heavy", "marker": "AsyncExport",
      "paramTypes": ["InputData"], "returnType": "Promise", "returnElementType": "OutputData" }
  ]
}"#;

fn solver() -> Extraction {
    let metadata = LiveMetadata::from_json(SOLVER_METADATA).unwrap();
    parse_from_live_annotations(&metadata, &Markers::default())
}

#[test]
fn parse_from_live_annotations___solver_scenario___matches_source_shape() {
    let extraction = solver();

    assert!(extraction.diagnostics.is_empty(), "{:?}", extraction.diagnostics);
    let input = &extraction.ir.structs[0];
    assert_eq!(input.name, "InputData");
    assert_eq!(input.fields[1].ty, SemanticType::Scalar(ScalarKind::F64));
    assert_eq!(
        input.fields[2].ty,
        SemanticType::array_of(SemanticType::Scalar(ScalarKind::F64))
    );
    assert!(input.fields[2].is_array);
}

#[test]
fn parse_from_live_annotations___exports___marker_drives_async() {
    let extraction = solver();

    let exports = &extraction.ir.exports;
    assert_eq!(exports[0].name, "Solver_process");
    assert_eq!(exports[0].param_name(), "input");
    assert!(!exports[0].is_async);
    assert!(exports[1].is_async);
    assert_eq!(exports[1].param_name(), "param");
    assert_eq!(
        exports[1].return_type,
        Some(SemanticType::Struct("OutputData".into()))
    );
}

#[test]
fn parse_from_live_annotations___array_without_element___unresolved_warning() {
    let metadata = LiveMetadata::from_json(
        r#"{ "structs": [{ "className": "A", "fields": [{ "name": "xs", "designType": "Array" }] }] }"#,
    )
    .unwrap();

    let extraction = parse_from_live_annotations(&metadata, &Markers::default());

    let codes: Vec<_> = extraction.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![DiagnosticCode::UnresolvedType]);
    assert!(!extraction.has_errors());
}

#[test]
fn parse_from_live_annotations___missing_design_type___untyped_error() {
    let metadata = LiveMetadata::from_json(
        r#"{ "structs": [{ "className": "A", "fields": [{ "name": "x" }] }] }"#,
    )
    .unwrap();

    let extraction = parse_from_live_annotations(&metadata, &Markers::default());

    assert!(extraction.has_errors());
    assert_eq!(
        extraction.diagnostics.iter().next().unwrap().code,
        DiagnosticCode::UntypedField
    );
}

#[test]
fn parse_from_live_annotations___foreign_marker___skipped() {
    let metadata = LiveMetadata::from_json(
        r#"{
          "structs": [{ "className": "A", "marker": "Entity", "fields": [] }],
          "exports": [{ "className": "S", "methodName": "m", "marker": "Get", "returnType": "Number" }]
        }"#,
    )
    .unwrap();

    let extraction = parse_from_live_annotations(&metadata, &Markers::default());

    assert!(extraction.ir.structs.is_empty());
    assert!(extraction.ir.exports.is_empty());
}

#[test]
fn parse_from_live_annotations___free_function___keeps_bare_name() {
    let metadata = LiveMetadata::from_json(
        r#"{ "exports": [{ "methodName": "version", "returnType": "String" }] }"#,
    )
    .unwrap();

    let extraction = parse_from_live_annotations(&metadata, &Markers::default());

    let export = &extraction.ir.exports[0];
    assert_eq!(export.name, "version");
    assert!(export.owning_class.is_none());
    assert!(export.param_type.is_none());
}

#[test]
fn LiveMetadata___from_json___invalid_is_metadata_error() {
    let result = LiveMetadata::from_json("{ \"structs\": 5 }");

    assert!(matches!(result, Err(ExtractError::Metadata(_))));
}

#[test_case("String", None, "string" ; "string")]
#[test_case("Number", None, "number" ; "number")]
#[test_case("Boolean", None, "boolean" ; "boolean")]
#[test_case("Array", Some("String"), "string[]" ; "array of string")]
#[test_case("Array", Some("InputData"), "InputData[]" ; "array of struct")]
#[test_case("Array", None, "Array" ; "array without element")]
#[test_case("undefined", None, "void" ; "undefined return")]
#[test_case("InputData", None, "InputData" ; "class name")]
fn type_text___maps_constructor_names(design: &str, element: Option<&str>, expected: &str) {
    assert_eq!(type_text(design, element), expected);
}
