#![allow(non_snake_case)]

use super::*;
use crate::types::ScalarKind;

fn f64_ty() -> SemanticType {
    SemanticType::Scalar(ScalarKind::F64)
}

fn solver_ir() -> SchemaIr {
    let input = StructSchema::new("InputData")
        .with_field(FieldSchema::new("name", SemanticType::Scalar(ScalarKind::Text)))
        .with_field(FieldSchema::new("value", f64_ty()))
        .with_field(FieldSchema::new("numbers", SemanticType::array_of(f64_ty())));
    let output = StructSchema::new("OutputData")
        .with_field(FieldSchema::new("greeting", SemanticType::Scalar(ScalarKind::Text)));

    let process = ExportSchema::method("Solver", "process")
        .with_param("input", SemanticType::Struct("InputData".into()))
        .returning(SemanticType::Struct("OutputData".into()));
    let heavy = ExportSchema::method("Solver", "heavy")
        .with_param("input", SemanticType::Struct("InputData".into()))
        .returning(SemanticType::Struct("OutputData".into()))
        .asynchronous();
    let version = ExportSchema::function("version").returning(SemanticType::Scalar(ScalarKind::Text));
    let reset = ExportSchema::method("Cache", "reset");

    SchemaIr::new(vec![input, output], vec![process, version, heavy, reset])
}

#[test]
fn FieldSchema___new___derives_is_array_once() {
    let array = FieldSchema::new("numbers", SemanticType::array_of(f64_ty()));
    let scalar = FieldSchema::new("value", f64_ty());

    assert!(array.is_array);
    assert!(!scalar.is_array);
}

#[test]
fn ExportSchema___method___computes_boundary_name() {
    let export = ExportSchema::method("Solver", "process");

    assert_eq!(export.name, "Solver_process");
    assert_eq!(export.owning_class.as_deref(), Some("Solver"));
    assert!(export.is_static);
}

#[test]
fn ExportSchema___function___keeps_bare_name() {
    let export = ExportSchema::function("version");

    assert_eq!(export.name, "version");
    assert!(export.owning_class.is_none());
}

#[test]
fn ExportSchema___with_param___first_param_drives_param_type() {
    let export = ExportSchema::method("Solver", "process")
        .with_param("a", SemanticType::Struct("A".into()))
        .with_param("b", SemanticType::Struct("B".into()));

    assert_eq!(export.param_type, Some(SemanticType::Struct("A".into())));
    assert_eq!(export.parameters.len(), 2);
    assert_eq!(export.param_name(), "a");
}

#[test]
fn ExportSchema___param_name___defaults_when_no_parameters() {
    assert_eq!(ExportSchema::method("Cache", "reset").param_name(), "param");
}

#[test]
fn SchemaIr___exports_by_owner___groups_in_first_appearance_order() {
    let ir = solver_ir();

    let groups = ir.exports_by_owner();

    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].0, Some("Solver"));
    assert_eq!(groups[0].1.len(), 2);
    assert_eq!(groups[1].0, None);
    assert_eq!(groups[2].0, Some("Cache"));
}

#[test]
fn SchemaIr___lookups___find_by_name() {
    let ir = solver_ir();

    assert!(ir.struct_by_name("InputData").is_some());
    assert!(ir.struct_by_name("Missing").is_none());
    assert!(ir.export_by_name("Solver_heavy").unwrap().is_async);
    assert!(ir.has_async_exports());
}

#[test]
fn SchemaIr___json___roundtrips() {
    let ir = solver_ir();

    let json = ir.to_json_pretty().unwrap();
    let back = SchemaIr::from_json(&json).unwrap();

    assert_eq!(back, ir);
}

#[test]
fn SchemaIr___from_json___accepts_minimal_export() {
    let json = r#"{
        "exports": [{ "name": "ping", "method_name": "ping" }]
    }"#;

    let ir = SchemaIr::from_json(json).unwrap();

    assert!(ir.structs.is_empty());
    assert!(ir.exports[0].return_type.is_none());
    assert!(!ir.exports[0].is_async);
}

#[test]
fn StructSchema___struct_dependencies___looks_through_arrays() {
    let schema = StructSchema::new("Outer")
        .with_field(FieldSchema::new("one", SemanticType::Struct("A".into())))
        .with_field(FieldSchema::new("many", SemanticType::array_of(SemanticType::Struct("B".into()))))
        .with_field(FieldSchema::new("n", f64_ty()));

    let deps: Vec<_> = schema.struct_dependencies().collect();

    assert_eq!(deps, vec!["A", "B"]);
}

#[test]
fn StructSchema___value_dependencies___skips_array_elements() {
    let schema = StructSchema::new("Outer")
        .with_field(FieldSchema::new("one", SemanticType::Struct("A".into())))
        .with_field(FieldSchema::new("many", SemanticType::array_of(SemanticType::Struct("B".into()))));

    let deps: Vec<_> = schema.value_dependencies().collect();

    assert_eq!(deps, vec!["A"]);
}
