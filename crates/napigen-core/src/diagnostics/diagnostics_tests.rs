#![allow(non_snake_case)]

use super::*;

#[test]
fn DiagnosticCode___severity___fallbacks_are_warnings() {
    assert_eq!(DiagnosticCode::UnresolvedType.severity(), Severity::Warning);
    assert_eq!(DiagnosticCode::ReservedIdentifier.severity(), Severity::Warning);
    assert_eq!(DiagnosticCode::EmissionConflict.severity(), Severity::Warning);
}

#[test]
fn DiagnosticCode___severity___unemittable_input_is_error() {
    assert_eq!(DiagnosticCode::UntypedField.severity(), Severity::Error);
    assert_eq!(DiagnosticCode::InvalidIdentifier.severity(), Severity::Error);
}

#[test]
fn Diagnostic___display___includes_location_and_code() {
    let diagnostic = Diagnostic::new(DiagnosticCode::UntypedField, "field 'x' has no type")
        .at(Some(SourceLocation::new("solver.ts", 4, 5)));

    assert_eq!(
        diagnostic.to_string(),
        "solver.ts:4:5: error[untyped-field]: field 'x' has no type"
    );
}

#[test]
fn Diagnostic___display___without_location() {
    let diagnostic = Diagnostic::new(DiagnosticCode::UnresolvedType, "unknown type 'Widget'");

    assert_eq!(
        diagnostic.to_string(),
        "warning[unresolved-type]: unknown type 'Widget'"
    );
}

#[test]
fn Diagnostics___has_errors___false_for_warnings_only() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.push(Diagnostic::new(DiagnosticCode::ReservedIdentifier, "renamed"));

    assert!(!diagnostics.has_errors());
    assert_eq!(diagnostics.error_count(), 0);
}

#[test]
fn Diagnostics___has_errors___true_when_any_error() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.push(Diagnostic::new(DiagnosticCode::ReservedIdentifier, "renamed"));
    diagnostics.push(Diagnostic::new(DiagnosticCode::DuplicateStruct, "twice"));

    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.len(), 2);
}

#[test]
fn Diagnostics___with_code___filters() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.push(Diagnostic::new(DiagnosticCode::UnresolvedType, "a"));
    diagnostics.push(Diagnostic::new(DiagnosticCode::UntypedField, "b"));
    diagnostics.push(Diagnostic::new(DiagnosticCode::UnresolvedType, "c"));

    let messages: Vec<_> = diagnostics
        .with_code(DiagnosticCode::UnresolvedType)
        .map(|d| d.message.as_str())
        .collect();

    assert_eq!(messages, vec!["a", "c"]);
}

#[test]
fn Diagnostics___serde___is_a_plain_array() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.push(Diagnostic::new(DiagnosticCode::DuplicateField, "dup"));

    let json = serde_json::to_value(&diagnostics).unwrap();

    assert!(json.is_array());
    assert_eq!(json[0]["code"], "duplicate_field");
    assert_eq!(json[0]["severity"], "error");
}
