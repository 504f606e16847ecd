//! Diagnostics reported alongside the IR and the generated file set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a diagnostic is. Any `Error` aborts generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Machine-readable kind of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    /// Field declared without a type annotation
    UntypedField,
    /// Type annotation outside the closed type set, kept verbatim
    UnresolvedType,
    /// Identifier collides with a C++ keyword and was renamed
    ReservedIdentifier,
    /// Name cannot be spelled as a C++ identifier
    InvalidIdentifier,
    /// Two structs share a name
    DuplicateStruct,
    /// Two fields of one struct share a name
    DuplicateField,
    /// Two exports share a boundary name
    DuplicateExport,
    /// Export method declares more than one parameter
    MultipleParameters,
    /// Method carries both the sync and the async export marker
    ConflictingMarkers,
    /// Export marker on an instance method
    NonStaticExport,
    /// Export method has no return type annotation
    MissingReturnType,
    /// Hand-editable output already exists and was left untouched
    EmissionConflict,
}

impl DiagnosticCode {
    /// Default severity for this kind
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticCode::UnresolvedType
            | DiagnosticCode::ReservedIdentifier
            | DiagnosticCode::EmissionConflict => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::UntypedField => "untyped-field",
            DiagnosticCode::UnresolvedType => "unresolved-type",
            DiagnosticCode::ReservedIdentifier => "reserved-identifier",
            DiagnosticCode::InvalidIdentifier => "invalid-identifier",
            DiagnosticCode::DuplicateStruct => "duplicate-struct",
            DiagnosticCode::DuplicateField => "duplicate-field",
            DiagnosticCode::DuplicateExport => "duplicate-export",
            DiagnosticCode::MultipleParameters => "multiple-parameters",
            DiagnosticCode::ConflictingMarkers => "conflicting-markers",
            DiagnosticCode::NonStaticExport => "non-static-export",
            DiagnosticCode::MissingReturnType => "missing-return-type",
            DiagnosticCode::EmissionConflict => "emission-conflict",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position in a frontend source file (1-based line and column)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A single diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub message: String,
    #[serde(default)]
    pub location: Option<SourceLocation>,
}

impl Diagnostic {
    /// Create a diagnostic with the code's default severity
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            message: message.into(),
            location: None,
        }
    }

    pub fn at(mut self, location: Option<SourceLocation>) -> Self {
        self.location = location;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(f, "{location}: ")?;
        }
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

/// Ordered collection of diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_error()).count()
    }

    /// Diagnostics of one kind
    pub fn with_code(&self, code: DiagnosticCode) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |d| d.code == code)
    }

    /// Emit every diagnostic through `tracing`
    pub fn log(&self) {
        for diagnostic in &self.items {
            match diagnostic.severity {
                Severity::Warning => tracing::warn!("{diagnostic}"),
                Severity::Error => tracing::error!("{diagnostic}"),
            }
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[path = "diagnostics/diagnostics_tests.rs"]
mod diagnostics_tests;
