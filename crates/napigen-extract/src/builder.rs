//! Turns unresolved declarations into a validated [`SchemaIr`].
//!
//! Both front ends hand their [`RawSchema`] to the same builder so every
//! resolution rule and diagnostic applies identically to either path.

use crate::error::{ExtractError, ExtractResult};
use crate::raw::{RawExport, RawField, RawSchema, RawStruct};
use napigen_core::{
    Diagnostic, DiagnosticCode, Diagnostics, ExportSchema, FieldSchema, NameSanitizer,
    ParameterSchema, SchemaIr, SemanticType, SourceLocation, StructSchema, TypeMapper,
};
use std::collections::HashSet;

/// IR plus the diagnostics raised while building it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub ir: SchemaIr,
    pub diagnostics: Diagnostics,
}

impl Extraction {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Fail when any error diagnostic is present
    pub fn into_result(self) -> ExtractResult<Self> {
        if self.has_errors() {
            return Err(ExtractError::Rejected {
                error_count: self.diagnostics.error_count(),
                diagnostics: self.diagnostics,
            });
        }
        Ok(self)
    }
}

/// Resolves types and applies the extraction rules
#[derive(Debug, Clone, Copy, Default)]
pub struct IrBuilder {
    mapper: TypeMapper,
    sanitizer: NameSanitizer,
}

impl IrBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(&self, raw: RawSchema) -> Extraction {
        let known: HashSet<String> = raw.structs.iter().map(|s| s.name.clone()).collect();
        let mut diagnostics = Diagnostics::new();

        let mut structs = Vec::new();
        let mut seen_structs = HashSet::new();
        for raw_struct in raw.structs {
            if !seen_structs.insert(raw_struct.name.clone()) {
                diagnostics.push(
                    Diagnostic::new(
                        DiagnosticCode::DuplicateStruct,
                        format!("struct '{}' is declared more than once", raw_struct.name),
                    )
                    .at(raw_struct.location.clone()),
                );
                continue;
            }
            structs.push(self.build_struct(raw_struct, &known, &mut diagnostics));
        }

        let mut exports = Vec::new();
        let mut seen_exports = HashSet::new();
        for raw_export in raw.exports {
            let Some(export) = self.build_export(&raw_export, &known, &mut diagnostics) else {
                continue;
            };
            if !seen_exports.insert(export.name.clone()) {
                diagnostics.push(
                    Diagnostic::new(
                        DiagnosticCode::DuplicateExport,
                        format!("export '{}' is declared more than once", export.name),
                    )
                    .at(raw_export.location.clone()),
                );
                continue;
            }
            exports.push(export);
        }

        tracing::debug!(
            "built IR with {} struct(s), {} export(s), {} diagnostic(s)",
            structs.len(),
            exports.len(),
            diagnostics.len()
        );

        Extraction {
            ir: SchemaIr::new(structs, exports),
            diagnostics,
        }
    }

    fn build_struct(
        &self,
        raw: RawStruct,
        known: &HashSet<String>,
        diagnostics: &mut Diagnostics,
    ) -> StructSchema {
        self.check_identifier(
            &raw.name,
            &format!("struct '{}'", raw.name),
            raw.location.as_ref(),
            diagnostics,
        );
        self.check_reserved(
            &raw.name,
            &format!("struct '{}'", raw.name),
            raw.location.as_ref(),
            diagnostics,
        );

        let mut schema = StructSchema::new(&raw.name).with_docs(raw.docs);
        let mut seen_fields = HashSet::new();
        for field in raw.fields {
            if !seen_fields.insert(field.name.clone()) {
                diagnostics.push(
                    Diagnostic::new(
                        DiagnosticCode::DuplicateField,
                        format!("field '{}.{}' is declared more than once", raw.name, field.name),
                    )
                    .at(field.location.clone()),
                );
                continue;
            }
            if let Some(built) = self.build_field(&raw.name, field, known, diagnostics) {
                schema.fields.push(built);
            }
        }

        tracing::debug!("struct {} with {} field(s)", schema.name, schema.fields.len());
        schema
    }

    fn build_field(
        &self,
        owner: &str,
        field: RawField,
        known: &HashSet<String>,
        diagnostics: &mut Diagnostics,
    ) -> Option<FieldSchema> {
        let subject = format!("field '{owner}.{}'", field.name);
        if !self.check_identifier(&field.name, &subject, field.location.as_ref(), diagnostics) {
            return None;
        }
        let Some(text) = field.type_text.as_deref() else {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticCode::UntypedField,
                    format!("{subject} has no type annotation"),
                )
                .at(field.location.clone()),
            );
            return None;
        };

        let parsed = self.mapper.resolve_type_text(text, |name| known.contains(name));
        self.check_unresolved(&parsed.ty, &subject, field.location.as_ref(), diagnostics);
        self.check_reserved(&field.name, &subject, field.location.as_ref(), diagnostics);

        Some(
            FieldSchema::new(field.name, parsed.ty)
                .optional(field.optional || parsed.optional)
                .with_docs(field.docs),
        )
    }

    fn build_export(
        &self,
        raw: &RawExport,
        known: &HashSet<String>,
        diagnostics: &mut Diagnostics,
    ) -> Option<ExportSchema> {
        let subject = format!("export '{}'", raw.display_name());
        let location = raw.location.as_ref();
        let reject = |diagnostics: &mut Diagnostics, code: DiagnosticCode, message: String| {
            diagnostics.push(Diagnostic::new(code, message).at(location.cloned()));
            None::<ExportSchema>
        };

        if raw.sync_marker && raw.async_marker {
            return reject(
                diagnostics,
                DiagnosticCode::ConflictingMarkers,
                format!("{subject} carries both a sync and an async export marker"),
            );
        }
        if raw.owning_class.is_some() && !raw.is_static {
            return reject(
                diagnostics,
                DiagnosticCode::NonStaticExport,
                format!("{subject} must be a static method"),
            );
        }
        if raw.params.len() > 1 {
            return reject(
                diagnostics,
                DiagnosticCode::MultipleParameters,
                format!(
                    "{subject} declares {} parameters; exports take at most one",
                    raw.params.len()
                ),
            );
        }

        let name = ExportSchema::boundary_name(raw.owning_class.as_deref(), &raw.method_name);
        if !self.check_identifier(&name, &subject, location, diagnostics) {
            return None;
        }

        let mut parameters = Vec::new();
        if let Some(param) = raw.params.first() {
            let param_subject = format!("parameter '{}' of {subject}", param.name);
            if !self.check_identifier(&param.name, &param_subject, location, diagnostics) {
                return None;
            }
            let Some(text) = param.type_text.as_deref() else {
                return reject(
                    diagnostics,
                    DiagnosticCode::UntypedField,
                    format!("{param_subject} has no type annotation"),
                );
            };
            let parsed = self.mapper.resolve_type_text(text, |name| known.contains(name));
            self.check_unresolved(&parsed.ty, &param_subject, location, diagnostics);
            self.check_reserved(&param.name, &param_subject, location, diagnostics);
            parameters.push(ParameterSchema {
                name: param.name.clone(),
                ty: parsed.ty,
            });
        }

        let Some(return_text) = raw.return_text.as_deref() else {
            return reject(
                diagnostics,
                DiagnosticCode::MissingReturnType,
                format!("{subject} has no return type annotation"),
            );
        };
        let return_text = if raw.async_marker {
            unwrap_promise(return_text)
        } else {
            return_text.trim()
        };
        let return_type = match return_text {
            "void" | "undefined" => None,
            text => {
                let parsed = self.mapper.resolve_type_text(text, |name| known.contains(name));
                self.check_unresolved(
                    &parsed.ty,
                    &format!("return type of {subject}"),
                    location,
                    diagnostics,
                );
                Some(parsed.ty)
            }
        };

        self.check_reserved(&name, &subject, location, diagnostics);

        tracing::debug!(
            "export {} ({})",
            name,
            if raw.async_marker { "async" } else { "sync" }
        );

        Some(ExportSchema {
            name,
            owning_class: raw.owning_class.clone(),
            method_name: raw.method_name.clone(),
            is_static: raw.is_static,
            is_async: raw.async_marker,
            param_type: parameters.first().map(|p| p.ty.clone()),
            return_type,
            parameters,
            docs: raw.docs.clone(),
        })
    }

    fn check_unresolved(
        &self,
        ty: &SemanticType,
        subject: &str,
        location: Option<&SourceLocation>,
        diagnostics: &mut Diagnostics,
    ) {
        if let SemanticType::Dynamic(raw) = ty.element() {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticCode::UnresolvedType,
                    format!("type '{raw}' of {subject} is not supported; kept as dynamic"),
                )
                .at(location.cloned()),
            );
        }
    }

    /// Report names C++ cannot spell; returns whether the name is usable
    fn check_identifier(
        &self,
        identifier: &str,
        subject: &str,
        location: Option<&SourceLocation>,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        if self.sanitizer.is_identifier(identifier) {
            return true;
        }
        diagnostics.push(
            Diagnostic::new(
                DiagnosticCode::InvalidIdentifier,
                format!("{subject} is not a valid C++ identifier"),
            )
            .at(location.cloned()),
        );
        false
    }

    fn check_reserved(
        &self,
        identifier: &str,
        subject: &str,
        location: Option<&SourceLocation>,
        diagnostics: &mut Diagnostics,
    ) {
        let sanitized = self.sanitizer.sanitize(identifier);
        if sanitized.renamed() {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticCode::ReservedIdentifier,
                    format!(
                        "{subject} is a C++ keyword; emitted as '{}'",
                        sanitized.emitted
                    ),
                )
                .at(location.cloned()),
            );
        }
    }
}

/// `Promise<T>` to `T`; anything else unchanged
fn unwrap_promise(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix("Promise")
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('<'))
        .and_then(|rest| rest.strip_suffix('>'))
        .map(str::trim)
        .unwrap_or(text)
}
