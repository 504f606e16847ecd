//! Renders the complete output set for one IR.

use crate::bridge::BridgeRenderer;
use crate::error::{EmitError, EmitResult};
use crate::facade::FacadeRenderer;
use crate::output::{GeneratedFile, OutputWriter, WriteReport};
use crate::structs::StructRenderer;
use crate::stub::StubRenderer;
use napigen_core::{NameSanitizer, OutputConfig, SchemaIr, SemanticType, TypeMapper};
use std::path::Path;

pub struct Emitter {
    config: OutputConfig,
    mapper: TypeMapper,
    sanitizer: NameSanitizer,
}

impl Emitter {
    pub fn new(config: OutputConfig) -> Self {
        Self {
            config,
            mapper: TypeMapper::new(),
            sanitizer: NameSanitizer::new(),
        }
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Render every file without touching the filesystem.
    ///
    /// Output order is fixed: struct header and source, bridge header and
    /// source, facade, then the stub.
    pub fn render(&self, ir: &SchemaIr) -> EmitResult<Vec<GeneratedFile>> {
        check_references(ir)?;

        let cfg = &self.config;
        let structs = StructRenderer::new(self.mapper, self.sanitizer);
        let bridge = BridgeRenderer::new(self.mapper, self.sanitizer);
        let facade = FacadeRenderer::new(self.mapper);
        let stub = StubRenderer::new(self.mapper, self.sanitizer);

        let files = vec![
            GeneratedFile::machine_owned(&cfg.structs_header, structs.render_header(ir)?),
            GeneratedFile::machine_owned(
                &cfg.structs_source,
                structs.render_source(ir, &cfg.structs_header)?,
            ),
            GeneratedFile::machine_owned(
                &cfg.api_header,
                bridge.render_header(ir, &cfg.structs_header)?,
            ),
            GeneratedFile::machine_owned(
                &cfg.api_source,
                bridge.render_source(ir, &cfg.api_header, &cfg.module_name)?,
            ),
            GeneratedFile::machine_owned(
                &cfg.facade,
                facade.render(ir, &cfg.facade_header, &cfg.addon_path)?,
            ),
            GeneratedFile::hand_editable(&cfg.stub, stub.render(ir, &cfg.api_header)?),
        ];

        tracing::debug!(
            "rendered {} file(s) for {} struct(s) and {} export(s)",
            files.len(),
            ir.structs.len(),
            ir.exports.len()
        );
        Ok(files)
    }

    /// Render and write into `root`
    pub fn emit(&self, ir: &SchemaIr, root: &Path) -> EmitResult<WriteReport> {
        let files = self.render(ir)?;
        OutputWriter::new(root).write_all(&files)
    }
}

/// Every struct named by a field, parameter or return type must be in the IR
fn check_references(ir: &SchemaIr) -> EmitResult<()> {
    let check = |ty: &SemanticType, referenced_by: &str| match ty.struct_name() {
        Some(name) if ir.struct_by_name(name).is_none() => Err(EmitError::UnknownStruct {
            name: name.to_string(),
            referenced_by: referenced_by.to_string(),
        }),
        _ => Ok(()),
    };

    for schema in &ir.structs {
        for field in &schema.fields {
            check(&field.ty, &format!("{}.{}", schema.name, field.name))?;
        }
    }
    for export in &ir.exports {
        if let Some(ty) = &export.param_type {
            check(ty, &export.name)?;
        }
        if let Some(ty) = &export.return_type {
            check(ty, &export.name)?;
        }
    }
    Ok(())
}
