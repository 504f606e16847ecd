//! Typed TypeScript facade over the compiled addon.

use crate::INDENT;
use crate::code_writer::CodeWriter;
use napigen_core::{ExportSchema, SchemaIr, SemanticType, StructSchema, TypeMapper};
use std::fmt::{self, Write};

pub struct FacadeRenderer {
    mapper: TypeMapper,
}

impl FacadeRenderer {
    pub fn new(mapper: TypeMapper) -> Self {
        Self { mapper }
    }

    pub fn render(&self, ir: &SchemaIr, banner: &str, addon_path: &str) -> Result<String, fmt::Error> {
        let mut out = String::new();
        let mut w = CodeWriter::new(&mut out, INDENT);

        if !banner.is_empty() {
            w.writeln(banner)?;
        }
        writeln!(w, "const addon = require(\"{addon_path}\");")?;

        for schema in &ir.structs {
            w.blank_line()?;
            self.write_interface(&mut w, schema)?;
        }

        for (owner, exports) in ir.exports_by_owner() {
            w.blank_line()?;
            match owner {
                Some(owner) => {
                    w.block(&format!("export class {owner}"), |w| {
                        for (i, export) in exports.iter().enumerate() {
                            if i > 0 {
                                w.blank_line()?;
                            }
                            self.write_member(w, export, true)?;
                        }
                        Ok(())
                    })?;
                }
                None => {
                    for (i, export) in exports.iter().enumerate() {
                        if i > 0 {
                            w.blank_line()?;
                        }
                        self.write_member(&mut w, export, false)?;
                    }
                }
            }
        }

        Ok(out)
    }

    fn display(&self, ty: &SemanticType) -> String {
        self.mapper.resolve_display_type(ty).text
    }

    fn write_interface<W: fmt::Write>(
        &self,
        w: &mut CodeWriter<W>,
        schema: &StructSchema,
    ) -> fmt::Result {
        w.doc_block(&schema.docs)?;
        w.block(&format!("export interface {}", schema.name), |w| {
            for field in &schema.fields {
                w.doc_block(&field.docs)?;
                let marker = if field.is_optional { "?" } else { "" };
                writeln!(w, "{}{marker}: {};", field.name, self.display(&field.ty))?;
            }
            Ok(())
        })
    }

    /// A static class member or a free function forwarding to the addon
    fn write_member<W: fmt::Write>(
        &self,
        w: &mut CodeWriter<W>,
        export: &ExportSchema,
        in_class: bool,
    ) -> fmt::Result {
        let (params, args) = match &export.param_type {
            Some(ty) => {
                let name = export.param_name();
                (format!("{name}: {}", self.display(ty)), name.to_string())
            }
            None => (String::new(), String::new()),
        };
        let call = format!("addon.{}({args})", export.name);
        let result = export
            .return_type
            .as_ref()
            .map(|ty| self.display(ty))
            .unwrap_or_else(|| "void".to_string());

        let prefix = match (in_class, export.is_async) {
            (true, false) => "static ",
            (true, true) => "static async ",
            (false, false) => "export function ",
            (false, true) => "export async function ",
        };

        w.doc_block(&export.docs)?;
        if export.is_async {
            let header = format!("{prefix}{}({params}): Promise<{result}>", export.method_name);
            w.block(&header, |w| match export.return_type {
                Some(_) => writeln!(w, "return await {call};"),
                None => writeln!(w, "await {call};"),
            })
        } else {
            let header = format!("{prefix}{}({params}): {result}", export.method_name);
            w.block(&header, |w| match export.return_type {
                Some(_) => writeln!(w, "return {call};"),
                None => writeln!(w, "{call};"),
            })
        }
    }
}
