//! Starter implementation file handed to the user.
//!
//! Written once; the output writer never replaces it once it exists.

use crate::INDENT;
use crate::bridge::{BridgeRenderer, ExportPlan};
use crate::code_writer::CodeWriter;
use napigen_core::{NameSanitizer, SchemaIr, TypeMapper};
use std::fmt::{self, Write};

const STUB_BANNER: &str = "// Generated once by napigen. This file is yours to edit.";

pub struct StubRenderer {
    bridge: BridgeRenderer,
    sanitizer: NameSanitizer,
}

impl StubRenderer {
    pub fn new(mapper: TypeMapper, sanitizer: NameSanitizer) -> Self {
        Self {
            bridge: BridgeRenderer::new(mapper, sanitizer),
            sanitizer,
        }
    }

    pub fn render(&self, ir: &SchemaIr, api_header: &str) -> Result<String, fmt::Error> {
        let mut out = String::new();
        let mut w = CodeWriter::new(&mut out, INDENT);

        w.writeln(STUB_BANNER)?;
        writeln!(w, "#include \"{api_header}\"")?;

        for export in &ir.exports {
            let plan = ExportPlan::new(export, self.sanitizer);
            w.blank_line()?;
            w.line_comments("//", &export.docs)?;
            if export.is_async {
                w.writeln("// Runs on a worker thread; do not touch JavaScript values here.")?;
            }
            w.block(&self.bridge.signature(&plan), |w| {
                if let Some((name, _)) = &plan.param {
                    writeln!(w, "(void){name};")?;
                }
                if export.return_type.is_some() {
                    writeln!(w, "{} result{{}};", self.bridge.return_storage(&plan))?;
                    w.writeln("return result;")?;
                }
                Ok(())
            })?;
        }

        Ok(out)
    }
}
