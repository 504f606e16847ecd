//! N-API invocation bridge: extern contracts, wrappers, async workers and
//! module registration.
//!
//! Every export gets a wrapper that validates its single argument, converts
//! it with the struct marshallers, calls the hand-written implementation and
//! converts the result back. Async exports queue a `Napi::AsyncWorker` that
//! owns a copy of the input and settles a `Napi::Promise::Deferred` on the
//! JavaScript thread.

use crate::code_writer::CodeWriter;
use crate::{GENERATED_BANNER, INDENT};
use napigen_core::{ExportSchema, NameSanitizer, SchemaIr, SemanticType, TypeMapper};
use std::fmt::{self, Write};

/// Everything the renderers need to know about one export
pub(crate) struct ExportPlan<'a> {
    pub export: &'a ExportSchema,
    /// C++ function name of the implementation
    pub function: String,
    /// Key under which the wrapper is registered on `exports`
    pub key: &'a str,
    pub param: Option<(String, &'a SemanticType)>,
}

impl<'a> ExportPlan<'a> {
    pub fn new(export: &'a ExportSchema, sanitizer: NameSanitizer) -> Self {
        let param = export
            .param_type
            .as_ref()
            .map(|ty| (sanitizer.sanitize(export.param_name()).emitted, ty));
        Self {
            export,
            function: sanitizer.sanitize(&export.name).emitted,
            key: &export.name,
            param,
        }
    }

    fn wrapper(&self) -> String {
        format!("{}_wrapper", self.function)
    }

    fn worker(&self) -> String {
        format!("{}_AsyncWorker", self.function)
    }
}

pub struct BridgeRenderer {
    mapper: TypeMapper,
    sanitizer: NameSanitizer,
}

impl BridgeRenderer {
    pub fn new(mapper: TypeMapper, sanitizer: NameSanitizer) -> Self {
        Self { mapper, sanitizer }
    }

    fn plans<'a>(&self, ir: &'a SchemaIr) -> Vec<ExportPlan<'a>> {
        ir.exports
            .iter()
            .map(|export| ExportPlan::new(export, self.sanitizer))
            .collect()
    }

    /// C++ signature of the hand-written implementation
    pub(crate) fn signature(&self, plan: &ExportPlan<'_>) -> String {
        let ret = self.return_storage(plan);
        match &plan.param {
            Some((name, ty)) => format!(
                "{ret} {}(const {}& {name})",
                plan.function,
                self.mapper.resolve_storage_type(ty).text
            ),
            None => format!("{ret} {}()", plan.function),
        }
    }

    pub(crate) fn return_storage(&self, plan: &ExportPlan<'_>) -> String {
        match &plan.export.return_type {
            Some(ty) => self.mapper.resolve_storage_type(ty).text,
            None => "void".to_string(),
        }
    }

    pub fn render_header(&self, ir: &SchemaIr, structs_header: &str) -> Result<String, fmt::Error> {
        let mut out = String::new();
        let mut w = CodeWriter::new(&mut out, INDENT);

        w.writeln(GENERATED_BANNER)?;
        w.writeln("#pragma once")?;
        w.blank_line()?;
        w.writeln("#include <napi.h>")?;
        writeln!(w, "#include \"{structs_header}\"")?;
        w.blank_line()?;

        w.writeln("// Implemented by hand; see the implementation stub.")?;
        for plan in self.plans(ir) {
            w.line_comments("//", &plan.export.docs)?;
            writeln!(w, "extern {};", self.signature(&plan))?;
        }
        w.blank_line()?;
        w.writeln("Napi::Object InitGeneratedAPI(Napi::Env env, Napi::Object exports);")?;

        Ok(out)
    }

    pub fn render_source(
        &self,
        ir: &SchemaIr,
        api_header: &str,
        module_name: &str,
    ) -> Result<String, fmt::Error> {
        let mut out = String::new();
        let mut w = CodeWriter::new(&mut out, INDENT);

        w.writeln(GENERATED_BANNER)?;
        writeln!(w, "#include \"{api_header}\"")?;
        w.blank_line()?;
        w.writeln("#include <utility>")?;

        let plans = self.plans(ir);
        for plan in &plans {
            w.blank_line()?;
            if plan.export.is_async {
                self.write_async_worker(&mut w, plan)?;
                w.blank_line()?;
                self.write_async_wrapper(&mut w, plan)?;
            } else {
                self.write_sync_wrapper(&mut w, plan)?;
            }
        }

        w.blank_line()?;
        w.block(
            "Napi::Object InitGeneratedAPI(Napi::Env env, Napi::Object exports)",
            |w| {
                for plan in &plans {
                    writeln!(
                        w,
                        "exports.Set(\"{}\", Napi::Function::New(env, {}));",
                        plan.key,
                        plan.wrapper()
                    )?;
                }
                w.writeln("return exports;")
            },
        )?;
        w.blank_line()?;
        w.block("static Napi::Object Init(Napi::Env env, Napi::Object exports)", |w| {
            w.writeln("return InitGeneratedAPI(env, exports);")
        })?;
        w.blank_line()?;
        writeln!(w, "NODE_API_MODULE({module_name}, Init)")?;

        Ok(out)
    }

    /// Argument validation guard; `None` when the export takes no argument
    fn argument_guard(&self, plan: &ExportPlan<'_>) -> Option<(String, String)> {
        let (_, ty) = plan.param.as_ref()?;
        let condition = match self.mapper.boundary_check(ty) {
            Some(check) => format!("info.Length() < 1 || !info[0].{check}()"),
            None => "info.Length() < 1".to_string(),
        };
        let message = format!(
            "{}: expected {}",
            plan.key,
            self.mapper.resolve_display_type(ty).text
        );
        Some((condition, message))
    }

    fn read_argument<W: fmt::Write>(
        &self,
        w: &mut CodeWriter<W>,
        plan: &ExportPlan<'_>,
    ) -> fmt::Result {
        if let Some((name, ty)) = &plan.param {
            writeln!(
                w,
                "{} {name} = {};",
                self.mapper.resolve_storage_type(ty).text,
                self.mapper.resolve_extractor(ty, "info[0]").text
            )?;
        }
        Ok(())
    }

    fn call_expression(&self, plan: &ExportPlan<'_>, argument: &str) -> String {
        match plan.param {
            Some(_) => format!("{}({argument})", plan.function),
            None => format!("{}()", plan.function),
        }
    }

    fn write_sync_wrapper<W: fmt::Write>(
        &self,
        w: &mut CodeWriter<W>,
        plan: &ExportPlan<'_>,
    ) -> fmt::Result {
        let header = format!(
            "static Napi::Value {}(const Napi::CallbackInfo& info)",
            plan.wrapper()
        );
        w.block(&header, |w| {
            w.writeln("Napi::Env env = info.Env();")?;
            if let Some((condition, message)) = self.argument_guard(plan) {
                w.block(&format!("if ({condition})"), |w| {
                    writeln!(
                        w,
                        "Napi::TypeError::New(env, \"{message}\").ThrowAsJavaScriptException();"
                    )?;
                    w.writeln("return env.Null();")
                })?;
            }
            w.block("try", |w| {
                self.read_argument(w, plan)?;
                let argument = plan.param.as_ref().map(|(n, _)| n.as_str()).unwrap_or("");
                let call = self.call_expression(plan, argument);
                match &plan.export.return_type {
                    Some(ty) => {
                        writeln!(
                            w,
                            "{} result = {call};",
                            self.mapper.resolve_storage_type(ty).text
                        )?;
                        writeln!(
                            w,
                            "return {};",
                            self.mapper.resolve_injector(ty, "env", "result").text
                        )
                    }
                    None => {
                        writeln!(w, "{call};")?;
                        w.writeln("return env.Undefined();")
                    }
                }
            })?;
            w.block("catch (const Napi::Error& e)", |w| {
                w.writeln("e.ThrowAsJavaScriptException();")?;
                w.writeln("return env.Null();")
            })?;
            w.block("catch (const std::exception& e)", |w| {
                w.writeln("Napi::Error::New(env, e.what()).ThrowAsJavaScriptException();")?;
                w.writeln("return env.Null();")
            })?;
            w.block("catch (...)", |w| {
                writeln!(
                    w,
                    "Napi::Error::New(env, \"{}: unknown native error\").ThrowAsJavaScriptException();",
                    plan.key
                )?;
                w.writeln("return env.Null();")
            })
        })
    }

    fn write_async_worker<W: fmt::Write>(
        &self,
        w: &mut CodeWriter<W>,
        plan: &ExportPlan<'_>,
    ) -> fmt::Result {
        let worker = plan.worker();
        let input = plan
            .param
            .as_ref()
            .map(|(_, ty)| self.mapper.resolve_storage_type(ty).text);
        let result = plan
            .export
            .return_type
            .as_ref()
            .map(|ty| (ty, self.mapper.resolve_storage_type(ty).text));

        w.class_block(&format!("class {worker} : public Napi::AsyncWorker"), |w| {
            w.writeln("public:")?;
            {
                let _indent = w.indent();
                match &input {
                    Some(storage) => {
                        writeln!(w, "{worker}(Napi::Env env, {storage} input)")?;
                        let _cont = w.indent();
                        w.writeln(": Napi::AsyncWorker(env),")?;
                        w.writeln("  input_(std::move(input)),")?;
                        w.writeln("  deferred_(Napi::Promise::Deferred::New(env)) {}")?;
                    }
                    None => {
                        writeln!(w, "explicit {worker}(Napi::Env env)")?;
                        let _cont = w.indent();
                        w.writeln(": Napi::AsyncWorker(env),")?;
                        w.writeln("  deferred_(Napi::Promise::Deferred::New(env)) {}")?;
                    }
                }
                w.blank_line()?;
                w.writeln("Napi::Promise GetPromise() const { return deferred_.Promise(); }")?;
            }
            w.blank_line()?;
            w.writeln("protected:")?;
            {
                let _indent = w.indent();
                w.block("void Execute() override", |w| {
                    w.block("try", |w| {
                        let call = self.call_expression(plan, "input_");
                        if result.is_some() {
                            writeln!(w, "result_ = {call};")
                        } else {
                            writeln!(w, "{call};")
                        }
                    })?;
                    w.block("catch (const std::exception& e)", |w| w.writeln("SetError(e.what());"))?;
                    w.block("catch (...)", |w| {
                        writeln!(w, "SetError(\"{}: unknown native error\");", plan.key)
                    })
                })?;
                w.blank_line()?;
                w.block("void OnOK() override", |w| {
                    w.writeln("Napi::Env env = Env();")?;
                    w.writeln("Napi::HandleScope scope(env);")?;
                    w.block("try", |w| match &result {
                        Some((ty, _)) => writeln!(
                            w,
                            "deferred_.Resolve({});",
                            self.mapper.resolve_injector(ty, "env", "result_").text
                        ),
                        None => w.writeln("deferred_.Resolve(env.Undefined());"),
                    })?;
                    w.block("catch (const std::exception& e)", |w| {
                        w.writeln("deferred_.Reject(Napi::Error::New(env, e.what()).Value());")
                    })?;
                    w.block("catch (...)", |w| {
                        writeln!(
                            w,
                            "deferred_.Reject(Napi::Error::New(env, \"{}: unknown native error\").Value());",
                            plan.key
                        )
                    })
                })?;
                w.blank_line()?;
                w.block("void OnError(const Napi::Error& error) override", |w| {
                    w.writeln("Napi::HandleScope scope(Env());")?;
                    w.writeln("deferred_.Reject(error.Value());")
                })?;
            }
            w.blank_line()?;
            w.writeln("private:")?;
            {
                let _indent = w.indent();
                if let Some(storage) = &input {
                    writeln!(w, "{storage} input_;")?;
                }
                if let Some((_, storage)) = &result {
                    writeln!(w, "{storage} result_{{}};")?;
                }
                w.writeln("Napi::Promise::Deferred deferred_;")?;
            }
            Ok(())
        })
    }

    fn write_async_wrapper<W: fmt::Write>(
        &self,
        w: &mut CodeWriter<W>,
        plan: &ExportPlan<'_>,
    ) -> fmt::Result {
        let worker = plan.worker();
        let header = format!(
            "static Napi::Value {}(const Napi::CallbackInfo& info)",
            plan.wrapper()
        );
        w.block(&header, |w| {
            w.writeln("Napi::Env env = info.Env();")?;
            if let Some((condition, message)) = self.argument_guard(plan) {
                w.block(&format!("if ({condition})"), |w| {
                    w.writeln("Napi::Promise::Deferred rejected = Napi::Promise::Deferred::New(env);")?;
                    writeln!(w, "rejected.Reject(Napi::TypeError::New(env, \"{message}\").Value());")?;
                    w.writeln("return rejected.Promise();")
                })?;
            }
            w.block("try", |w| {
                self.read_argument(w, plan)?;
                match &plan.param {
                    Some((name, _)) => {
                        writeln!(w, "auto* worker = new {worker}(env, std::move({name}));")?
                    }
                    None => writeln!(w, "auto* worker = new {worker}(env);")?,
                }
                w.writeln("Napi::Promise promise = worker->GetPromise();")?;
                w.writeln("worker->Queue();")?;
                w.writeln("return promise;")
            })?;
            w.block("catch (const std::exception& e)", |w| {
                w.writeln("Napi::Promise::Deferred rejected = Napi::Promise::Deferred::New(env);")?;
                w.writeln("rejected.Reject(Napi::Error::New(env, e.what()).Value());")?;
                w.writeln("return rejected.Promise();")
            })?;
            w.block("catch (...)", |w| {
                w.writeln("Napi::Promise::Deferred rejected = Napi::Promise::Deferred::New(env);")?;
                writeln!(
                    w,
                    "rejected.Reject(Napi::Error::New(env, \"{}: unknown native error\").Value());",
                    plan.key
                )?;
                w.writeln("return rejected.Promise();")
            })
        })
    }
}

#[cfg(test)]
#[path = "bridge/bridge_tests.rs"]
mod bridge_tests;
