//! Value struct declarations and their `FromNapi` / `ToNapi` definitions.

use crate::code_writer::CodeWriter;
use crate::{GENERATED_BANNER, INDENT};
use napigen_core::{FieldSchema, NameSanitizer, SanitizedName, SchemaIr, StructSchema, TypeMapper};
use std::collections::HashSet;
use std::fmt::{self, Write};

/// Helpers shared by every generated struct; only the struct bodies vary.
const ARRAY_HELPERS: &str = r#"namespace napigen_detail {

template <typename T, typename Read>
std::vector<T> ReadArray(const Napi::Value& value, Read read) {
    Napi::Array arr = value.As<Napi::Array>();
    std::vector<T> out;
    out.reserve(arr.Length());
    for (uint32_t i = 0; i < arr.Length(); i++) {
        out.push_back(read(arr.Get(i)));
    }
    return out;
}

template <typename T, typename Write>
Napi::Array WriteArray(Napi::Env env, const std::vector<T>& items, Write write) {
    Napi::Array arr = Napi::Array::New(env, items.size());
    for (size_t i = 0; i < items.size(); i++) {
        arr.Set(static_cast<uint32_t>(i), write(items[i]));
    }
    return arr;
}

}  // namespace napigen_detail

namespace napigen {

// Specialize for annotation types napigen could not map.
template <typename T>
T FromBoundary(const Napi::Value& value);

template <typename T>
Napi::Value ToBoundary(Napi::Env env, const T& value);

}  // namespace napigen
"#;

/// A field with its C++ spelling computed once per rendering pass
struct FieldPlan<'a> {
    schema: &'a FieldSchema,
    name: SanitizedName,
}

impl<'a> FieldPlan<'a> {
    fn for_struct(schema: &'a StructSchema, sanitizer: NameSanitizer) -> Vec<Self> {
        schema
            .fields
            .iter()
            .map(|field| FieldPlan {
                schema: field,
                name: sanitizer.sanitize(&field.name),
            })
            .collect()
    }
}

pub struct StructRenderer {
    mapper: TypeMapper,
    sanitizer: NameSanitizer,
}

impl StructRenderer {
    pub fn new(mapper: TypeMapper, sanitizer: NameSanitizer) -> Self {
        Self { mapper, sanitizer }
    }

    /// Header declaring every struct in dependency order
    pub fn render_header(&self, ir: &SchemaIr) -> Result<String, fmt::Error> {
        let mut out = String::new();
        let mut w = CodeWriter::new(&mut out, INDENT);

        w.writeln(GENERATED_BANNER)?;
        w.writeln("#pragma once")?;
        w.blank_line()?;
        let includes = [
            "<napi.h>",
            "<cstdint>",
            "<optional>",
            "<stdexcept>",
            "<string>",
            "<vector>",
        ];
        for include in includes {
            writeln!(w, "#include {include}")?;
        }
        w.blank_line()?;
        w.write(ARRAY_HELPERS)?;

        let order = dependency_order(ir);
        if !order.is_empty() {
            w.blank_line()?;
            for schema in &order {
                writeln!(w, "struct {};", schema.name)?;
            }
        }

        for schema in order {
            w.blank_line()?;
            self.write_declaration(&mut w, schema)?;
        }

        Ok(out)
    }

    /// Source defining `FromNapi` and `ToNapi` for every struct
    pub fn render_source(&self, ir: &SchemaIr, header_name: &str) -> Result<String, fmt::Error> {
        let mut out = String::new();
        let mut w = CodeWriter::new(&mut out, INDENT);

        w.writeln(GENERATED_BANNER)?;
        writeln!(w, "#include \"{header_name}\"")?;

        for schema in dependency_order(ir) {
            let fields = FieldPlan::for_struct(schema, self.sanitizer);
            let name = self.sanitizer.sanitize(&schema.name).emitted;
            w.blank_line()?;
            self.write_from_napi(&mut w, &name, &fields)?;
            w.blank_line()?;
            self.write_to_napi(&mut w, &name, &fields)?;
        }

        Ok(out)
    }

    fn write_declaration<W: fmt::Write>(
        &self,
        w: &mut CodeWriter<W>,
        schema: &StructSchema,
    ) -> fmt::Result {
        let name = self.sanitizer.sanitize(&schema.name).emitted;
        let fields = FieldPlan::for_struct(schema, self.sanitizer);

        w.line_comments("//", &schema.docs)?;
        w.class_block(&format!("struct {name}"), |w| {
            for field in &fields {
                w.line_comments("//", &field.schema.docs)?;
                writeln!(w, "{} {}{{}};", self.storage_type(field.schema), field.name.emitted)?;
            }
            if !fields.is_empty() {
                w.blank_line()?;
            }
            writeln!(w, "static {name} FromNapi(const Napi::Object& obj);")?;
            w.writeln("Napi::Object ToNapi(Napi::Env env) const;")
        })
    }

    fn storage_type(&self, field: &FieldSchema) -> String {
        let storage = self.mapper.resolve_storage_type(&field.ty).text;
        if field.is_optional {
            format!("std::optional<{storage}>")
        } else {
            storage
        }
    }

    fn write_from_napi<W: fmt::Write>(
        &self,
        w: &mut CodeWriter<W>,
        name: &str,
        fields: &[FieldPlan<'_>],
    ) -> fmt::Result {
        w.block(&format!("{name} {name}::FromNapi(const Napi::Object& obj)"), |w| {
            writeln!(w, "{name} result;")?;
            w.block("try", |w| {
                for field in fields {
                    let key = &field.name.original;
                    let value = format!("obj.Get(\"{key}\")");
                    let condition = match self.mapper.boundary_check(&field.schema.ty) {
                        Some(check) => format!("obj.Has(\"{key}\") && {value}.{check}()"),
                        None => format!(
                            "obj.Has(\"{key}\") && !{value}.IsUndefined() && !{value}.IsNull()"
                        ),
                    };
                    let read = self.mapper.resolve_extractor(&field.schema.ty, &value);
                    w.block(&format!("if ({condition})"), |w| {
                        writeln!(w, "result.{} = {};", field.name.emitted, read.text)
                    })?;
                }
                Ok(())
            })?;
            w.block("catch (const std::exception& e)", |w| {
                writeln!(
                    w,
                    "throw std::runtime_error(std::string(\"Failed to parse {name}: \") + e.what());"
                )
            })?;
            w.writeln("return result;")
        })
    }

    fn write_to_napi<W: fmt::Write>(
        &self,
        w: &mut CodeWriter<W>,
        name: &str,
        fields: &[FieldPlan<'_>],
    ) -> fmt::Result {
        w.block(&format!("Napi::Object {name}::ToNapi(Napi::Env env) const"), |w| {
            w.writeln("Napi::Object obj = Napi::Object::New(env);")?;
            for field in fields {
                let key = &field.name.original;
                let member = format!("this->{}", field.name.emitted);
                if field.schema.is_optional {
                    let write = self.mapper.resolve_injector(
                        &field.schema.ty,
                        "env",
                        &format!("{member}.value()"),
                    );
                    writeln!(
                        w,
                        "obj.Set(\"{key}\", {member}.has_value() ? Napi::Value({}) : env.Null());",
                        write.text
                    )?;
                } else {
                    let write = self.mapper.resolve_injector(&field.schema.ty, "env", &member);
                    writeln!(w, "obj.Set(\"{key}\", {});", write.text)?;
                }
            }
            w.writeln("return obj;")
        })
    }
}

/// Structs ordered so each follows the structs it holds by value.
///
/// Only by-value fields order the output; array elements are covered by the
/// forward declarations. Ties keep source order. A by-value cycle cannot be
/// declared in C++; it is broken at its first back reference and logged.
pub fn dependency_order(ir: &SchemaIr) -> Vec<&StructSchema> {
    fn visit<'a>(
        schema: &'a StructSchema,
        ir: &'a SchemaIr,
        done: &mut HashSet<&'a str>,
        visiting: &mut HashSet<&'a str>,
        order: &mut Vec<&'a StructSchema>,
    ) {
        if done.contains(schema.name.as_str()) {
            return;
        }
        if !visiting.insert(schema.name.as_str()) {
            tracing::warn!("struct '{}' is part of a reference cycle", schema.name);
            return;
        }
        for dependency in schema.value_dependencies() {
            if dependency == schema.name {
                continue;
            }
            if let Some(dep) = ir.struct_by_name(dependency) {
                visit(dep, ir, done, visiting, order);
            }
        }
        visiting.remove(schema.name.as_str());
        if done.insert(schema.name.as_str()) {
            order.push(schema);
        }
    }

    let mut done = HashSet::new();
    let mut visiting = HashSet::new();
    let mut order = Vec::with_capacity(ir.structs.len());
    for schema in &ir.structs {
        visit(schema, ir, &mut done, &mut visiting, &mut order);
    }
    order
}
