//! Semantic value types and their mapping onto the three emission surfaces.
//!
//! Every field and parameter type is resolved once from annotation text into a
//! [`SemanticType`]. The [`TypeMapper`] then answers three questions about it:
//!
//! | Semantic | C++ storage | read from `Napi::Value` | TypeScript |
//! |----------|-------------|-------------------------|------------|
//! | `string` | `std::string` | `.As<Napi::String>().Utf8Value()` | `string` |
//! | `boolean` | `bool` | `.As<Napi::Boolean>().Value()` | `boolean` |
//! | `i32` | `int32_t` | `static_cast<int32_t>(….DoubleValue())` | `number` |
//! | `f64` / `number` | `double` | `.As<Napi::Number>().DoubleValue()` | `number` |
//! | `T[]` | `std::vector<T>` | `napigen_detail::ReadArray<T>(…)` | `T[]` |
//! | struct `S` | `S` | `S::FromNapi(….As<Napi::Object>())` | `S` |
//!
//! JavaScript has a single numeric kind, so every numeric kind other than
//! `f64` is narrowed on read and widened with `static_cast<double>` on write.
//! Values outside the exact range of a double lose precision.

use crate::naming::NameSanitizer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of scalar kinds understood by every surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Text,
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

/// Row of the scalar mapping table
struct ScalarMapping {
    kind: ScalarKind,
    frontend: &'static str,
    storage: &'static str,
    display: &'static str,
    check: &'static str,
}

const SCALAR_MAPPINGS: &[ScalarMapping] = &[
    ScalarMapping {
        kind: ScalarKind::Text,
        frontend: "string",
        storage: "std::string",
        display: "string",
        check: "IsString",
    },
    ScalarMapping {
        kind: ScalarKind::Bool,
        frontend: "boolean",
        storage: "bool",
        display: "boolean",
        check: "IsBoolean",
    },
    ScalarMapping {
        kind: ScalarKind::I8,
        frontend: "i8",
        storage: "int8_t",
        display: "number",
        check: "IsNumber",
    },
    ScalarMapping {
        kind: ScalarKind::I16,
        frontend: "i16",
        storage: "int16_t",
        display: "number",
        check: "IsNumber",
    },
    ScalarMapping {
        kind: ScalarKind::I32,
        frontend: "i32",
        storage: "int32_t",
        display: "number",
        check: "IsNumber",
    },
    ScalarMapping {
        kind: ScalarKind::I64,
        frontend: "i64",
        storage: "int64_t",
        display: "number",
        check: "IsNumber",
    },
    ScalarMapping {
        kind: ScalarKind::U8,
        frontend: "u8",
        storage: "uint8_t",
        display: "number",
        check: "IsNumber",
    },
    ScalarMapping {
        kind: ScalarKind::U16,
        frontend: "u16",
        storage: "uint16_t",
        display: "number",
        check: "IsNumber",
    },
    ScalarMapping {
        kind: ScalarKind::U32,
        frontend: "u32",
        storage: "uint32_t",
        display: "number",
        check: "IsNumber",
    },
    ScalarMapping {
        kind: ScalarKind::U64,
        frontend: "u64",
        storage: "uint64_t",
        display: "number",
        check: "IsNumber",
    },
    ScalarMapping {
        kind: ScalarKind::F32,
        frontend: "f32",
        storage: "float",
        display: "number",
        check: "IsNumber",
    },
    ScalarMapping {
        kind: ScalarKind::F64,
        frontend: "f64",
        storage: "double",
        display: "number",
        check: "IsNumber",
    },
];

impl ScalarKind {
    pub const ALL: [ScalarKind; 12] = [
        ScalarKind::Text,
        ScalarKind::Bool,
        ScalarKind::I8,
        ScalarKind::I16,
        ScalarKind::I32,
        ScalarKind::I64,
        ScalarKind::U8,
        ScalarKind::U16,
        ScalarKind::U32,
        ScalarKind::U64,
        ScalarKind::F32,
        ScalarKind::F64,
    ];

    fn mapping(self) -> &'static ScalarMapping {
        // The table holds one row per variant in declaration order.
        &SCALAR_MAPPINGS[self as usize]
    }

    /// Look up a scalar by its frontend spelling.
    ///
    /// `number` is accepted as an alias of `f64`.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "number" {
            return Some(ScalarKind::F64);
        }
        SCALAR_MAPPINGS
            .iter()
            .find(|m| m.frontend == name)
            .map(|m| m.kind)
    }

    /// Canonical frontend spelling
    pub fn name(self) -> &'static str {
        self.mapping().frontend
    }

    pub fn storage_type(self) -> &'static str {
        self.mapping().storage
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, ScalarKind::Text | ScalarKind::Bool)
    }

    /// Whether the C++ storage differs from the boundary's double, requiring a cast
    pub fn is_precision_qualified(self) -> bool {
        self.is_numeric() && self != ScalarKind::F64
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved semantic type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum SemanticType {
    Scalar(ScalarKind),
    /// Reference to another value struct by name
    Struct(String),
    /// Sequence of the inner type
    Array(Box<SemanticType>),
    /// Annotation text that could not be mapped, kept verbatim
    Dynamic(String),
}

impl SemanticType {
    pub fn scalar(kind: ScalarKind) -> Self {
        SemanticType::Scalar(kind)
    }

    pub fn array_of(inner: SemanticType) -> Self {
        SemanticType::Array(Box::new(inner))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, SemanticType::Array(_))
    }

    /// Number of nested array layers
    pub fn array_depth(&self) -> usize {
        match self {
            SemanticType::Array(inner) => 1 + inner.array_depth(),
            _ => 0,
        }
    }

    /// The innermost non-array type
    pub fn element(&self) -> &SemanticType {
        match self {
            SemanticType::Array(inner) => inner.element(),
            other => other,
        }
    }

    /// Name of the struct this type refers to, looking through arrays
    pub fn struct_name(&self) -> Option<&str> {
        match self.element() {
            SemanticType::Struct(name) => Some(name),
            _ => None,
        }
    }

    /// Whether any part of this type fell back to a dynamic type
    pub fn is_dynamic(&self) -> bool {
        matches!(self.element(), SemanticType::Dynamic(_))
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::Scalar(kind) => write!(f, "{kind}"),
            SemanticType::Struct(name) => f.write_str(name),
            SemanticType::Array(inner) => write!(f, "{inner}[]"),
            SemanticType::Dynamic(raw) => f.write_str(raw),
        }
    }
}

/// Result of a table lookup. `fallback` is set when the input was not in the
/// closed type set and `text` carries the original spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub text: String,
    pub fallback: bool,
}

impl Resolved {
    fn exact(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fallback: false,
        }
    }

    fn fallback(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fallback: true,
        }
    }
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Outcome of parsing annotation text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedType {
    pub ty: SemanticType,
    /// Set by `T | undefined` / `T | null`
    pub optional: bool,
}

impl ParsedType {
    pub fn is_fallback(&self) -> bool {
        self.ty.is_dynamic()
    }
}

/// Stateless mapping between semantic types and their surface spellings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeMapper;

impl TypeMapper {
    pub fn new() -> Self {
        Self
    }

    /// Parse annotation text into a semantic type.
    ///
    /// `is_struct` decides whether a bare identifier names a known value struct.
    /// Array syntax recurses with no depth limit.
    pub fn resolve_type_text(&self, text: &str, is_struct: impl Fn(&str) -> bool) -> ParsedType {
        let text = text.trim();
        let parts = split_top_level(text, '|');
        let mut optional = false;
        let mut remaining = Vec::new();
        for part in parts {
            match part.trim() {
                "undefined" | "null" => optional = true,
                other => remaining.push(other),
            }
        }

        let ty = match remaining.as_slice() {
            [single] => parse_single(single, &is_struct),
            _ => SemanticType::Dynamic(text.to_string()),
        };

        ParsedType { ty, optional }
    }

    /// C++ storage type
    pub fn resolve_storage_type(&self, ty: &SemanticType) -> Resolved {
        match ty {
            SemanticType::Scalar(kind) => Resolved::exact(kind.storage_type()),
            SemanticType::Struct(name) => Resolved::exact(NameSanitizer.sanitize(name).emitted),
            SemanticType::Array(inner) => {
                let inner = self.resolve_storage_type(inner);
                Resolved {
                    text: format!("std::vector<{}>", inner.text),
                    fallback: inner.fallback,
                }
            }
            SemanticType::Dynamic(raw) => Resolved::fallback(raw.clone()),
        }
    }

    /// C++ expression converting the `Napi::Value` expression `value` into storage
    pub fn resolve_extractor(&self, ty: &SemanticType, value: &str) -> Resolved {
        match ty {
            SemanticType::Scalar(ScalarKind::Text) => {
                Resolved::exact(format!("{value}.As<Napi::String>().Utf8Value()"))
            }
            SemanticType::Scalar(ScalarKind::Bool) => {
                Resolved::exact(format!("{value}.As<Napi::Boolean>().Value()"))
            }
            SemanticType::Scalar(kind) if kind.is_precision_qualified() => {
                Resolved::exact(format!(
                    "static_cast<{}>({value}.As<Napi::Number>().DoubleValue())",
                    kind.storage_type()
                ))
            }
            SemanticType::Scalar(_) => {
                Resolved::exact(format!("{value}.As<Napi::Number>().DoubleValue()"))
            }
            SemanticType::Struct(name) => Resolved::exact(format!(
                "{}::FromNapi({value}.As<Napi::Object>())",
                NameSanitizer.sanitize(name).emitted
            )),
            SemanticType::Array(inner) => {
                let item = format!("item{}", inner.array_depth());
                let storage = self.resolve_storage_type(inner);
                let read = self.resolve_extractor(inner, &item);
                Resolved {
                    text: format!(
                        "napigen_detail::ReadArray<{}>({value}, [](const Napi::Value& {item}) {{ return {}; }})",
                        storage.text, read.text
                    ),
                    fallback: storage.fallback || read.fallback,
                }
            }
            SemanticType::Dynamic(raw) => {
                Resolved::fallback(format!("napigen::FromBoundary<{raw}>({value})"))
            }
        }
    }

    /// C++ expression converting the storage expression `value` into a `Napi::Value`
    pub fn resolve_injector(&self, ty: &SemanticType, env: &str, value: &str) -> Resolved {
        match ty {
            SemanticType::Scalar(ScalarKind::Text) => {
                Resolved::exact(format!("Napi::String::New({env}, {value})"))
            }
            SemanticType::Scalar(ScalarKind::Bool) => {
                Resolved::exact(format!("Napi::Boolean::New({env}, {value})"))
            }
            SemanticType::Scalar(kind) if kind.is_precision_qualified() => Resolved::exact(
                format!("Napi::Number::New({env}, static_cast<double>({value}))"),
            ),
            SemanticType::Scalar(_) => Resolved::exact(format!("Napi::Number::New({env}, {value})")),
            SemanticType::Struct(_) => Resolved::exact(format!("{value}.ToNapi({env})")),
            SemanticType::Array(inner) => {
                let item = format!("item{}", inner.array_depth());
                let storage = self.resolve_storage_type(inner);
                let write = self.resolve_injector(inner, env, &item);
                Resolved {
                    text: format!(
                        "napigen_detail::WriteArray({env}, {value}, [=](const {}& {item}) -> Napi::Value {{ return {}; }})",
                        storage.text, write.text
                    ),
                    fallback: storage.fallback || write.fallback,
                }
            }
            SemanticType::Dynamic(raw) => {
                Resolved::fallback(format!("napigen::ToBoundary<{raw}>({env}, {value})"))
            }
        }
    }

    /// TypeScript display type used by the facade
    pub fn resolve_display_type(&self, ty: &SemanticType) -> Resolved {
        match ty {
            SemanticType::Scalar(kind) => Resolved::exact(kind.mapping().display),
            SemanticType::Struct(name) => Resolved::exact(name.clone()),
            SemanticType::Array(inner) => {
                let inner = self.resolve_display_type(inner);
                Resolved {
                    text: format!("{}[]", inner.text),
                    fallback: inner.fallback,
                }
            }
            SemanticType::Dynamic(_) => Resolved::fallback("any"),
        }
    }

    /// `Napi::Value` predicate validating a boundary argument of this type.
    ///
    /// Dynamic types have no predicate.
    pub fn boundary_check(&self, ty: &SemanticType) -> Option<&'static str> {
        match ty {
            SemanticType::Scalar(kind) => Some(kind.mapping().check),
            SemanticType::Struct(_) => Some("IsObject"),
            SemanticType::Array(_) => Some("IsArray"),
            SemanticType::Dynamic(_) => None,
        }
    }
}

/// Parse one non-union type expression
fn parse_single(text: &str, is_struct: &impl Fn(&str) -> bool) -> SemanticType {
    let text = text.trim();
    let text = text.strip_prefix("readonly ").map(str::trim).unwrap_or(text);

    if let Some(inner) = text.strip_suffix("[]") {
        return SemanticType::array_of(parse_single(inner, is_struct));
    }

    if let Some(inner) = strip_enclosing(text, '(', ')') {
        return parse_single(inner, is_struct);
    }

    for wrapper in ["Array", "ReadonlyArray"] {
        if let Some(inner) = text
            .strip_prefix(wrapper)
            .and_then(|rest| strip_enclosing(rest.trim_start(), '<', '>'))
        {
            return SemanticType::array_of(parse_single(inner, is_struct));
        }
    }

    if let Some(kind) = ScalarKind::from_name(text) {
        return SemanticType::Scalar(kind);
    }

    if is_struct(text) {
        return SemanticType::Struct(text.to_string());
    }

    SemanticType::Dynamic(text.to_string())
}

/// Strip a matching open/close pair that encloses the whole text
fn strip_enclosing(text: &str, open: char, close: char) -> Option<&str> {
    let inner = text.strip_prefix(open)?.strip_suffix(close)?;
    let mut depth = 0usize;
    for c in inner.chars() {
        if c == open {
            depth += 1;
        } else if c == close {
            // The opening bracket closed early, e.g. `(A) | (B)`
            depth = depth.checked_sub(1)?;
        }
    }
    (depth == 0).then_some(inner)
}

/// Split on `sep` outside of any bracket nesting
fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' | '<' | '[' | '{' => depth += 1,
            ')' | '>' | ']' | '}' => depth -= 1,
            c if c == sep && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
