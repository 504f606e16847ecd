//! Boundary marshalling over `serde_json::Value`.
//!
//! Mirrors the emitted `FromNapi` / `ToNapi` pair: reading starts from a
//! value-initialised struct and populates a field only when its key is
//! present with the expected shape; writing sets every key, with empty
//! optionals written as `null`. Numbers cross the boundary as doubles and
//! are narrowed to the field's scalar kind on the way in.

use crate::error::{BridgeError, BridgeResult};
use napigen_core::{FieldSchema, ScalarKind, SchemaIr, SemanticType, StructSchema, TypeMapper};
use serde_json::{Map, Number, Value};

/// Structs nested deeper than this are treated as a reference cycle
const MAX_DEPTH: usize = 64;

/// A value in native storage
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    Text(String),
    Bool(bool),
    Number(f64),
    Struct(StructValue),
    Array(Vec<NativeValue>),
    /// Passed through untouched for types the mapper could not resolve
    Dynamic(Value),
    /// Empty optional, or the result of a `void` export
    Null,
}

impl NativeValue {
    pub fn text(value: impl Into<String>) -> Self {
        NativeValue::Text(value.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            NativeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NativeValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            NativeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            NativeValue::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[NativeValue]> {
        match self {
            NativeValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, NativeValue::Null)
    }
}

/// Fields of one struct instance, in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    pub name: String,
    pub fields: Vec<(String, NativeValue)>,
}

impl StructValue {
    pub fn get(&self, field: &str) -> Option<&NativeValue> {
        self.fields.iter().find(|(k, _)| k == field).map(|(_, v)| v)
    }

    /// Replace a declared field; returns `false` for unknown fields
    pub fn set(&mut self, field: &str, value: NativeValue) -> bool {
        match self.fields.iter_mut().find(|(k, _)| k == field) {
            Some((_, slot)) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn with(mut self, field: &str, value: NativeValue) -> Self {
        self.set(field, value);
        self
    }
}

/// Converts between boundary values and native storage for one schema
#[derive(Debug, Clone, Copy)]
pub struct Marshaller<'a> {
    ir: &'a SchemaIr,
    mapper: TypeMapper,
}

impl<'a> Marshaller<'a> {
    pub fn new(ir: &'a SchemaIr) -> Self {
        Self {
            ir,
            mapper: TypeMapper::new(),
        }
    }

    fn schema(&self, name: &str) -> BridgeResult<&'a StructSchema> {
        self.ir.struct_by_name(name).ok_or_else(|| BridgeError::Marshal {
            type_name: name.to_string(),
            message: "struct is not part of the schema".to_string(),
        })
    }

    fn marshal_error(&self, ty: &SemanticType, message: impl Into<String>) -> BridgeError {
        BridgeError::Marshal {
            type_name: self.display(ty),
            message: message.into(),
        }
    }

    /// Facade spelling of `ty`, as used in argument errors
    pub fn display(&self, ty: &SemanticType) -> String {
        self.mapper.resolve_display_type(ty).text
    }

    /// Value-initialised storage for `ty`
    pub fn default_value(&self, ty: &SemanticType) -> BridgeResult<NativeValue> {
        self.default_at(ty, 0)
    }

    pub fn default_struct(&self, name: &str) -> BridgeResult<StructValue> {
        self.default_struct_at(name, 0)
    }

    fn default_at(&self, ty: &SemanticType, depth: usize) -> BridgeResult<NativeValue> {
        Ok(match ty {
            SemanticType::Scalar(ScalarKind::Text) => NativeValue::Text(String::new()),
            SemanticType::Scalar(ScalarKind::Bool) => NativeValue::Bool(false),
            SemanticType::Scalar(_) => NativeValue::Number(0.0),
            SemanticType::Struct(name) => NativeValue::Struct(self.default_struct_at(name, depth + 1)?),
            SemanticType::Array(_) => NativeValue::Array(Vec::new()),
            SemanticType::Dynamic(_) => NativeValue::Dynamic(Value::Null),
        })
    }

    fn default_struct_at(&self, name: &str, depth: usize) -> BridgeResult<StructValue> {
        if depth > MAX_DEPTH {
            return Err(BridgeError::Marshal {
                type_name: name.to_string(),
                message: "struct contains itself by value".to_string(),
            });
        }
        let schema = self.schema(name)?;
        let fields = schema
            .fields
            .iter()
            .map(|field| {
                let value = if field.is_optional {
                    NativeValue::Null
                } else {
                    self.default_at(&field.ty, depth)?
                };
                Ok((field.name.clone(), value))
            })
            .collect::<BridgeResult<Vec<_>>>()?;
        Ok(StructValue {
            name: schema.name.clone(),
            fields,
        })
    }

    /// Whether `value` has the shape the wrapper's argument check accepts
    pub fn shape_matches(&self, ty: &SemanticType, value: &Value) -> bool {
        match ty {
            SemanticType::Scalar(ScalarKind::Text) => value.is_string(),
            SemanticType::Scalar(ScalarKind::Bool) => value.is_boolean(),
            SemanticType::Scalar(_) => value.is_number(),
            SemanticType::Struct(_) => value.is_object(),
            SemanticType::Array(_) => value.is_array(),
            SemanticType::Dynamic(_) => !value.is_null(),
        }
    }

    /// Boundary value to native storage
    pub fn from_boundary(&self, ty: &SemanticType, value: &Value) -> BridgeResult<NativeValue> {
        match ty {
            SemanticType::Scalar(ScalarKind::Text) => value
                .as_str()
                .map(NativeValue::text)
                .ok_or_else(|| self.marshal_error(ty, format!("expected string, got {value}"))),
            SemanticType::Scalar(ScalarKind::Bool) => value
                .as_bool()
                .map(NativeValue::Bool)
                .ok_or_else(|| self.marshal_error(ty, format!("expected boolean, got {value}"))),
            SemanticType::Scalar(kind) => value
                .as_f64()
                .map(|n| NativeValue::Number(narrow(*kind, n)))
                .ok_or_else(|| self.marshal_error(ty, format!("expected number, got {value}"))),
            SemanticType::Struct(name) => match value.as_object() {
                Some(obj) => Ok(NativeValue::Struct(self.struct_from_boundary(name, obj)?)),
                None => Err(self.marshal_error(ty, format!("expected object, got {value}"))),
            },
            SemanticType::Array(inner) => {
                let items = value
                    .as_array()
                    .ok_or_else(|| self.marshal_error(ty, format!("expected array, got {value}")))?;
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        self.from_boundary(inner, item).map_err(|e| {
                            self.marshal_error(ty, format!("element {i}: {e}"))
                        })
                    })
                    .collect::<BridgeResult<Vec<_>>>()
                    .map(NativeValue::Array)
            }
            SemanticType::Dynamic(_) => Ok(NativeValue::Dynamic(value.clone())),
        }
    }

    /// Mirrors `S::FromNapi`: absent or mis-shaped keys keep their defaults
    pub fn struct_from_boundary(
        &self,
        name: &str,
        obj: &Map<String, Value>,
    ) -> BridgeResult<StructValue> {
        let schema = self.schema(name)?;
        let mut result = self.default_struct(name)?;
        for field in &schema.fields {
            let Some(value) = obj.get(&field.name) else {
                continue;
            };
            if !self.shape_matches(&field.ty, value) {
                continue;
            }
            let native = self
                .from_boundary(&field.ty, value)
                .map_err(|e| BridgeError::Marshal {
                    type_name: schema.name.clone(),
                    message: e.to_string(),
                })?;
            result.set(&field.name, native);
        }
        Ok(result)
    }

    /// Native storage to boundary value
    pub fn to_boundary(&self, ty: &SemanticType, native: &NativeValue) -> BridgeResult<Value> {
        match (ty, native) {
            (SemanticType::Scalar(ScalarKind::Text), NativeValue::Text(s)) => Ok(Value::String(s.clone())),
            (SemanticType::Scalar(ScalarKind::Bool), NativeValue::Bool(b)) => Ok(Value::Bool(*b)),
            (SemanticType::Scalar(kind), NativeValue::Number(n)) if kind.is_numeric() => {
                Ok(Number::from_f64(narrow(*kind, *n)).map_or(Value::Null, Value::Number))
            }
            (SemanticType::Struct(name), NativeValue::Struct(value)) => {
                self.struct_to_boundary(name, value).map(Value::Object)
            }
            (SemanticType::Array(inner), NativeValue::Array(items)) => items
                .iter()
                .map(|item| self.to_boundary(inner, item))
                .collect::<BridgeResult<Vec<_>>>()
                .map(Value::Array),
            (SemanticType::Dynamic(_), NativeValue::Dynamic(value)) => Ok(value.clone()),
            (SemanticType::Dynamic(_), NativeValue::Null) => Ok(Value::Null),
            (ty, other) => Err(self.marshal_error(ty, format!("cannot write {other:?}"))),
        }
    }

    /// Mirrors `S::ToNapi`: every declared key is set
    pub fn struct_to_boundary(
        &self,
        name: &str,
        value: &StructValue,
    ) -> BridgeResult<Map<String, Value>> {
        let schema = self.schema(name)?;
        let mut obj = Map::new();
        for field in &schema.fields {
            let native = value.get(&field.name).ok_or_else(|| BridgeError::Marshal {
                type_name: schema.name.clone(),
                message: format!("missing field '{}'", field.name),
            })?;
            obj.insert(field.name.clone(), self.field_to_boundary(schema, field, native)?);
        }
        Ok(obj)
    }

    fn field_to_boundary(
        &self,
        schema: &StructSchema,
        field: &FieldSchema,
        native: &NativeValue,
    ) -> BridgeResult<Value> {
        if field.is_optional && native.is_null() {
            return Ok(Value::Null);
        }
        self.to_boundary(&field.ty, native)
            .map_err(|e| BridgeError::Marshal {
                type_name: schema.name.clone(),
                message: format!("{}: {e}", field.name),
            })
    }
}

/// Apply the storage type's conversion from the boundary double.
///
/// Integer kinds truncate toward zero and saturate at their bounds.
pub fn narrow(kind: ScalarKind, value: f64) -> f64 {
    match kind {
        ScalarKind::I8 => value as i8 as f64,
        ScalarKind::I16 => value as i16 as f64,
        ScalarKind::I32 => value as i32 as f64,
        ScalarKind::I64 => value as i64 as f64,
        ScalarKind::U8 => value as u8 as f64,
        ScalarKind::U16 => value as u16 as f64,
        ScalarKind::U32 => value as u32 as f64,
        ScalarKind::U64 => value as u64 as f64,
        ScalarKind::F32 => value as f32 as f64,
        ScalarKind::F64 | ScalarKind::Text | ScalarKind::Bool => value,
    }
}
