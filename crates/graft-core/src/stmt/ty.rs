use super::Value;
use crate::Result;

use serde::{Deserialize, Serialize};

/// Scalar types a value can be cast to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    Bool,
    F64,
    I64,
    String,
}

impl Type {
    /// Casts `value` to this type. Null casts to null.
    pub fn cast(&self, value: Value) -> Result<Value> {
        let ret = match (self, value) {
            (_, Value::Null) => Value::Null,
            (Type::Bool, Value::Bool(v)) => Value::Bool(v),
            (Type::Bool, Value::I64(v)) => Value::Bool(v != 0),
            (Type::Bool, Value::String(v)) => match v.as_str() {
                "true" | "t" | "1" => Value::Bool(true),
                "false" | "f" | "0" => Value::Bool(false),
                _ => return Err(cast_failed(&Value::String(v), self)),
            },
            (Type::I64, Value::I64(v)) => Value::I64(v),
            (Type::I64, Value::Bool(v)) => Value::I64(v.into()),
            (Type::I64, Value::F64(v)) if v.is_finite() => Value::I64(v.trunc() as i64),
            (Type::I64, Value::String(v)) => match v.trim().parse() {
                Ok(v) => Value::I64(v),
                Err(_) => return Err(cast_failed(&Value::String(v), self)),
            },
            (Type::F64, Value::F64(v)) => Value::F64(v),
            (Type::F64, Value::I64(v)) => Value::F64(v as f64),
            (Type::F64, Value::String(v)) => match v.trim().parse() {
                Ok(v) => Value::F64(v),
                Err(_) => return Err(cast_failed(&Value::String(v), self)),
            },
            (Type::String, Value::String(v)) => Value::String(v),
            (Type::String, Value::Bool(v)) => Value::String(v.to_string()),
            (Type::String, Value::I64(v)) => Value::String(v.to_string()),
            (Type::String, Value::F64(v)) => Value::String(v.to_string()),
            (_, value) => return Err(cast_failed(&value, self)),
        };

        Ok(ret)
    }
}

fn cast_failed(value: &Value, ty: &Type) -> crate::Error {
    crate::Error::expression_evaluation_failed(format!(
        "cannot cast {} to {:?}",
        value.kind(),
        ty
    ))
}
