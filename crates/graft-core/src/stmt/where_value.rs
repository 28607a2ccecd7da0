use super::{col, BinaryOp, Expr, ExprColumn, ExprParam, Value};

use serde::{de, ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};

/// The right-hand side of one `where` entry.
///
/// In query documents:
///
/// ```text
/// 1, "PG", null                literal
/// {"$param": "id"}             parameter (optionally {"value": ..})
/// {"$ref": "film.language_id"} cross reference to another node's column
/// {"$in": [1, 2]} or [1, 2]    literal set
/// {"$gt": 5}                   operator object; `$eq $ne $lt $le $gt $ge`
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum WhereValue {
    Value(Value),
    Param(ExprParam),
    Ref(ExprColumn),
    In(Vec<Value>),
    Op {
        op: BinaryOp,
        operand: Box<WhereValue>,
    },
}

impl WhereValue {
    pub fn op(op: BinaryOp, operand: impl Into<WhereValue>) -> WhereValue {
        WhereValue::Op {
            op,
            operand: Box::new(operand.into()),
        }
    }

    /// The cross reference in this entry and the operator it is compared
    /// with, if any.
    pub fn reference(&self) -> Option<(BinaryOp, &ExprColumn)> {
        match self {
            WhereValue::Ref(column) => Some((BinaryOp::Eq, column)),
            WhereValue::Op { op, operand } => match &**operand {
                WhereValue::Ref(column) => Some((*op, column)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Compiles `column <op> self` for a column of table `table`.
    pub fn to_expr(&self, table: &str, column: &str) -> Expr {
        let lhs = Expr::column(ExprColumn::new(table, column));
        let (op, rhs) = self.to_operand();
        Expr::binary_op(lhs, op, rhs)
    }

    fn to_operand(&self) -> (BinaryOp, Expr) {
        match self {
            WhereValue::Value(value) => (BinaryOp::Eq, value.clone().into()),
            WhereValue::Param(param) => (BinaryOp::Eq, param.clone().into()),
            WhereValue::Ref(column) => (BinaryOp::Eq, column.clone().into()),
            WhereValue::In(values) => (BinaryOp::In, Value::list_from_vec(values.clone()).into()),
            WhereValue::Op { op, operand } => {
                let (inner, rhs) = operand.to_operand();
                // `{"$eq": {"$in": ..}}` is still membership
                let op = if inner == BinaryOp::In { BinaryOp::In } else { *op };
                (op, rhs)
            }
        }
    }
}

impl From<Value> for WhereValue {
    fn from(value: Value) -> Self {
        WhereValue::Value(value)
    }
}

impl From<i64> for WhereValue {
    fn from(value: i64) -> Self {
        WhereValue::Value(value.into())
    }
}

impl From<i32> for WhereValue {
    fn from(value: i32) -> Self {
        WhereValue::Value(value.into())
    }
}

impl From<bool> for WhereValue {
    fn from(value: bool) -> Self {
        WhereValue::Value(value.into())
    }
}

impl From<&str> for WhereValue {
    fn from(value: &str) -> Self {
        WhereValue::Value(value.into())
    }
}

impl From<String> for WhereValue {
    fn from(value: String) -> Self {
        WhereValue::Value(value.into())
    }
}

impl From<ExprParam> for WhereValue {
    fn from(value: ExprParam) -> Self {
        WhereValue::Param(value)
    }
}

impl From<ExprColumn> for WhereValue {
    fn from(value: ExprColumn) -> Self {
        WhereValue::Ref(value)
    }
}

impl From<Vec<Value>> for WhereValue {
    fn from(value: Vec<Value>) -> Self {
        WhereValue::In(value)
    }
}

impl Serialize for WhereValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WhereValue::Value(value) => value.serialize(serializer),
            WhereValue::Param(param) => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("$param", &param.id)?;
                if let Some(value) = &param.value {
                    map.serialize_entry("value", value)?;
                }
                map.end()
            }
            WhereValue::Ref(column) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$ref", &column.to_string())?;
                map.end()
            }
            WhereValue::In(values) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$in", values)?;
                map.end()
            }
            WhereValue::Op { op, operand } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(op.json_key(), operand)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for WhereValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        WhereValue::try_from(json).map_err(de::Error::custom)
    }
}

impl TryFrom<serde_json::Value> for WhereValue {
    type Error = String;

    fn try_from(json: serde_json::Value) -> Result<Self, String> {
        use serde_json::Value as Json;

        let mut fields = match json {
            Json::Object(fields) => fields,
            Json::Array(items) => {
                return Ok(WhereValue::In(items.into_iter().map(Value::from).collect()))
            }
            scalar => return Ok(WhereValue::Value(scalar.into())),
        };

        if let Some(id) = fields.remove("$param") {
            let id = match id {
                Json::String(id) => Some(id),
                Json::Null => None,
                other => return Err(format!("`$param` expects a string id, found `{other}`")),
            };
            return Ok(WhereValue::Param(ExprParam {
                id,
                value: fields.remove("value").map(Value::from),
            }));
        }

        if fields.len() != 1 {
            return Err(format!(
                "expected a single operator key, found {{{}}}",
                fields.keys().cloned().collect::<Vec<_>>().join(", ")
            ));
        }

        let Some((key, operand)) = fields.into_iter().next() else {
            return Err("empty operator object".to_string());
        };

        match (key.as_str(), operand) {
            ("$ref", Json::String(path)) => Ok(WhereValue::Ref(col(&path))),
            ("$ref", other) => Err(format!("`$ref` expects \"table.column\", found `{other}`")),
            ("$in", Json::Array(items)) => Ok(WhereValue::In(
                items.into_iter().map(Value::from).collect(),
            )),
            ("$in", other) => Err(format!("`$in` expects a list, found `{other}`")),
            (key, operand) => match BinaryOp::from_json_key(key) {
                Some(op) => Ok(WhereValue::op(op, WhereValue::try_from(operand)?)),
                None => Err(format!("unknown operator `{key}`")),
            },
        }
    }
}
