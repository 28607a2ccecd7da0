use super::*;

/// A value in a row, in a predicate or in the assembled result tree.
///
/// Lists and records share their contents behind an `Arc`, so cloning a value
/// is shallow. Mutating a shared container (see [`Value::patch`]) copies only
/// that container; everything below it stays shared with the original.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// 64-bit floating point number
    F64(f64),

    /// Signed 64-bit integer
    I64(i64),

    /// A slot whose sub-query resolves independently of its parent
    Lazy(Lazy),

    /// A list of values
    List(ValueList),

    /// Null value
    #[default]
    Null,

    /// Named fields, in order
    Record(ValueRecord),

    /// String value
    String(String),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub const fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }

    pub fn list_from_vec(items: Vec<Self>) -> Self {
        Self::List(ValueList::from_vec(items))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&ValueRecord> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ValueList> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_lazy(&self) -> Option<&Lazy> {
        match self {
            Self::Lazy(lazy) => Some(lazy),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_record(&self) -> &ValueRecord {
        match self {
            Self::Record(record) => record,
            _ => panic!("expected record; value={self:#?}"),
        }
    }

    #[track_caller]
    pub fn expect_list(&self) -> &ValueList {
        match self {
            Self::List(list) => list,
            _ => panic!("expected list; value={self:#?}"),
        }
    }

    /// Returns the field `name` when this value is a record.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.as_record()?.get(name)
    }

    /// Returns `true` when both values are containers backed by the same
    /// allocation, or are equal scalars.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::List(a), Self::List(b)) => ValueList::ptr_eq(a, b),
            (Self::Record(a), Self::Record(b)) => ValueRecord::ptr_eq(a, b),
            (Self::Lazy(Lazy::Done(a)), Self::Lazy(Lazy::Done(b))) => a.ptr_eq(b),
            (Self::List(_) | Self::Record(_), _) | (_, Self::List(_) | Self::Record(_)) => false,
            _ => self == other,
        }
    }

    /// Name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::F64(_) => "f64",
            Self::I64(_) => "i64",
            Self::Lazy(_) => "lazy",
            Self::List(_) => "list",
            Self::Null => "null",
            Self::Record(_) => "record",
            Self::String(_) => "string",
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I64(src.into())
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<ValueRecord> for Value {
    fn from(src: ValueRecord) -> Self {
        Self::Record(src)
    }
}

impl From<ValueList> for Value {
    fn from(src: ValueList) -> Self {
        Self::List(src)
    }
}

impl From<Vec<Value>> for Value {
    fn from(src: Vec<Value>) -> Self {
        Self::List(ValueList::from_vec(src))
    }
}

impl From<Lazy> for Value {
    fn from(src: Lazy) -> Self {
        Self::Lazy(src)
    }
}

impl<T> From<Option<T>> for Value
where
    Value: From<T>,
{
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}
