use crate::{
    stmt::{Cardinality, Lazy, Value},
    Error, Result,
};

/// Shapes the rows matched for one parent slot.
///
/// `many` is always a list, possibly empty. `maybe` is the single row or
/// null. `one` is the single row. Anything else fails with a cardinality
/// error naming `node`.
pub fn resolve(node: &str, cardinality: Cardinality, mut values: Vec<Value>) -> Result<Value> {
    match (cardinality, values.len()) {
        (Cardinality::Many, _) => Ok(Value::list_from_vec(values)),
        (Cardinality::Maybe, 0) => Ok(Value::Null),
        (Cardinality::One | Cardinality::Maybe, 1) => Ok(values.remove(0)),
        (cardinality, count) => Err(Error::cardinality(node, cardinality.expectation(), count)),
    }
}

/// Like [`resolve`], but for a lazy slot: the outcome is recorded in the
/// slot instead of failing the request.
pub fn resolve_lazy(node: &str, cardinality: Cardinality, values: Vec<Value>) -> Lazy {
    match resolve(node, cardinality, values) {
        Ok(value) => Lazy::done(value),
        Err(err) => Lazy::error(err.to_string()),
    }
}
