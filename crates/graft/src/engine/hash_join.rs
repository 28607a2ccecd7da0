//! Grouping child rows under parent rows by a composite key.

use crate::{
    stmt::{Value, ValueRecord},
    Result,
};

use std::collections::{BTreeSet, HashMap};

/// The composite key a row is grouped by: the values of its key columns,
/// in key order.
///
/// Numbers compare by value, so an integer-valued float matches the same
/// integer. A key that contains null is never built; null never joins.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinKey(Vec<KeyValue>);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum KeyValue {
    Bool(bool),
    I64(i64),
    /// Bit pattern of a float with a fractional part
    F64(u64),
    String(String),
}

impl JoinKey {
    /// The key of zero columns, shared by every row.
    pub fn empty() -> JoinKey {
        JoinKey(vec![])
    }

    /// Builds a key from `values`. Returns `None` if any of them is null.
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a Value>) -> Result<Option<JoinKey>> {
        let mut key = vec![];

        for value in values {
            match KeyValue::from_value(value)? {
                Some(value) => key.push(value),
                None => return Ok(None),
            }
        }

        Ok(Some(JoinKey(key)))
    }

    /// The key of `row` over `columns`. A missing column reads as null.
    pub fn from_row(row: &ValueRecord, columns: &[String]) -> Result<Option<JoinKey>> {
        JoinKey::from_values(
            columns
                .iter()
                .map(|column| row.get(column).unwrap_or(&Value::Null)),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl KeyValue {
    fn from_value(value: &Value) -> Result<Option<KeyValue>> {
        Ok(Some(match value {
            Value::Null => return Ok(None),
            Value::Bool(v) => KeyValue::Bool(*v),
            Value::I64(v) => KeyValue::I64(*v),
            // NaN equals nothing, not even itself
            Value::F64(v) if v.is_nan() => return Ok(None),
            Value::F64(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
                KeyValue::I64(*v as i64)
            }
            Value::F64(v) => KeyValue::F64(v.to_bits()),
            Value::String(v) => KeyValue::String(v.clone()),
            value => graft_core::bail!("a {} cannot be part of a join key", value.kind()),
        }))
    }
}

/// Row indices grouped by join key, in row order within each group.
#[derive(Debug, Default, Clone)]
pub struct Index {
    groups: HashMap<JoinKey, Vec<usize>>,
}

impl Index {
    /// Groups `rows` by their values in `columns`. Rows with a null key
    /// column belong to no group.
    pub fn build(rows: &[ValueRecord], columns: &[String]) -> Result<Index> {
        let mut groups: HashMap<JoinKey, Vec<usize>> = HashMap::new();

        for (i, row) in rows.iter().enumerate() {
            if let Some(key) = JoinKey::from_row(row, columns)? {
                groups.entry(key).or_default().push(i);
            }
        }

        Ok(Index { groups })
    }

    /// Indices of the rows whose key equals `key`.
    pub fn get(&self, key: &JoinKey) -> &[usize] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Indices of the rows whose key takes, at each key position, one of
    /// the values in `candidates` at that position. Each row is returned
    /// once, in row order.
    ///
    /// With no positions every row matches. A position without candidates,
    /// or whose candidates are all null, matches nothing.
    pub fn matching(&self, candidates: &[Vec<&Value>]) -> Result<Vec<usize>> {
        let mut matched = BTreeSet::new();

        for key in product(candidates) {
            if let Some(key) = JoinKey::from_values(key)? {
                matched.extend(self.get(&key));
            }
        }

        Ok(matched.into_iter().collect())
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Every combination picking one value from each set.
fn product<'a>(sets: &[Vec<&'a Value>]) -> Vec<Vec<&'a Value>> {
    sets.iter().fold(vec![vec![]], |keys, set| {
        keys.iter()
            .flat_map(|prefix| {
                set.iter().map(move |&value| {
                    let mut key = prefix.clone();
                    key.push(value);
                    key
                })
            })
            .collect()
    })
}
