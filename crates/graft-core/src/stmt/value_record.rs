use super::Value;

use indexmap::IndexMap;
use std::{fmt, sync::Arc};

/// Named fields in insertion order, with shared, copy-on-write storage.
///
/// Rows returned by drivers are records keyed by column name; assembled
/// result nodes are the same rows with one extra field per include.
#[derive(Clone, Default, PartialEq)]
pub struct ValueRecord {
    fields: Arc<IndexMap<String, Value>>,
}

impl ValueRecord {
    pub fn new() -> ValueRecord {
        ValueRecord::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Mutable access to a field, copying the record first if it is shared.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        Arc::make_mut(&mut self.fields).get_mut(name)
    }

    /// Returns the field, inserting an empty record under `name` first when
    /// the field does not exist yet.
    pub fn get_or_insert_record(&mut self, name: &str) -> &mut Value {
        Arc::make_mut(&mut self.fields)
            .entry(name.to_string())
            .or_insert_with(|| Value::Record(ValueRecord::new()))
    }

    /// Sets a field, returning the previous value. New fields go last.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        Arc::make_mut(&mut self.fields).insert(name.into(), value.into())
    }

    /// Sets a field, returning the previous value. A new field goes right
    /// before the first of `later` already present, or last when none is.
    pub fn insert_before(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
        later: &[String],
    ) -> Option<Value> {
        let (name, value) = (name.into(), value.into());
        let fields = Arc::make_mut(&mut self.fields);

        if fields.contains_key(&name) {
            return fields.insert(name, value);
        }

        match later.iter().filter_map(|field| fields.get_index_of(field)).min() {
            Some(index) => fields.shift_insert(index, name, value),
            None => fields.insert(name, value),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn ptr_eq(a: &ValueRecord, b: &ValueRecord) -> bool {
        Arc::ptr_eq(&a.fields, &b.fields)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ValueRecord {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        ValueRecord {
            fields: Arc::new(
                iter.into_iter()
                    .map(|(name, value)| (name.into(), value))
                    .collect(),
            ),
        }
    }
}

impl fmt::Debug for ValueRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.fields.iter()).finish()
    }
}
