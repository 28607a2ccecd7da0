use super::Value;

use std::{fmt, ops, sync::Arc};

/// An ordered list of values with shared, copy-on-write storage.
#[derive(Clone, Default, PartialEq)]
pub struct ValueList {
    items: Arc<Vec<Value>>,
}

impl ValueList {
    pub fn new() -> ValueList {
        ValueList::default()
    }

    pub fn from_vec(items: Vec<Value>) -> ValueList {
        ValueList {
            items: Arc::new(items),
        }
    }

    /// Mutable access to the item at `index`, copying the list first if it is
    /// shared.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        Arc::make_mut(&mut self.items).get_mut(index)
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        Arc::make_mut(&mut self.items).push(value.into());
    }

    pub fn set(&mut self, index: usize, value: Value) {
        Arc::make_mut(&mut self.items)[index] = value;
    }

    pub fn ptr_eq(a: &ValueList, b: &ValueList) -> bool {
        Arc::ptr_eq(&a.items, &b.items)
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.items.as_ref().clone()
    }
}

impl ops::Deref for ValueList {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.items
    }
}

impl FromIterator<Value> for ValueList {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        ValueList::from_vec(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ValueList {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Debug for ValueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}
