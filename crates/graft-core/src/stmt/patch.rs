use super::{Lazy, Path, Step, Value};
use crate::{Error, Result};

impl Value {
    /// Returns the value with the position at `path` replaced by
    /// `f(previous)`. `previous` is `None` when the position does not exist
    /// yet.
    ///
    /// Only the containers on the way from the root to `path` are copied, and
    /// only when they are shared; everything else is shared with `self`.
    /// Values cloned from `self` before the call are never modified.
    pub fn patch<F>(mut self, path: &Path, f: F) -> Result<Value>
    where
        F: FnOnce(Option<&Value>) -> Value,
    {
        self.patch_mut(path, f)?;
        Ok(self)
    }

    /// In-place form of [`Value::patch`].
    pub fn patch_mut<F>(&mut self, path: &Path, f: F) -> Result<()>
    where
        F: FnOnce(Option<&Value>) -> Value,
    {
        self.patch_before_mut(path, &[], f)
    }

    /// Like [`Value::patch_mut`], but when `path` names a record field that
    /// does not exist yet, the field is placed right before the first of
    /// `later` present in that record.
    pub fn patch_before_mut<F>(&mut self, path: &Path, later: &[String], f: F) -> Result<()>
    where
        F: FnOnce(Option<&Value>) -> Value,
    {
        let Some((last, init)) = path.steps().split_last() else {
            *self = f(Some(&*self));
            return Ok(());
        };

        let mut current = self;

        for (depth, step) in init.iter().enumerate() {
            current = descend(current, step, || path.prefix(depth))?;
        }

        match (last, done_inner(current)) {
            (Step::Field(name), Value::Record(record)) => {
                let value = f(record.get(name));
                record.insert_before(name.clone(), value, later);
            }
            (Step::Index(index), Value::List(list)) => {
                if *index < list.len() {
                    let value = f(Some(&list[*index]));
                    list.set(*index, value);
                } else if *index == list.len() {
                    list.push(f(None));
                } else {
                    return Err(Error::assembly_invariant(format!(
                        "index {index} is past the end of the list at `{}` (len {})",
                        path.prefix(init.len()),
                        list.len()
                    )));
                }
            }
            (step, other) => return Err(mismatch(step, other, &path.prefix(init.len()))),
        }

        Ok(())
    }
}

fn descend<'a>(
    value: &'a mut Value,
    step: &Step,
    at: impl FnOnce() -> Path,
) -> Result<&'a mut Value> {
    match (step, done_inner(value)) {
        // Intermediate records are created on first use.
        (Step::Field(name), Value::Record(record)) => Ok(record.get_or_insert_record(name)),
        (Step::Index(index), Value::List(list)) => {
            let len = list.len();
            list.get_mut(*index).ok_or_else(|| {
                Error::assembly_invariant(format!(
                    "index {index} is out of bounds at `{}` (len {len})",
                    at()
                ))
            })
        }
        (step, other) => Err(mismatch(step, other, &at())),
    }
}

/// A resolved lazy slot is traversed as the value it holds.
fn done_inner(value: &mut Value) -> &mut Value {
    match value {
        Value::Lazy(Lazy::Done(inner)) => done_inner(inner),
        other => other,
    }
}

fn mismatch(step: &Step, found: &Value, at: &Path) -> Error {
    let expected = match step {
        Step::Field(_) => "a record",
        Step::Index(_) => "a list",
    };
    Error::assembly_invariant(format!(
        "expected {expected} at `{at}`, found {}",
        found.kind()
    ))
}
