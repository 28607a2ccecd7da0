use std::fmt;

/// A position in a result tree: a sequence of record fields and list
/// indices, starting at the root.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    Field(String),
    Index(usize),
}

impl Path {
    pub fn root() -> Path {
        Path::default()
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn push(&mut self, step: impl Into<Step>) {
        self.steps.push(step.into());
    }

    /// A new path with `step` appended.
    pub fn join(&self, step: impl Into<Step>) -> Path {
        let mut ret = self.clone();
        ret.push(step);
        ret
    }

    /// Returns `true` if `self` is `other` or lies below it.
    pub fn starts_with(&self, other: &Path) -> bool {
        self.steps.starts_with(&other.steps)
    }

    /// The first `len` steps.
    pub fn prefix(&self, len: usize) -> Path {
        Path {
            steps: self.steps[..len.min(self.steps.len())].to_vec(),
        }
    }
}

impl From<&str> for Step {
    fn from(value: &str) -> Self {
        Step::Field(value.to_string())
    }
}

impl From<String> for Step {
    fn from(value: String) -> Self {
        Step::Field(value)
    }
}

impl From<usize> for Step {
    fn from(value: usize) -> Self {
        Step::Index(value)
    }
}

impl<S: Into<Step>> FromIterator<S> for Path {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Path {
            steps: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str("/");
        }

        for step in &self.steps {
            match step {
                Step::Field(name) => write!(f, "/{name}")?,
                Step::Index(index) => write!(f, "/{index}")?,
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
