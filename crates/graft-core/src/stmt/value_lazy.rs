use super::Value;

/// State of an include marked `lazy`.
///
/// The slot holds `Pending` from the moment its parent row is placed until
/// its own sub-query resolves, then `Done` or `Error`. A failure inside a lazy
/// branch stays inside that slot instead of failing the whole execution.
#[derive(Debug, Clone, PartialEq)]
pub enum Lazy {
    Pending,
    Done(Box<Value>),
    Error(String),
}

impl Lazy {
    pub fn done(value: impl Into<Value>) -> Lazy {
        Lazy::Done(Box::new(value.into()))
    }

    pub fn error(message: impl Into<String>) -> Lazy {
        Lazy::Error(message.into())
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Lazy::Pending)
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Lazy::Done(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Lazy::Error(_))
    }

    pub fn as_done(&self) -> Option<&Value> {
        match self {
            Lazy::Done(value) => Some(value),
            _ => None,
        }
    }
}
