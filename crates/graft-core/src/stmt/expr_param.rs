use super::{Expr, Value};

/// A parameter slot.
///
/// The id is either given explicitly or derived from the slot's position
/// when parameters are bound. A slot may carry an inline value; a slot that
/// is still unbound when evaluated is an error.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprParam {
    pub id: Option<String>,
    pub value: Option<Value>,
}

/// A parameter slot with an explicit id.
pub fn param(id: impl Into<String>) -> ExprParam {
    ExprParam {
        id: Some(id.into()),
        value: None,
    }
}

impl ExprParam {
    /// A parameter slot whose id is derived from its position.
    pub fn positional() -> ExprParam {
        ExprParam {
            id: None,
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> ExprParam {
        self.value = Some(value.into());
        self
    }

    pub fn is_bound(&self) -> bool {
        self.value.is_some()
    }

    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("?")
    }
}

impl Expr {
    pub fn param(param: ExprParam) -> Self {
        Self::Param(param)
    }
}

impl From<ExprParam> for Expr {
    fn from(value: ExprParam) -> Self {
        Self::Param(value)
    }
}
