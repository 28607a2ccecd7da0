use crate::stmt::{ExprColumn, Value};

/// Supplies column values while an expression is evaluated.
pub trait Input {
    fn resolve_column(&mut self, column: &ExprColumn) -> Option<Value> {
        let _ = column;
        None
    }
}

/// Input for expressions that reference no columns.
#[derive(Debug, Default)]
pub struct ConstInput {}

impl ConstInput {
    pub fn new() -> ConstInput {
        ConstInput {}
    }
}

impl Input for ConstInput {}

impl<T: Input + ?Sized> Input for &mut T {
    fn resolve_column(&mut self, column: &ExprColumn) -> Option<Value> {
        (**self).resolve_column(column)
    }
}
