use super::*;

/// A scalar or boolean expression used inside query predicates.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Binary expression
    BinaryOp(ExprBinaryOp),

    /// Cast an expression to a different type
    Cast(ExprCast),

    /// References a column of a table
    Column(ExprColumn),

    /// `if cond then .. else ..`
    Cond(ExprCond),

    /// Function call
    Func(ExprFunc),

    /// An operator applied to any number of operands
    NaryOp(ExprNaryOp),

    /// A parameter slot, bound to a value before execution
    Param(ExprParam),

    /// Unary expression
    UnaryOp(ExprUnaryOp),

    /// Evaluates to a constant value
    Value(Value),
}

impl Expr {
    pub fn null() -> Self {
        Self::Value(Value::Null)
    }

    /// Is a value that evaluates to null
    pub fn is_value_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }

    /// Returns true if the expression is the `true` boolean expression
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Value(Value::Bool(true)))
    }

    /// Returns true if the expression is a constant value.
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(..))
    }

    pub fn is_param(&self) -> bool {
        matches!(self, Self::Param(..))
    }

    /// Returns `true` if the expression can be evaluated without an input
    /// row: no column references and no unbound parameters.
    pub fn is_const(&self) -> bool {
        match self {
            Self::Value(_) => true,
            Self::Param(param) => param.value.is_some(),
            Self::Column(_) => false,
            Self::BinaryOp(e) => e.lhs.is_const() && e.rhs.is_const(),
            Self::Cast(e) => e.expr.is_const(),
            Self::Cond(e) => e.cond.is_const() && e.then.is_const() && e.otherwise.is_const(),
            Self::Func(e) => e.args.iter().all(Expr::is_const),
            Self::NaryOp(e) => e.operands.iter().all(Expr::is_const),
            Self::UnaryOp(e) => e.expr.is_const(),
        }
    }

    /// Calls `f` on every column reference in the expression.
    pub fn for_each_column(&self, f: &mut impl FnMut(&ExprColumn)) {
        match self {
            Self::Column(column) => f(column),
            Self::Value(_) | Self::Param(_) => {}
            Self::BinaryOp(e) => {
                e.lhs.for_each_column(f);
                e.rhs.for_each_column(f);
            }
            Self::Cast(e) => e.expr.for_each_column(f),
            Self::Cond(e) => {
                e.cond.for_each_column(f);
                e.then.for_each_column(f);
                e.otherwise.for_each_column(f);
            }
            Self::Func(e) => e.args.iter().for_each(|arg| arg.for_each_column(f)),
            Self::NaryOp(e) => e.operands.iter().for_each(|op| op.for_each_column(f)),
            Self::UnaryOp(e) => e.expr.for_each_column(f),
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::Value(value.into())
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::Value(value.into())
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::Value(value.into())
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::Value(value.into())
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Self::Value(value.into())
    }
}
