use super::Expr;

/// A call to a named scalar function.
///
/// Drivers translate these to their native functions. The built-in evaluator
/// knows `lower`, `upper`, `length` and `abs`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprFunc {
    pub name: String,
    pub args: Vec<Expr>,
}

impl Expr {
    pub fn func<I>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        ExprFunc {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
        .into()
    }
}

impl From<ExprFunc> for Expr {
    fn from(value: ExprFunc) -> Self {
        Self::Func(value)
    }
}
