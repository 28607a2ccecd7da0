use super::{Expr, NaryOp};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprNaryOp {
    pub op: NaryOp,
    pub operands: Vec<Expr>,
}

impl Expr {
    pub fn nary_op<I>(op: NaryOp, operands: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        ExprNaryOp {
            op,
            operands: operands.into_iter().map(Into::into).collect(),
        }
        .into()
    }

    /// `and` of all operands. An empty conjunction is `true` and a single
    /// operand is returned as is.
    pub fn and_from_vec(mut operands: Vec<Expr>) -> Self {
        match operands.len() {
            0 => true.into(),
            1 => operands.remove(0),
            _ => Expr::nary_op(NaryOp::And, operands),
        }
    }

    pub fn and(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Expr::nary_op(NaryOp::And, [lhs.into(), rhs.into()])
    }

    pub fn or(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Expr::nary_op(NaryOp::Or, [lhs.into(), rhs.into()])
    }

    pub fn coalesce<I>(operands: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Expr::nary_op(NaryOp::Coalesce, operands)
    }
}

impl From<ExprNaryOp> for Expr {
    fn from(value: ExprNaryOp) -> Self {
        Self::NaryOp(value)
    }
}
