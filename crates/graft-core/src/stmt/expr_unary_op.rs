use super::{Expr, UnaryOp};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprUnaryOp {
    pub op: UnaryOp,
    pub expr: Box<Expr>,
}

impl Expr {
    pub fn unary_op(op: UnaryOp, expr: impl Into<Self>) -> Self {
        ExprUnaryOp {
            op,
            expr: Box::new(expr.into()),
        }
        .into()
    }

    pub fn neg(expr: impl Into<Self>) -> Self {
        Expr::unary_op(UnaryOp::Neg, expr)
    }

    pub fn not(expr: impl Into<Self>) -> Self {
        Expr::unary_op(UnaryOp::Not, expr)
    }
}

impl From<ExprUnaryOp> for Expr {
    fn from(value: ExprUnaryOp) -> Self {
        Self::UnaryOp(value)
    }
}
