use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Eq,
    Ne,
    Ge,
    Gt,
    Le,
    Lt,
    /// Right-hand side is a list; true when it contains the left-hand side.
    In,
}

impl BinaryOp {
    pub fn is_eq(self) -> bool {
        matches!(self, Self::Eq)
    }

    /// Operators that can correlate a child with another node's rows.
    pub fn is_correlation(self) -> bool {
        matches!(self, Self::Eq | Self::In)
    }

    /// The operator-object key used in query documents (`$eq`, `$gt`, ...).
    pub fn json_key(self) -> &'static str {
        match self {
            Self::Eq => "$eq",
            Self::Ne => "$ne",
            Self::Ge => "$ge",
            Self::Gt => "$gt",
            Self::Le => "$le",
            Self::Lt => "$lt",
            Self::In => "$in",
        }
    }

    pub fn from_json_key(key: &str) -> Option<BinaryOp> {
        Some(match key {
            "$eq" => Self::Eq,
            "$ne" => Self::Ne,
            "$ge" => Self::Ge,
            "$gt" => Self::Gt,
            "$le" => Self::Le,
            "$lt" => Self::Lt,
            "$in" => Self::In,
            _ => return None,
        })
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOp::*;

        match self {
            Eq => "=".fmt(f),
            Ne => "!=".fmt(f),
            Ge => ">=".fmt(f),
            Gt => ">".fmt(f),
            Le => "<=".fmt(f),
            Lt => "<".fmt(f),
            In => "in".fmt(f),
        }
    }
}

impl fmt::Debug for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
