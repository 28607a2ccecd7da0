use std::fmt;

/// Operators applied to a variable number of operands.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum NaryOp {
    And,
    Or,
    /// First operand that is not null
    Coalesce,
}

impl fmt::Display for NaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NaryOp::And => "and".fmt(f),
            NaryOp::Or => "or".fmt(f),
            NaryOp::Coalesce => "coalesce".fmt(f),
        }
    }
}

impl fmt::Debug for NaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
