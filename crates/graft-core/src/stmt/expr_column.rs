use super::Expr;

use std::fmt;

/// A reference to a column of a table, by name.
///
/// Inside a `where` map a column reference pointing at another node's table
/// is a cross reference: it correlates this node with that node's rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExprColumn {
    pub table: String,
    pub column: String,
}

/// Parses `"table.column"` into a column reference. Without a dot the whole
/// string is the column and the table is left empty.
pub fn col(path: &str) -> ExprColumn {
    match path.rsplit_once('.') {
        Some((table, column)) => ExprColumn::new(table, column),
        None => ExprColumn::new("", path),
    }
}

impl ExprColumn {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> ExprColumn {
        ExprColumn {
            table: table.into(),
            column: column.into(),
        }
    }
}

impl Expr {
    pub fn column(column: impl Into<ExprColumn>) -> Self {
        Self::Column(column.into())
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column(_))
    }
}

impl From<ExprColumn> for Expr {
    fn from(value: ExprColumn) -> Self {
        Self::Column(value)
    }
}

impl From<&str> for ExprColumn {
    fn from(value: &str) -> Self {
        col(value)
    }
}

impl fmt::Display for ExprColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.table.is_empty() {
            f.write_str(&self.column)
        } else {
            write!(f, "{}.{}", self.table, self.column)
        }
    }
}
