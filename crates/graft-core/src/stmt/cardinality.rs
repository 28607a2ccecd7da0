use serde::{Deserialize, Serialize};

/// How many rows a node is expected to match per parent row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    /// Exactly one row. Zero or more than one is an error.
    One,

    /// Zero or one row; zero becomes null.
    Maybe,

    /// Any number of rows, as a list.
    #[default]
    Many,
}

impl Cardinality {
    pub fn is_many(self) -> bool {
        matches!(self, Cardinality::Many)
    }

    /// Human readable expectation, used in cardinality errors.
    pub fn expectation(self) -> &'static str {
        match self {
            Cardinality::One => "exactly one row",
            Cardinality::Maybe => "at most one row",
            Cardinality::Many => "any number of rows",
        }
    }
}
