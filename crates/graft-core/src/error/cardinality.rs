use super::Error;

/// A `one` or `maybe` node matched the wrong number of rows.
#[derive(Debug)]
pub(super) struct CardinalityError {
    node: Box<str>,
    expected: &'static str,
    count: usize,
}

impl std::error::Error for CardinalityError {}

impl core::fmt::Display for CardinalityError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "cardinality violation at `{}`: expected {}, found {}",
            self.node, self.expected, self.count
        )
    }
}

impl Error {
    /// Creates a cardinality error for the node identified by `node`.
    pub fn cardinality(node: impl Into<String>, expected: &'static str, count: usize) -> Error {
        Error::from(super::ErrorKind::Cardinality(CardinalityError {
            node: node.into().into(),
            expected,
            count,
        }))
    }

    /// Returns `true` if this error is a cardinality error.
    pub fn is_cardinality(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Cardinality(_))
    }
}
