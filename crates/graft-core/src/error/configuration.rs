use super::Error;

/// The request cannot be executed as written. Raised before any backend
/// query runs and never retried.
#[derive(Debug)]
pub(super) struct ConfigurationError {
    message: Box<str>,
}

impl std::error::Error for ConfigurationError {}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid configuration: {}", self.message)
    }
}

impl Error {
    fn configuration(message: String) -> Error {
        Error::from(super::ErrorKind::Configuration(ConfigurationError {
            message: message.into(),
        }))
    }

    /// Includes under one parent reference each other in a cycle.
    pub fn cyclic_reference<I, S>(fields: I) -> Error
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fields = fields
            .into_iter()
            .map(|field| field.as_ref().to_string())
            .collect::<Vec<_>>();
        Error::configuration(format!(
            "cyclic reference between includes [{}]",
            fields.join(", ")
        ))
    }

    /// A node references a table that is neither a sibling nor an ancestor,
    /// or a column the referenced node does not select.
    pub fn unresolved_reference(node: &str, reference: impl core::fmt::Display) -> Error {
        Error::configuration(format!(
            "`{node}` references `{reference}`, which is not a sibling or ancestor"
        ))
    }

    /// A parameter slot has neither an inline value nor a supplied one.
    pub fn missing_parameter(id: &str) -> Error {
        Error::configuration(format!("missing value for parameter `{id}`"))
    }

    /// The grouping key of a node does not line up with its selection or its
    /// correlated columns.
    pub fn malformed_grouping_key(node: &str, reason: impl core::fmt::Display) -> Error {
        Error::configuration(format!("malformed grouping key on `{node}`: {reason}"))
    }

    /// Any other structural problem with a query document.
    pub fn invalid_query(message: impl Into<String>) -> Error {
        Error::configuration(message.into())
    }

    /// Returns `true` if this error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Configuration(_))
    }
}
