use super::Error;

/// Error when an expression cannot be evaluated.
#[derive(Debug)]
pub(super) struct ExpressionEvaluationFailedError {
    message: Box<str>,
}

impl std::error::Error for ExpressionEvaluationFailedError {}

impl core::fmt::Display for ExpressionEvaluationFailedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "expression evaluation failed: {}", self.message)
    }
}

impl Error {
    /// Creates an expression evaluation error.
    pub fn expression_evaluation_failed(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ExpressionEvaluationFailed(
            ExpressionEvaluationFailedError {
                message: message.into().into(),
            },
        ))
    }

    /// Creates the error raised when a parameter with no bound value is
    /// evaluated.
    pub fn unbound_parameter(id: &str) -> Error {
        Error::expression_evaluation_failed(format!("parameter `{id}` has no value"))
    }

    /// Returns `true` if this error is an expression evaluation error.
    pub fn is_expression_evaluation_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ExpressionEvaluationFailed(_))
    }
}
