use super::Error;

/// The accumulating result tree did not have the shape the query tree
/// implies. This is always a bug in the engine.
#[derive(Debug)]
pub(super) struct AssemblyInvariantError {
    message: Box<str>,
}

impl std::error::Error for AssemblyInvariantError {}

impl core::fmt::Display for AssemblyInvariantError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "assembly invariant violated: {}", self.message)
    }
}

impl Error {
    /// Creates an assembly invariant error.
    pub fn assembly_invariant(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::AssemblyInvariant(AssemblyInvariantError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an assembly invariant error.
    pub fn is_assembly_invariant(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::AssemblyInvariant(_))
    }
}
