use super::{Error, ErrorKind};
use std::sync::Arc;

/// Error surfaced by a backend driver.
#[derive(Debug)]
pub(super) struct BackendError {
    /// Plan node whose query failed
    node: Option<String>,
    inner: Arc<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for BackendError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("backend error")?;
        if let Some(node) = &self.node {
            write!(f, " at `{node}`")?;
        }
        f.write_str(": ")?;
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error from a backend failure (connection loss, constraint
    /// or type error, timeout).
    ///
    /// The engine never retries these; retry policy belongs to the driver.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(ErrorKind::Backend(BackendError {
            node: None,
            inner: Arc::new(err),
        }))
    }

    /// Attributes a failure surfaced by a driver to the query of plan node
    /// `node`.
    ///
    /// A bare backend error keeps its cause. Any other error becomes the
    /// cause of a new backend error.
    pub fn backend_at(self, node: impl Into<String>) -> Error {
        let has_context = self
            .inner
            .as_ref()
            .is_some_and(|inner| inner.cause.is_some());

        let kept = match self.kind() {
            ErrorKind::Backend(err) if !has_context => Some(err.inner.clone()),
            _ => None,
        };

        let inner: Arc<dyn std::error::Error + Send + Sync> = match kept {
            Some(inner) => inner,
            None => Arc::new(self),
        };

        Error::from(ErrorKind::Backend(BackendError {
            node: Some(node.into()),
            inner,
        }))
    }

    /// Returns `true` if this error is a backend error.
    pub fn is_backend(&self) -> bool {
        matches!(self.kind(), ErrorKind::Backend(_))
    }
}

