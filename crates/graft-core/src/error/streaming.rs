use super::Error;

/// Marks a failure that happened after the response started streaming.
#[derive(Debug)]
pub(super) struct StreamingError;

impl std::error::Error for StreamingError {}

impl core::fmt::Display for StreamingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("stream interrupted")
    }
}

impl Error {
    /// Wraps `cause` as a streaming error. Transports report these in-band
    /// since the response status has already been sent.
    pub fn streaming(cause: Error) -> Error {
        cause.context(Error::from(super::ErrorKind::Streaming(StreamingError)))
    }

    /// Returns `true` if this error is a streaming error.
    pub fn is_streaming(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Streaming(_))
    }
}
