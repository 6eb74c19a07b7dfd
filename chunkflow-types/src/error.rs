//! Error types for the chunkflow crates.

/// Errors from consuming a provider stream.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The underlying transport failed mid-stream (connection reset,
    /// body read error, etc.).
    #[error("transport error: {0}")]
    Transport(String),
    /// A byte chunk was not valid UTF-8.
    #[error("utf-8 decode error: {0}")]
    Utf8(String),
    /// A provider payload could not be interpreted by the adapter.
    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl StreamError {
    /// Whether this error is likely transient and the request can be retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
