//! Error types for page fetching

/// Failure reported by a [`PageFetcher`](crate::PageFetcher)
///
/// Fetch failures are never fatal: loaders log them, keep their previous
/// state and clear their loading flag so the user can retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Network or transport failure
    #[error("transport error: {0}")]
    Transport(String),

    /// Server answered with a non-success status
    #[error("server returned {code}: {message}")]
    Status {
        /// Status code
        code: u16,
        /// Server supplied message
        message: String,
    },

    /// Response body could not be decoded into a page
    #[error("decode error: {0}")]
    Decode(String),

    /// Request did not complete in time
    #[error("request timed out after {duration_ms}ms")]
    Timeout {
        /// Elapsed time before giving up
        duration_ms: u64,
    },
}

impl FetchError {
    /// Create transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create status error
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::Status {
            code,
            message: message.into(),
        }
    }

    /// Check if a retry has a reasonable chance of succeeding
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout { .. } => true,
            Self::Status { code, .. } => *code >= 500 || *code == 429,
            Self::Decode(_) => false,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
