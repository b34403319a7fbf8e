//! Error types for the option cache

use pcat_option::FetchError;
use std::sync::Arc;

/// Errors during cache loads
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    /// No fetcher registered for the key
    #[error("no fetcher registered for key: '{0}'")]
    UnknownKey(String),

    /// The single shared fetch for the key failed
    ///
    /// Shared by every caller that waited on the same load.
    #[error("fetch failed: {0}")]
    Fetch(Arc<FetchError>),
}

impl CacheError {
    /// Check if calling `ensure_loaded` again may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::UnknownKey(_) => false,
            Self::Fetch(err) => err.is_retryable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_display() {
        let err = CacheError::UnknownKey("cabin".to_string());
        assert_eq!(err.to_string(), "no fetcher registered for key: 'cabin'");
        assert!(!err.is_retryable());
    }

    #[test]
    fn fetch_error_retryability_passes_through() {
        let err = CacheError::Fetch(Arc::new(FetchError::transport("reset")));
        assert!(err.is_retryable());
        assert!(err.to_string().contains("transport error"));
    }
}
