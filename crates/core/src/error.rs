//! Error types for the TremitiBot domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all TremitiBot operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Generation service errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Knowledge base errors ---
    #[error("Knowledge error: {0}")]
    Knowledge(#[from] KnowledgeError),

    // --- Transcript errors ---
    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider returned an unusable response: {0}")]
    InvalidResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Dataset '{dataset}' not found at {path}")]
    NotFound { dataset: String, path: String },

    #[error("Failed to read dataset '{dataset}': {reason}")]
    Read { dataset: String, reason: String },

    #[error("Failed to parse dataset '{dataset}': {reason}")]
    Parse { dataset: String, reason: String },

    #[error("Dataset '{0}' is not available from this source")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("Transcript storage error: {0}")]
    Storage(String),

    #[error("Transcript sink is closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn knowledge_error_names_dataset() {
        let err = Error::Knowledge(KnowledgeError::Parse {
            dataset: "cale".into(),
            reason: "expected value at line 1".into(),
        });
        assert!(err.to_string().contains("cale"));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn transcript_error_converts_into_top_level() {
        let err: Error = TranscriptError::Closed.into();
        assert!(matches!(err, Error::Transcript(TranscriptError::Closed)));
    }
}
