//! Error taxonomy for machine translation calls.

/// Errors produced while talking to a translation provider.
#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    /// Caller supplied unusable input (e.g. empty text). No request was sent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The request payload could not be built or serialized.
    #[error("Failed to build request: {0}")]
    RequestBuildFailed(String),

    /// Network-level failure: connect, timeout, or body read.
    #[error("Failed to reach translation provider: {0}")]
    TransportFailed(#[from] reqwest::Error),

    /// The provider answered with a non-200 status.
    #[error("Translation provider returned status {status}: {body}")]
    ProviderError { status: u16, body: String },

    /// The provider answered 200 but the body was not what we expect.
    #[error("Failed to parse provider response: {0}")]
    ResponseParseFailed(String),

    /// The caller's cancellation signal fired before the call completed.
    #[error("Translation cancelled")]
    Cancelled,
}

impl TranslationError {
    /// True for the failures that originate in the provider round-trip,
    /// as opposed to bad input or caller cancellation.
    pub fn is_translation_failure(&self) -> bool {
        matches!(
            self,
            TranslationError::RequestBuildFailed(_)
                | TranslationError::TransportFailed(_)
                | TranslationError::ProviderError { .. }
                | TranslationError::ResponseParseFailed(_)
        )
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(err: serde_json::Error) -> Self {
        TranslationError::ResponseParseFailed(err.to_string())
    }
}

/// Result type for translation operations
pub type MtResult<T> = Result<T, TranslationError>;
