use thiserror::Error;

/// Errors from repository operations (used by trait definitions in parley-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from the upstream chat provider.
///
/// Only [`ProviderError::AuthenticationFailed`] and
/// [`ProviderError::InvalidRequest`] are hard failures; everything else is
/// treated as transient by the retry loop.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited")]
    RateLimited,

    #[error("provider error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ProviderError {
    /// Whether this failure is non-retryable.
    ///
    /// Hard failures are an HTTP-400-equivalent rejection or bad
    /// credentials; retrying either would only repeat the same refusal.
    pub fn is_hard(&self) -> bool {
        matches!(
            self,
            ProviderError::AuthenticationFailed | ProviderError::InvalidRequest(_)
        )
    }
}

/// Terminal outcomes of the relay's retry loop.
///
/// The `Display` strings are the fixed diagnostics delivered to clients;
/// they must stay stable.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Error 400: Invalid API key. Check the GEMINI_API_KEY environment variable and ensure the key is active.")]
    InvalidCredentials,

    #[error("Error: The AI service failed to respond after multiple retries.")]
    RetriesExhausted,
}
