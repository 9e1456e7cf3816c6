//! ChatProvider trait definition.
//!
//! This is the core abstraction over the external generative-AI service.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).
//! The concrete implementation lives in parley-infra (`GeminiProvider`);
//! tests substitute stubs.

use parley_types::error::ProviderError;
use parley_types::session::{HistoryEntry, OutboundMessage, SessionSettings};

/// A single outbound call to the upstream chat API.
///
/// The provider is stateless: the session's accumulated history is passed
/// in on every call and the new exchange is committed by the caller only
/// after success, so retries never duplicate context.
pub trait ChatProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send `message` in the context of `history` and return the reply text.
    ///
    /// An empty reply is a valid `Ok` -- the retry layer decides whether
    /// to treat it as a transient failure.
    fn generate(
        &self,
        settings: &SessionSettings,
        history: &[HistoryEntry],
        message: &OutboundMessage,
    ) -> impl std::future::Future<Output = Result<String, ProviderError>> + Send;
}
