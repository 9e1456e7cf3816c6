//! The relay: session resolution + retry loop around the provider.

pub mod retry;

pub use retry::{RetryPolicy, send_with_retry};

use parley_types::error::RelayError;
use parley_types::session::OutboundMessage;

use crate::llm::provider::ChatProvider;
use crate::session::{ClearOutcome, SessionRegistry};

/// Front door for outbound chat traffic.
///
/// Owns the provider, the session registry, and the retry policy.
/// Generic over [`ChatProvider`] so tests can substitute stubs.
pub struct ChatRelay<P: ChatProvider> {
    provider: P,
    registry: SessionRegistry,
    policy: RetryPolicy,
}

impl<P: ChatProvider> ChatRelay<P> {
    pub fn new(provider: P, registry: SessionRegistry, policy: RetryPolicy) -> Self {
        Self {
            provider,
            registry,
            policy,
        }
    }

    /// Send `message` as `user_id` and return the raw reply text.
    ///
    /// Resolves (or creates) the user's session and holds its lock across
    /// the provider call, so concurrent sends from one user serialize.
    /// The exchange is committed to session history only on success.
    pub async fn send(&self, user_id: i64, message: OutboundMessage) -> Result<String, RelayError> {
        let session = self.registry.resolve(user_id);
        let mut state = session.lock().await;

        let reply = retry::send_with_retry(
            &self.provider,
            &state.settings,
            &state.history,
            &message,
            &self.policy,
        )
        .await?;

        state.push_exchange(&message.text, &reply);
        Ok(reply)
    }

    /// Drop the in-memory session for `user_id`. Idempotent.
    pub fn reset(&self, user_id: i64) -> ClearOutcome {
        self.registry.clear(user_id)
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }
}
