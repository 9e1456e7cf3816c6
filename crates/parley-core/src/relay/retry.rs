//! Bounded retry with exponential backoff around a single provider call.
//!
//! The one place with real failure-handling design: bounded retries,
//! a doubling delay schedule, fail-fast on classified hard errors, and
//! "empty result" vs "thrown error" both retryable but logged apart.

use std::time::Duration;

use tracing::{debug, error, warn};

use parley_types::error::RelayError;
use parley_types::session::{HistoryEntry, OutboundMessage, SessionSettings};

use crate::llm::provider::ChatProvider;

/// Default attempt bound: the initial call plus at most one retry.
pub const MAX_RETRIES: u32 = 2;

/// Default first backoff delay.
pub const BASE_DELAY: Duration = Duration::from_millis(5000);

/// Attempt bound and backoff base for [`send_with_retry`].
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_RETRIES,
            base_delay: BASE_DELAY,
        }
    }
}

/// Call the provider until it yields a non-empty reply or the policy is
/// exhausted.
///
/// - a non-empty (trimmed) reply is final and returned immediately;
/// - an empty-but-`Ok` reply is a transient failure;
/// - a hard error (see [`parley_types::error::ProviderError::is_hard`])
///   aborts at once with the fixed invalid-credentials diagnostic;
/// - any other error is transient;
/// - after a transient failure with attempts remaining, sleeps
///   `base_delay * 2^(attempt-1)` -- attempt 1 waits `base_delay`.
pub async fn send_with_retry<P: ChatProvider>(
    provider: &P,
    settings: &SessionSettings,
    history: &[HistoryEntry],
    message: &OutboundMessage,
    policy: &RetryPolicy,
) -> Result<String, RelayError> {
    let mut attempt = 0;
    while attempt < policy.max_attempts {
        match provider.generate(settings, history, message).await {
            Ok(reply) if !reply.trim().is_empty() => return Ok(reply),
            Ok(_) => {
                warn!(
                    attempt = attempt + 1,
                    provider = provider.name(),
                    "empty reply from provider, retrying"
                );
            }
            Err(err) if err.is_hard() => {
                error!(provider = provider.name(), %err, "hard provider failure, aborting");
                return Err(RelayError::InvalidCredentials);
            }
            Err(err) => {
                warn!(
                    attempt = attempt + 1,
                    provider = provider.name(),
                    %err,
                    "transient provider failure"
                );
            }
        }

        attempt += 1;
        if attempt < policy.max_attempts {
            let delay = policy.base_delay * 2u32.pow(attempt - 1);
            debug!(delay_ms = delay.as_millis() as u64, "backing off before next attempt");
            tokio::time::sleep(delay).await;
        }
    }

    Err(RelayError::RetriesExhausted)
}
