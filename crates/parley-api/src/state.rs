//! Application state wiring all services together.
//!
//! Services are generic over repository/provider traits, but AppState
//! pins them to the concrete infra implementations.

use std::sync::Arc;

use secrecy::SecretString;

use parley_core::chat::TurnLog;
use parley_core::feedback::FeedbackLog;
use parley_core::relay::{ChatRelay, RetryPolicy};
use parley_core::session::SessionRegistry;
use parley_infra::llm::gemini::GeminiProvider;
use parley_infra::sqlite::feedback::SqliteFeedbackRepository;
use parley_infra::sqlite::pool::DatabasePool;
use parley_infra::sqlite::turn::SqliteTurnRepository;
use parley_types::session::SessionSettings;

/// Concrete type aliases for the service generics pinned to infra
/// implementations.
pub type ConcreteRelay = ChatRelay<GeminiProvider>;
pub type ConcreteTurnLog = TurnLog<SqliteTurnRepository>;
pub type ConcreteFeedbackLog = FeedbackLog<SqliteFeedbackRepository>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ConcreteRelay>,
    pub turn_log: Arc<ConcreteTurnLog>,
    pub feedback: Arc<ConcreteFeedbackLog>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to the database, build
    /// the provider, wire services.
    pub async fn init(database_url: &str, api_key: SecretString) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::new(database_url).await?;
        let provider = GeminiProvider::new(api_key);
        Ok(Self::assemble(db_pool, provider))
    }

    /// Wire services around an existing pool and provider.
    ///
    /// Split out from [`AppState::init`] so tests can inject a throwaway
    /// database and a provider pointed at a stub endpoint.
    pub fn assemble(db_pool: DatabasePool, provider: GeminiProvider) -> Self {
        let registry = SessionRegistry::new(SessionSettings::default());
        let relay = ChatRelay::new(provider, registry, RetryPolicy::default());
        let turn_log = TurnLog::new(SqliteTurnRepository::new(db_pool.clone()));
        let feedback = FeedbackLog::new(SqliteFeedbackRepository::new(db_pool.clone()));

        Self {
            relay: Arc::new(relay),
            turn_log: Arc::new(turn_log),
            feedback: Arc::new(feedback),
            db_pool,
        }
    }
}
