//! Turn log service: best-effort two-row persistence of each exchange
//! and the read paths folded from it.

use chrono::Utc;
use tracing::{info, warn};

use parley_types::error::RepositoryError;
use parley_types::turn::{NewTurn, SessionSummary, TurnView};

use crate::chat::history;
use crate::chat::repository::TurnRepository;

/// Persists conversation turns and reconstructs history.
///
/// Generic over [`TurnRepository`] to keep the core free of database
/// dependencies.
pub struct TurnLog<R: TurnRepository> {
    repo: R,
}

impl<R: TurnRepository> TurnLog<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persist one exchange as a user-turn row and an assistant-turn row,
    /// resolving the session id on the way.
    ///
    /// A `None` session means a new conversation: the opening row is
    /// inserted with a NULL session id, then back-patched to point at its
    /// own row id, which becomes the conversation's identifier. A
    /// `Some` session skips the back-patch entirely.
    ///
    /// Logging is best-effort: any persistence failure is caught and
    /// logged, and `None` is returned so the caller can still deliver the
    /// reply. Availability wins over durability on this path.
    pub async fn log_turn(
        &self,
        user_id: i64,
        session_id: Option<i64>,
        query: &str,
        response: &str,
    ) -> Option<i64> {
        match self.write_exchange(user_id, session_id, query, response).await {
            Ok(resolved) => {
                info!(user_id, session_id = resolved, "exchange logged");
                Some(resolved)
            }
            Err(err) => {
                warn!(user_id, %err, "turn logging failed; reply still delivered");
                None
            }
        }
    }

    async fn write_exchange(
        &self,
        user_id: i64,
        session_id: Option<i64>,
        query: &str,
        response: &str,
    ) -> Result<i64, RepositoryError> {
        let resolved = match session_id {
            Some(sid) => {
                self.repo
                    .insert_turn(&NewTurn {
                        user_id,
                        session_id: Some(sid),
                        query: query.to_string(),
                        response: String::new(),
                        created_at: Utc::now(),
                    })
                    .await?;
                sid
            }
            None => {
                let row_id = self
                    .repo
                    .insert_turn(&NewTurn {
                        user_id,
                        session_id: None,
                        query: query.to_string(),
                        response: String::new(),
                        created_at: Utc::now(),
                    })
                    .await?;
                self.repo.assign_session_id(row_id).await?;
                row_id
            }
        };

        self.repo
            .insert_turn(&NewTurn {
                user_id,
                session_id: Some(resolved),
                query: String::new(),
                response: response.to_string(),
                created_at: Utc::now(),
            })
            .await?;

        Ok(resolved)
    }

    /// Conversations belonging to `user_id`, most recent first.
    pub async fn list_sessions(
        &self,
        user_id: i64,
    ) -> Result<Vec<SessionSummary>, RepositoryError> {
        let rows = self.repo.first_turns_by_user(user_id).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                row.session_id.map(|sid| SessionSummary {
                    chat_id: sid,
                    query: row.query,
                    timestamp: row.created_at,
                })
            })
            .collect())
    }

    /// The full conversation for `session_id` as alternating turns.
    pub async fn session_turns(
        &self,
        session_id: i64,
    ) -> Result<Vec<TurnView>, RepositoryError> {
        let rows = self.repo.turns_by_session(session_id).await?;
        Ok(history::fold_turns(&rows))
    }
}
