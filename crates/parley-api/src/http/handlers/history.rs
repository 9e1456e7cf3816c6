//! History read endpoints.
//!
//! GET /api/history?userId=   -- conversation index, most recent first
//! GET /api/history/{chat_id} -- one conversation as alternating turns
//!
//! Persistence failures propagate as 500 here: unlike the chat write
//! path there is no fallback content to serve.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tracing::error;

use parley_types::turn::{SessionSummary, TurnView};

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default, rename = "userId")]
    pub user_id: Option<i64>,
}

/// GET /api/history?userId= -- list a user's conversations.
pub async fn list_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<SessionSummary>>, AppError> {
    let Some(user_id) = query.user_id.filter(|id| *id != 0) else {
        return Err(AppError::Validation("User ID is required.".to_string()));
    };

    let sessions = state.turn_log.list_sessions(user_id).await.map_err(|err| {
        error!(user_id, %err, "failed to load chat history");
        AppError::Database("Failed to load chat history.".to_string())
    })?;

    Ok(Json(sessions))
}

/// GET /api/history/{chat_id} -- fetch one conversation's turns.
pub async fn session_history(
    State(state): State<AppState>,
    Path(chat_id): Path<i64>,
) -> Result<Json<Vec<TurnView>>, AppError> {
    let turns = state.turn_log.session_turns(chat_id).await.map_err(|err| {
        error!(chat_id, %err, "failed to load chat messages");
        AppError::Database("Failed to load chat messages.".to_string())
    })?;

    Ok(Json(turns))
}

#[cfg(test)]
mod tests {
    use super::*;

    use secrecy::SecretString;

    use parley_core::chat::history::MISSING_REPLY;
    use parley_infra::llm::gemini::GeminiProvider;
    use parley_infra::sqlite::pool::DatabasePool;
    use parley_types::turn::Sender;

    async fn test_state() -> AppState {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        std::mem::forget(dir);
        let pool = DatabasePool::new(&url).await.unwrap();
        let provider = GeminiProvider::new(SecretString::from("test-key"))
            .with_base_url("http://127.0.0.1:9".to_string());
        AppState::assemble(pool, provider)
    }

    #[tokio::test]
    async fn test_list_history_requires_user_id() {
        let state = test_state().await;
        let err = list_history(State(state), Query(HistoryQuery { user_id: None }))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_history_returns_openers_newest_first() {
        let state = test_state().await;
        let first = state.turn_log.log_turn(1, None, "first", "a").await.unwrap();
        let second = state.turn_log.log_turn(1, None, "second", "b").await.unwrap();

        let sessions = list_history(
            State(state),
            Query(HistoryQuery { user_id: Some(1) }),
        )
        .await
        .unwrap()
        .0;

        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].chat_id, second);
        assert_eq!(sessions[1].chat_id, first);
    }

    #[tokio::test]
    async fn test_session_history_folds_turns() {
        let state = test_state().await;
        let sid = state.turn_log.log_turn(1, None, "hi", "hello").await.unwrap();

        let turns = session_history(State(state), Path(sid)).await.unwrap().0;
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].sender, Sender::User);
        assert_eq!(turns[0].text, "hi");
        assert_eq!(turns[1].sender, Sender::Ai);
        assert_eq!(turns[1].text, "hello");
    }

    #[tokio::test]
    async fn test_session_history_substitutes_missing_reply() {
        let state = test_state().await;
        let sid = state.turn_log.log_turn(1, None, "hi", "hello").await.unwrap();
        // A user turn whose assistant row never landed.
        sqlx::query(
            "INSERT INTO turns (user_id, session_id, query, response, created_at) \
             VALUES (1, ?, 'bye', '', '2026-01-01T00:00:00+00:00')",
        )
        .bind(sid)
        .execute(&state.db_pool.writer)
        .await
        .unwrap();

        let turns = session_history(State(state), Path(sid)).await.unwrap().0;
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[3].sender, Sender::Ai);
        assert_eq!(turns[3].text, MISSING_REPLY);
    }

    #[tokio::test]
    async fn test_unknown_session_returns_empty_list() {
        let state = test_state().await;
        let turns = session_history(State(state), Path(999)).await.unwrap().0;
        assert!(turns.is_empty());
    }
}
