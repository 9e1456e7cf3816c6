//! Feedback endpoints.
//!
//! POST /api/feedback/comment -- rating plus optional free-text comment
//! POST /api/feedback/rate    -- rating against a specific conversation
//!
//! Unlike the chat write path, persistence failures here are surfaced:
//! there is nothing else to deliver.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde::Deserialize;
use tracing::error;

use parley_types::feedback::Rating;

use crate::http::error::AppError;
use crate::http::handlers::{MessageResponse, parse_body};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CommentRequest {
    #[serde(default, rename = "userId")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// POST /api/feedback/comment
pub async fn submit_comment(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    let body: CommentRequest = parse_body(&body);

    let (Some(user_id), Some(rating)) = (
        body.user_id.filter(|id| *id != 0),
        body.rating.filter(|r| !r.is_empty()),
    ) else {
        return Err(AppError::Validation(
            "User ID and rating are required.".to_string(),
        ));
    };
    let rating = parse_rating(&rating)?;

    state
        .feedback
        .record_comment(user_id, rating, body.comment)
        .await
        .map_err(|err| {
            error!(user_id, %err, "failed to log feedback comment");
            AppError::Database("Failed to log feedback to database.".to_string())
        })?;

    Ok(Json(MessageResponse::new("Feedback logged successfully.")))
}

#[derive(Debug, Default, Deserialize)]
pub struct RateRequest {
    #[serde(default, rename = "userId")]
    pub user_id: Option<i64>,
    #[serde(default, rename = "chatId")]
    pub chat_id: Option<i64>,
    #[serde(default)]
    pub rating: Option<String>,
}

/// POST /api/feedback/rate
pub async fn submit_rating(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    let body: RateRequest = parse_body(&body);

    let (Some(user_id), Some(chat_id), Some(rating)) = (
        body.user_id.filter(|id| *id != 0),
        body.chat_id.filter(|id| *id != 0),
        body.rating.filter(|r| !r.is_empty()),
    ) else {
        return Err(AppError::Validation(
            "User ID, Chat ID, and rating are required.".to_string(),
        ));
    };
    let rating = parse_rating(&rating)?;

    state
        .feedback
        .record_rating(user_id, chat_id, rating)
        .await
        .map_err(|err| {
            error!(user_id, chat_id, %err, "failed to log rating");
            AppError::Database("Failed to log rating to database.".to_string())
        })?;

    Ok(Json(MessageResponse::new("Rating logged successfully.")))
}

fn parse_rating(raw: &str) -> Result<Rating, AppError> {
    raw.parse()
        .map_err(|_| AppError::Validation("Rating must be 'up' or 'down'.".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use secrecy::SecretString;
    use serde_json::json;

    use parley_infra::llm::gemini::GeminiProvider;
    use parley_infra::sqlite::pool::DatabasePool;

    async fn test_state() -> AppState {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        std::mem::forget(dir);
        let pool = DatabasePool::new(&url).await.unwrap();
        let provider = GeminiProvider::new(SecretString::from("test-key"))
            .with_base_url("http://127.0.0.1:9".to_string());
        AppState::assemble(pool, provider)
    }

    fn body(value: serde_json::Value) -> Bytes {
        Bytes::from(serde_json::to_vec(&value).unwrap())
    }

    #[tokio::test]
    async fn test_comment_requires_user_and_rating() {
        let state = test_state().await;

        let err = submit_comment(State(state.clone()), Bytes::new())
            .await
            .err()
            .unwrap();
        match err {
            AppError::Validation(msg) => assert_eq!(msg, "User ID and rating are required."),
            other => panic!("expected validation error, got {other:?}"),
        }

        let missing_rating = body(json!({ "userId": 1, "comment": "no rating" }));
        assert!(submit_comment(State(state), missing_rating).await.is_err());
    }

    #[tokio::test]
    async fn test_comment_happy_path_inserts_row() {
        let state = test_state().await;

        let reply = submit_comment(
            State(state.clone()),
            body(json!({ "userId": 1, "rating": "up", "comment": "great" })),
        )
        .await
        .unwrap();
        assert_eq!(reply.0.message, "Feedback logged successfully.");

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM feedback")
            .fetch_one(&state.db_pool.reader)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_rate_requires_all_fields() {
        let state = test_state().await;

        let err = submit_rating(
            State(state),
            body(json!({ "userId": 1, "rating": "down" })),
        )
        .await
        .err()
        .unwrap();
        match err {
            AppError::Validation(msg) => {
                assert_eq!(msg, "User ID, Chat ID, and rating are required.")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rate_happy_path() {
        let state = test_state().await;

        let reply = submit_rating(
            State(state.clone()),
            body(json!({ "userId": 1, "chatId": 5, "rating": "down" })),
        )
        .await
        .unwrap();
        assert_eq!(reply.0.message, "Rating logged successfully.");

        let (session_id,): (Option<i64>,) =
            sqlx::query_as("SELECT session_id FROM feedback LIMIT 1")
                .fetch_one(&state.db_pool.reader)
                .await
                .unwrap();
        assert_eq!(session_id, Some(5));
    }

    #[tokio::test]
    async fn test_unknown_rating_rejected() {
        let state = test_state().await;

        let err = submit_rating(
            State(state),
            body(json!({ "userId": 1, "chatId": 5, "rating": "sideways" })),
        )
        .await
        .err()
        .unwrap();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
