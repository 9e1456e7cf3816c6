//! Chat endpoints.
//!
//! POST /api/chat       -- relay one user message to the model
//! POST /api/chat/reset -- drop the user's in-memory session
//!
//! The chat flow: validate -> resolve session -> retry-wrapped provider
//! call -> sanitize -> best-effort two-row logging -> reply. A logging
//! failure never fails the request; the client still receives the text
//! with a null `chatId`.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use parley_core::sanitize;
use parley_core::session::ClearOutcome;
use parley_types::session::{InlineAttachment, OutboundMessage};

use crate::http::error::AppError;
use crate::http::handlers::{MessageResponse, effective_user_id, parse_body};
use crate::state::AppState;

/// Request body for the chat endpoint. Every field is optional at the
/// serde layer; validation happens in the handler so the error bodies
/// stay fixed.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default, rename = "userId")]
    pub user_id: Option<i64>,
    /// Base64-encoded inline image payload.
    #[serde(default)]
    pub image_data: Option<String>,
    /// Declared media type for `image_data`.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Continue an existing conversation instead of opening a new one.
    #[serde(default, rename = "currentSessionId")]
    pub current_session_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    /// Resolved session id; null when best-effort logging failed.
    #[serde(rename = "chatId")]
    pub chat_id: Option<i64>,
}

/// POST /api/chat -- main chat interaction.
pub async fn chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let body: ChatRequest = parse_body(&body);

    let query = body.query.unwrap_or_default();
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::EmptyQuery);
    }

    let user_id = effective_user_id(body.user_id);
    let attachment = decode_attachment(body.image_data, body.mime_type)?;

    let raw = state
        .relay
        .send(
            user_id,
            OutboundMessage {
                text: query.to_string(),
                attachment,
            },
        )
        .await?;

    let display = sanitize::clean(&raw);

    // Best-effort: a None here means logging failed but the reply is
    // still delivered.
    let chat_id = state
        .turn_log
        .log_turn(user_id, body.current_session_id, query, &display)
        .await;

    Ok(Json(ChatResponse {
        response: display,
        chat_id,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct ResetRequest {
    #[serde(default, rename = "userId")]
    pub user_id: Option<i64>,
}

/// POST /api/chat/reset -- drop the in-memory session.
///
/// Both outcomes are 200: clearing an absent session is not an error.
pub async fn reset_chat(State(state): State<AppState>, body: Bytes) -> Json<MessageResponse> {
    let body: ResetRequest = parse_body(&body);
    let user_id = effective_user_id(body.user_id);

    let message = match state.relay.reset(user_id) {
        ClearOutcome::Cleared => "Session cleared.",
        ClearOutcome::NotFound => "No session found to clear.",
    };
    Json(MessageResponse::new(message))
}

fn decode_attachment(
    image_data: Option<String>,
    mime_type: Option<String>,
) -> Result<Option<InlineAttachment>, AppError> {
    let Some(encoded) = image_data.filter(|d| !d.is_empty()) else {
        return Ok(None);
    };

    let data = BASE64
        .decode(encoded.as_bytes())
        .map_err(|_| AppError::Validation("image_data is not valid base64.".to_string()))?;

    Ok(Some(InlineAttachment {
        data,
        mime_type: mime_type.unwrap_or_else(|| "image/png".to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use secrecy::SecretString;
    use serde_json::json;

    use parley_infra::llm::gemini::GeminiProvider;
    use parley_infra::sqlite::pool::DatabasePool;

    /// Real state with a throwaway database and a provider pointed at a
    /// closed local port; tests here never reach the provider.
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
    async fn test_empty_body_rejected_before_any_external_call() {
        let state = test_state().await;
        let err = chat(State(state), Bytes::new()).await.err().unwrap();
        assert!(matches!(err, AppError::EmptyQuery));
    }

    #[tokio::test]
    async fn test_whitespace_query_rejected() {
        let state = test_state().await;
        let err = chat(State(state), body(json!({ "query": "   " })))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::EmptyQuery));
    }

    #[tokio::test]
    async fn test_bad_base64_attachment_rejected() {
        let state = test_state().await;
        let err = chat(
            State(state),
            body(json!({
                "query": "what is this",
                "image_data": "not base64!!!",
                "mime_type": "image/png",
            })),
        )
        .await
        .err()
        .unwrap();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_reset_reports_both_outcomes() {
        let state = test_state().await;

        let reply = reset_chat(State(state.clone()), Bytes::new()).await;
        assert_eq!(reply.0.message, "No session found to clear.");

        state.relay.registry().resolve(1);
        let reply = reset_chat(State(state), body(json!({ "userId": 1 }))).await;
        assert_eq!(reply.0.message, "Session cleared.");
    }

    #[test]
    fn test_effective_user_id_defaults() {
        assert_eq!(effective_user_id(None), 1);
        assert_eq!(effective_user_id(Some(0)), 1);
        assert_eq!(effective_user_id(Some(7)), 7);
    }

    #[test]
    fn test_attachment_decodes_standard_base64() {
        let attachment = decode_attachment(Some("3q2+7w==".to_string()), None)
            .unwrap()
            .unwrap();
        assert_eq!(attachment.data, vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(attachment.mime_type, "image/png");
    }
}
