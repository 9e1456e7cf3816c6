//! Application error type mapping to HTTP status codes and body shapes.
//!
//! The chat endpoint reports errors in a `response` field (the same field
//! that carries a successful reply); every other endpoint uses `message`.
//! Both shapes are fixed by the browser client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use parley_types::error::RelayError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Chat request arrived without a usable query. Rejected before any
    /// external call.
    EmptyQuery,
    /// A required field is missing or malformed.
    Validation(String),
    /// The relay gave up: invalid credentials or exhausted retries.
    Relay(RelayError),
    /// A read-path or feedback persistence failure with no fallback
    /// content to serve.
    Database(String),
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        AppError::Relay(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::EmptyQuery => (
                StatusCode::BAD_REQUEST,
                json!({ "response": "Query cannot be empty." }),
            ),
            AppError::Validation(message) => {
                (StatusCode::BAD_REQUEST, json!({ "message": message }))
            }
            AppError::Relay(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "response": err.to_string() }),
            ),
            AppError::Database(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "message": message }))
            }
        };

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_empty_query_is_400_with_fixed_response() {
        let response = AppError::EmptyQuery.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["response"], "Query cannot be empty.");
    }

    #[tokio::test]
    async fn test_relay_errors_are_500_in_response_field() {
        let response = AppError::Relay(RelayError::RetriesExhausted).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(
            json["response"],
            "Error: The AI service failed to respond after multiple retries."
        );
    }

    #[tokio::test]
    async fn test_validation_uses_message_field() {
        let response =
            AppError::Validation("User ID and rating are required.".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["message"], "User ID and rating are required.");
    }
}
