//! HTTP request handlers.

pub mod chat;
pub mod feedback;
pub mod history;

use axum::body::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Plain `{"message": ...}` reply used by reset and feedback endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Parse a JSON request body leniently: an empty or malformed body
/// yields the type's default, so field validation -- not the JSON
/// parser -- drives the fixed error messages the browser client expects.
pub(crate) fn parse_body<T: DeserializeOwned + Default>(bytes: &Bytes) -> T {
    serde_json::from_slice(bytes).unwrap_or_default()
}

/// Client-supplied user ids default to 1 when absent or zero.
pub(crate) fn effective_user_id(user_id: Option<i64>) -> i64 {
    match user_id {
        Some(id) if id != 0 => id,
        _ => 1,
    }
}
