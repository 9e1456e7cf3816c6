//! Wire types for the Gemini `generateContent` endpoint.
//!
//! Field names follow the API's camelCase JSON. Request construction
//! replays the session history as alternating `user`/`model` contents,
//! attaches the system instruction separately, and caps generation via
//! `generationConfig.maxOutputTokens`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use parley_types::session::{HistoryEntry, HistoryRole, OutboundMessage, SessionSettings};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }
}

/// Base64-encoded binary payload with its declared media type.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentRequest {
    /// Assemble the request body from session settings, accumulated
    /// history, and the new user message.
    pub fn build(
        settings: &SessionSettings,
        history: &[HistoryEntry],
        message: &OutboundMessage,
    ) -> Self {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|entry| Content {
                role: Some(role_name(entry.role).to_string()),
                parts: vec![Part::text(entry.text.clone())],
            })
            .collect();

        let mut parts = vec![Part::text(message.text.clone())];
        if let Some(attachment) = &message.attachment {
            parts.push(Part {
                text: None,
                inline_data: Some(InlineData {
                    mime_type: attachment.mime_type.clone(),
                    data: BASE64.encode(&attachment.data),
                }),
            });
        }
        contents.push(Content {
            role: Some("user".to_string()),
            parts,
        });

        Self {
            contents,
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part::text(settings.system_instruction.clone())],
            }),
            generation_config: Some(GenerationConfig {
                max_output_tokens: settings.max_output_tokens,
            }),
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts; empty when the
    /// response carries no candidates or no text.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

fn role_name(role: HistoryRole) -> &'static str {
    match role {
        HistoryRole::User => "user",
        HistoryRole::Model => "model",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use parley_types::session::InlineAttachment;

    fn settings() -> SessionSettings {
        SessionSettings::default()
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request =
            GenerateContentRequest::build(&settings(), &[], &OutboundMessage::text("hi"));
        let json = serde_json::to_value(&request).unwrap();

        assert!(json.get("systemInstruction").is_some());
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 400);
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
    }

    #[test]
    fn test_request_replays_history_in_order() {
        let history = vec![
            HistoryEntry {
                role: HistoryRole::User,
                text: "hi".to_string(),
            },
            HistoryEntry {
                role: HistoryRole::Model,
                text: "hello".to_string(),
            },
        ];
        let request =
            GenerateContentRequest::build(&settings(), &history, &OutboundMessage::text("more"));
        let json = serde_json::to_value(&request).unwrap();

        let contents = json["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["parts"][0]["text"], "more");
    }

    #[test]
    fn test_attachment_becomes_inline_data_part() {
        let message = OutboundMessage {
            text: "what is this".to_string(),
            attachment: Some(InlineAttachment {
                data: vec![0xde, 0xad, 0xbe, 0xef],
                mime_type: "image/png".to_string(),
            }),
        };
        let request = GenerateContentRequest::build(&settings(), &[], &message);
        let json = serde_json::to_value(&request).unwrap();

        let parts = json["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[1]["inlineData"]["data"], "3q2+7w==");
        assert!(parts[0].get("inlineData").is_none());
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let raw = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "Hello"}, {"text": ", world"}]
                }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text(), "Hello, world");
    }

    #[test]
    fn test_response_without_candidates_is_empty() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), "");
    }
}
