//! Persistent turn records and the read-side views folded from them.
//!
//! The `turns` table is flat and append-only: one row per
//! message-direction. A user turn has a non-empty `query` and an empty
//! `response`; an assistant turn is the reverse. Within a session, rows
//! are totally ordered by `id` and strictly alternate user then
//! assistant -- the history fold depends on that alternation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// A single row of the `turns` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRecord {
    pub id: i64,
    pub user_id: i64,
    /// NULL only during the back-patch window for a conversation's
    /// opening row; afterwards it equals that row's own id.
    pub session_id: Option<i64>,
    pub query: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

/// A turn record before insertion, without a row id.
#[derive(Debug, Clone)]
pub struct NewTurn {
    pub user_id: i64,
    pub session_id: Option<i64>,
    pub query: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

/// Which side of the conversation a folded turn belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Ai => write!(f, "ai"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "ai" => Ok(Sender::Ai),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// One directional message as served to the history view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnView {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// A conversation's opening turn, as listed on the history index.
///
/// `chat_id` is the persistent session identifier; `query` and
/// `timestamp` come from the session's first row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub chat_id: i64,
    pub query: String,
    pub timestamp: DateTime<Utc>,
}
