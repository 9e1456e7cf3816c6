//! Feedback records: a rating with an optional comment, write-only from
//! the relay's perspective.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// User verdict on a response or on the assistant overall.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (rating IN ('up', 'down'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Up,
    Down,
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Up => write!(f, "up"),
            Rating::Down => write!(f, "down"),
        }
    }
}

impl FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Rating::Up),
            "down" => Ok(Rating::Down),
            other => Err(format!("invalid rating: '{other}'")),
        }
    }
}

/// A feedback entry before insertion.
#[derive(Debug, Clone)]
pub struct FeedbackRecord {
    pub user_id: i64,
    /// The rated conversation, absent for free-floating comments.
    pub session_id: Option<i64>,
    pub rating: Rating,
    pub comment: Option<String>,
}
