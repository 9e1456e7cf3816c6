//! Folding flat turn rows back into an ordered conversation.
//!
//! The fold is positional: it trusts the alternation invariant of the
//! turn table (user row, assistant row, user row, ...). A write path
//! that inserted consecutive same-sender rows would mis-pair here; that
//! latent risk is recorded in DESIGN.md rather than papered over.

use parley_types::turn::{Sender, TurnRecord, TurnView};

/// Substitute assistant text when a user turn has no partner row.
pub const MISSING_REPLY: &str = "AI response missing";

/// Fold session rows (ordered by row id ascending) into alternating
/// user/assistant turns.
///
/// A row with a non-empty query emits a user turn; a row with a
/// non-empty response emits an assistant turn. A legacy single-row
/// exchange carrying both emits both, user first. If the fold ends on a
/// user turn (odd row count -- missing partner row), a fixed placeholder
/// assistant turn is appended instead of failing, stamped with the user
/// turn's timestamp.
pub fn fold_turns(rows: &[TurnRecord]) -> Vec<TurnView> {
    let mut turns = Vec::with_capacity(rows.len());

    for row in rows {
        if !row.query.is_empty() {
            turns.push(TurnView {
                sender: Sender::User,
                text: row.query.clone(),
                timestamp: row.created_at,
            });
        }
        if !row.response.is_empty() {
            turns.push(TurnView {
                sender: Sender::Ai,
                text: row.response.clone(),
                timestamp: row.created_at,
            });
        }
    }

    if let Some(last) = turns.last()
        && last.sender == Sender::User
    {
        let timestamp = last.timestamp;
        turns.push(TurnView {
            sender: Sender::Ai,
            text: MISSING_REPLY.to_string(),
            timestamp,
        });
    }

    turns
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{TimeZone, Utc};

    fn row(id: i64, query: &str, response: &str) -> TurnRecord {
        TurnRecord {
            id,
            user_id: 1,
            session_id: Some(1),
            query: query.to_string(),
            response: response.to_string(),
            created_at: Utc.timestamp_opt(1_700_000_000 + id, 0).unwrap(),
        }
    }

    #[test]
    fn test_even_rows_fold_into_pairs() {
        let rows = vec![row(1, "hi", ""), row(2, "", "hello")];
        let turns = fold_turns(&rows);

        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].sender, Sender::User);
        assert_eq!(turns[0].text, "hi");
        assert_eq!(turns[1].sender, Sender::Ai);
        assert_eq!(turns[1].text, "hello");
    }

    #[test]
    fn test_odd_rows_get_placeholder_reply() {
        let rows = vec![row(1, "hi", ""), row(2, "", "hello"), row(3, "bye", "")];
        let turns = fold_turns(&rows);

        assert_eq!(turns.len(), 4);
        assert_eq!(turns[2].sender, Sender::User);
        assert_eq!(turns[2].text, "bye");
        assert_eq!(turns[3].sender, Sender::Ai);
        assert_eq!(turns[3].text, MISSING_REPLY);
        assert_eq!(turns[3].timestamp, turns[2].timestamp);
    }

    #[test]
    fn test_legacy_single_row_exchange_emits_both() {
        // Rows written before the two-row scheme carry query and
        // response together; they fold user-first.
        let rows = vec![row(1, "hi", "hello")];
        let turns = fold_turns(&rows);

        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].sender, Sender::User);
        assert_eq!(turns[1].sender, Sender::Ai);
        assert_eq!(turns[1].text, "hello");
    }

    #[test]
    fn test_empty_rows_fold_to_nothing() {
        assert!(fold_turns(&[]).is_empty());
    }
}
