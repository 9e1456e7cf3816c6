//! TurnRepository trait definition.
//!
//! CRUD surface for the flat turn table. Implementations live in
//! parley-infra (`SqliteTurnRepository`). Uses native async fn in traits
//! (RPITIT, Rust 2024 edition).

use parley_types::error::RepositoryError;
use parley_types::turn::{NewTurn, TurnRecord};

/// Repository trait for the append-only turn table.
pub trait TurnRepository: Send + Sync {
    /// Insert one turn row and return its assigned row id.
    fn insert_turn(
        &self,
        turn: &NewTurn,
    ) -> impl std::future::Future<Output = Result<i64, RepositoryError>> + Send;

    /// Back-patch a conversation's opening row: set its `session_id` to
    /// its own row id.
    fn assign_session_id(
        &self,
        row_id: i64,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// For each distinct session belonging to `user_id`, the row with the
    /// minimum id (the conversation's opening turn), ordered by that id
    /// descending.
    fn first_turns_by_user(
        &self,
        user_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<TurnRecord>, RepositoryError>> + Send;

    /// All rows for `session_id`, ordered by row id ascending.
    fn turns_by_session(
        &self,
        session_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<TurnRecord>, RepositoryError>> + Send;
}
