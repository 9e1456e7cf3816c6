//! SQLite turn repository implementation.
//!
//! Implements `TurnRepository` from `parley-core` using sqlx with split
//! read/write pools: raw queries, a private Row struct, reads on the
//! reader pool, writes on the writer pool.

use sqlx::Row;

use parley_core::chat::repository::TurnRepository;
use parley_types::error::RepositoryError;
use parley_types::turn::{NewTurn, TurnRecord};

use super::parse_datetime;
use super::pool::DatabasePool;

/// SQLite-backed implementation of `TurnRepository`.
pub struct SqliteTurnRepository {
    pool: DatabasePool,
}

impl SqliteTurnRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain TurnRecord.
struct TurnRow {
    id: i64,
    user_id: i64,
    session_id: Option<i64>,
    query: String,
    response: String,
    created_at: String,
}

impl TurnRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            session_id: row.try_get("session_id")?,
            query: row.try_get("query")?,
            response: row.try_get("response")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_record(self) -> Result<TurnRecord, RepositoryError> {
        let created_at = parse_datetime(&self.created_at)?;
        Ok(TurnRecord {
            id: self.id,
            user_id: self.user_id,
            session_id: self.session_id,
            query: self.query,
            response: self.response,
            created_at,
        })
    }
}

impl TurnRepository for SqliteTurnRepository {
    async fn insert_turn(&self, turn: &NewTurn) -> Result<i64, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO turns (user_id, session_id, query, response, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(turn.user_id)
        .bind(turn.session_id)
        .bind(&turn.query)
        .bind(&turn.response)
        .bind(turn.created_at.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.last_insert_rowid())
    }

    async fn assign_session_id(&self, row_id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE turns SET session_id = id WHERE id = ?")
            .bind(row_id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn first_turns_by_user(&self, user_id: i64) -> Result<Vec<TurnRecord>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT t.id, t.user_id, t.session_id, t.query, t.response, t.created_at \
             FROM turns t \
             JOIN (SELECT MIN(id) AS opener_id FROM turns \
                   WHERE user_id = ? AND session_id IS NOT NULL \
                   GROUP BY session_id) o ON t.id = o.opener_id \
             ORDER BY t.id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                TurnRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_record()
            })
            .collect()
    }

    async fn turns_by_session(&self, session_id: i64) -> Result<Vec<TurnRecord>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, user_id, session_id, query, response, created_at \
             FROM turns WHERE session_id = ? ORDER BY id ASC",
        )
        .bind(session_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                TurnRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_record()
            })
            .collect()
    }
}
