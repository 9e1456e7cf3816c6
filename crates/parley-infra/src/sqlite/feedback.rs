//! SQLite feedback repository implementation.

use chrono::{DateTime, Utc};

use parley_core::feedback::FeedbackRepository;
use parley_types::error::RepositoryError;
use parley_types::feedback::FeedbackRecord;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `FeedbackRepository`.
pub struct SqliteFeedbackRepository {
    pool: DatabasePool,
}

impl SqliteFeedbackRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl FeedbackRepository for SqliteFeedbackRepository {
    async fn insert_feedback(
        &self,
        record: &FeedbackRecord,
        created_at: DateTime<Utc>,
    ) -> Result<i64, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO feedback (user_id, session_id, rating, comment, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(record.user_id)
        .bind(record.session_id)
        .bind(record.rating.to_string())
        .bind(record.comment.as_deref())
        .bind(created_at.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.last_insert_rowid())
    }
}
