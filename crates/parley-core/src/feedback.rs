//! Feedback log: repository trait and write-only service.
//!
//! Ratings and comments are fire-and-forget from the client's
//! perspective; no read path exists.

use chrono::{DateTime, Utc};
use tracing::info;

use parley_types::error::RepositoryError;
use parley_types::feedback::{FeedbackRecord, Rating};

/// Repository trait for the feedback table. Implementation lives in
/// parley-infra (`SqliteFeedbackRepository`).
pub trait FeedbackRepository: Send + Sync {
    /// Insert one feedback row and return its assigned row id.
    fn insert_feedback(
        &self,
        record: &FeedbackRecord,
        created_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<i64, RepositoryError>> + Send;
}

/// Write-only feedback service.
pub struct FeedbackLog<R: FeedbackRepository> {
    repo: R,
}

impl<R: FeedbackRepository> FeedbackLog<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Record a rating with an optional free-text comment, not tied to a
    /// particular conversation.
    pub async fn record_comment(
        &self,
        user_id: i64,
        rating: Rating,
        comment: Option<String>,
    ) -> Result<(), RepositoryError> {
        self.repo
            .insert_feedback(
                &FeedbackRecord {
                    user_id,
                    session_id: None,
                    rating,
                    comment,
                },
                Utc::now(),
            )
            .await?;
        info!(user_id, %rating, "feedback comment logged");
        Ok(())
    }

    /// Record a rating against a specific conversation.
    pub async fn record_rating(
        &self,
        user_id: i64,
        session_id: i64,
        rating: Rating,
    ) -> Result<(), RepositoryError> {
        self.repo
            .insert_feedback(
                &FeedbackRecord {
                    user_id,
                    session_id: Some(session_id),
                    rating,
                    comment: None,
                },
                Utc::now(),
            )
            .await?;
        info!(user_id, session_id, %rating, "rating logged");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryFeedbackRepository {
        rows: Mutex<Vec<FeedbackRecord>>,
    }

    impl FeedbackRepository for MemoryFeedbackRepository {
        async fn insert_feedback(
            &self,
            record: &FeedbackRecord,
            _created_at: DateTime<Utc>,
        ) -> Result<i64, RepositoryError> {
            let mut rows = self.rows.lock().unwrap();
            rows.push(record.clone());
            Ok(rows.len() as i64)
        }
    }

    #[tokio::test]
    async fn test_record_comment_has_no_session() {
        let log = FeedbackLog::new(MemoryFeedbackRepository::default());
        log.record_comment(1, Rating::Up, Some("nice".to_string()))
            .await
            .unwrap();

        let rows = log.repo.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].session_id, None);
        assert_eq!(rows[0].rating, Rating::Up);
        assert_eq!(rows[0].comment.as_deref(), Some("nice"));
    }

    #[tokio::test]
    async fn test_record_rating_targets_session() {
        let log = FeedbackLog::new(MemoryFeedbackRepository::default());
        log.record_rating(1, 99, Rating::Down).await.unwrap();

        let rows = log.repo.rows.lock().unwrap();
        assert_eq!(rows[0].session_id, Some(99));
        assert_eq!(rows[0].rating, Rating::Down);
        assert_eq!(rows[0].comment, None);
    }
}
