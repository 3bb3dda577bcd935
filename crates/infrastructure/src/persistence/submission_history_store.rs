//! SQLite submission history using sqlx
//!
//! Records are stored as `(identity, submitted_at_ns)` rows. Timestamps are
//! Unix nanoseconds, the full precision of the ingestion clock, so the window
//! query is a plain integer range scan over the `(identity, submitted_at_ns)`
//! index and never counts a record older than the threshold.

use application::{StoreError, ports::SubmissionHistoryPort};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{SubmissionRecord, SubmitterId};
use sqlx::SqlitePool;
use tracing::{debug, instrument, warn};

use super::error::map_sqlx_error;

/// Nanoseconds since the Unix epoch, as stored in `submitted_at_ns`
fn to_unix_nanos(at: DateTime<Utc>) -> Result<i64, StoreError> {
    at.timestamp_nanos_opt()
        .ok_or_else(|| StoreError::Query(format!("Timestamp out of storable range: {at}")))
}

/// Submission history backed by SQLite
#[derive(Debug, Clone)]
pub struct SqliteSubmissionHistory {
    pool: SqlitePool,
}

impl SqliteSubmissionHistory {
    /// Create a new history store over a migrated pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionHistoryPort for SqliteSubmissionHistory {
    #[instrument(skip(self), fields(identity = %identity))]
    async fn count_since(
        &self,
        identity: &SubmitterId,
        threshold: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*) FROM submission_records
            WHERE identity = $1 AND submitted_at_ns >= $2
            ",
        )
        .bind(identity.as_str())
        .bind(to_unix_nanos(threshold)?)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!(count, "Counted submissions since threshold");
        u64::try_from(count).map_err(|_| StoreError::Query(format!("Negative row count: {count}")))
    }

    #[instrument(skip(self, record), fields(identity = %record.identity))]
    async fn record(&self, record: &SubmissionRecord) -> Result<(), StoreError> {
        sqlx::query(
            r"
            INSERT INTO submission_records (identity, submitted_at_ns)
            VALUES ($1, $2)
            ",
        )
        .bind(record.identity.as_str())
        .bind(to_unix_nanos(record.timestamp)?)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!("Submission recorded");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        match sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Submission history health check failed");
                false
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;
    use crate::persistence::async_connection::{AsyncDatabase, AsyncDatabaseConfig};

    async fn setup_test_db() -> (AsyncDatabase, SqliteSubmissionHistory) {
        let db = AsyncDatabase::new(&AsyncDatabaseConfig::in_memory())
            .await
            .unwrap();
        db.migrate().await.unwrap();
        let store = SqliteSubmissionHistory::new(db.pool().clone());
        (db, store)
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    async fn record_at(store: &SqliteSubmissionHistory, identity: &str, at: DateTime<Utc>) {
        store
            .record(&SubmissionRecord::new(identity, at))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn empty_history_counts_zero() {
        let (_db, store) = setup_test_db().await;
        let count = store
            .count_since(&SubmitterId::new("a@x.com"), now())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn counts_only_matching_identity() {
        let (_db, store) = setup_test_db().await;
        record_at(&store, "a@x.com", now()).await;
        record_at(&store, "a@x.com", now()).await;
        record_at(&store, "b@x.com", now()).await;

        let count = store
            .count_since(&SubmitterId::new("a@x.com"), now() - TimeDelta::minutes(5))
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn identity_comparison_is_exact() {
        let (_db, store) = setup_test_db().await;
        record_at(&store, "A@X.com", now()).await;

        let count = store
            .count_since(&SubmitterId::new("a@x.com"), now() - TimeDelta::minutes(5))
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn threshold_is_inclusive() {
        let (_db, store) = setup_test_db().await;
        let threshold = now() - TimeDelta::minutes(5);
        record_at(&store, "a@x.com", threshold).await;
        record_at(&store, "a@x.com", threshold - TimeDelta::milliseconds(1)).await;

        let count = store
            .count_since(&SubmitterId::new("a@x.com"), threshold)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn sub_millisecond_older_record_is_not_counted() {
        let (_db, store) = setup_test_db().await;
        let threshold = now() + TimeDelta::microseconds(500);
        record_at(&store, "a@x.com", now() + TimeDelta::microseconds(100)).await;
        record_at(&store, "a@x.com", threshold - TimeDelta::nanoseconds(1)).await;

        let count = store
            .count_since(&SubmitterId::new("a@x.com"), threshold)
            .await
            .unwrap();
        assert_eq!(count, 0);

        record_at(&store, "a@x.com", threshold).await;
        let count = store
            .count_since(&SubmitterId::new("a@x.com"), threshold)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn unrepresentable_timestamp_is_query_error() {
        let (_db, store) = setup_test_db().await;
        let result = store
            .record(&SubmissionRecord::new("a@x.com", DateTime::<Utc>::MAX_UTC))
            .await;
        assert!(matches!(result, Err(StoreError::Query(_))));
    }

    #[tokio::test]
    async fn old_records_never_count() {
        let (_db, store) = setup_test_db().await;
        for minutes in [6, 10, 60] {
            record_at(&store, "a@x.com", now() - TimeDelta::minutes(minutes)).await;
        }

        let count = store
            .count_since(&SubmitterId::new("a@x.com"), now() - TimeDelta::minutes(5))
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn available_when_connected() {
        let (_db, store) = setup_test_db().await;
        assert!(store.is_available().await);
    }

    #[tokio::test]
    async fn closed_pool_is_unavailable() {
        let (db, store) = setup_test_db().await;
        db.close().await;

        assert!(!store.is_available().await);
        let result = store
            .count_since(&SubmitterId::new("a@x.com"), now())
            .await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn missing_table_is_query_error() {
        let db = AsyncDatabase::in_memory().await.unwrap();
        let store = SqliteSubmissionHistory::new(db.pool().clone());

        let result = store
            .count_since(&SubmitterId::new("a@x.com"), now())
            .await;
        assert!(matches!(result, Err(StoreError::Query(_))));
    }
}
