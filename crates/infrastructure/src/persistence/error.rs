//! Shared error mapping for sqlx persistence layer

use application::StoreError;

/// Map a sqlx error to a submission history error
///
/// Connectivity failures are reported as [`StoreError::Unavailable`] so
/// callers can retry; everything else is a failed query.
pub fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable("Timed out waiting for a database connection".to_string())
        },
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable("Database pool is closed".to_string())
        },
        sqlx::Error::Io(io_err) => StoreError::Unavailable(format!("Database I/O error: {io_err}")),
        sqlx::Error::Database(db_err) => StoreError::Query(format!("Database error: {db_err}")),
        other => StoreError::Query(format!("Database error: {other}")),
    }
}
