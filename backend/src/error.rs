use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure raised by either store. Never retried; surfaced to the caller as-is.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("store connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("store query failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error("malformed row: {0}")]
    Decode(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        if matches!(
            e,
            sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)
                | sqlx::Error::Configuration(_)
                | sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::WorkerCrashed
        ) {
            Self::Connection(e)
        } else if matches!(
            e,
            sqlx::Error::ColumnDecode { .. }
                | sqlx::Error::ColumnNotFound(_)
                | sqlx::Error::Decode(_)
        ) {
            Self::Decode(e.to_string())
        } else {
            Self::Query(e)
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}
