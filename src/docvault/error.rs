use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Unknown day: {0}")]
    UnknownDay(String),

    #[error("File not found: {0}")]
    FileNotFound(Uuid),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Blob database is at schema version {found}, this build supports up to {supported}")]
    SchemaVersion { found: i64, supported: i64 },

    #[error("Upload of {incoming} bytes would exceed the {quota_mb} MB quota ({used} bytes used)")]
    QuotaExceeded {
        used: u64,
        incoming: u64,
        quota_mb: u64,
    },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, VaultError>;
