use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid database url: {0}")]
    Config(String),

    #[error("failed to open database: {0}")]
    Open(String),

    #[error("schema setup failed: {0}")]
    Schema(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid created_at {value:?} in screening {id}")]
    Timestamp { id: i64, value: String },
}
