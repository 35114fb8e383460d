use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to initialize database: {0}")]
    InitializationError(String),

    #[error("failed to insert row: {0}")]
    InsertError(String),

    #[error("failed to query: {0}")]
    QueryError(String),
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
