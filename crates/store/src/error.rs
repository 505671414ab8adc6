use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation error.
///
/// Infrastructure failures only; domain validation happens before a row
/// reaches the store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write (duplicate account email,
    /// duplicate role grant).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The targeted row does not exist (deleted rows still exist).
    #[error("not found")]
    NotFound,

    /// The store itself failed (poisoned lock, lost connection).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
