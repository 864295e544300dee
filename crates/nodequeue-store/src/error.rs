//! Store error types.

use thiserror::Error;

/// Errors returned by a [`PriorityStore`](crate::PriorityStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Rejected input, e.g. a boost that does not raise the priority.
    #[error("{0}")]
    InvalidArgument(String),

    /// No node with the given id.
    #[error("node {0} not found")]
    NotFound(i64),

    /// Pop on a store with no nodes.
    #[error("queue is empty")]
    EmptyQueue,

    /// Failure in the underlying database: constraint violations, I/O,
    /// lock timeouts, closed connections.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<tokio_rusqlite::Error> for StoreError {
    fn from(err: tokio_rusqlite::Error) -> Self {
        match err {
            tokio_rusqlite::Error::Rusqlite(e) => e.into(),
            other => Self::Storage(other.to_string()),
        }
    }
}
