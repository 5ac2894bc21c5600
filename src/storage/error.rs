//! Storage error taxonomy.
//!
//! `ConnectError` covers startup-time failures (unreachable host, bad
//! credentials, schema/index creation). `StoreError` covers operations after
//! a connection was established. Both wrap the client library's error as the
//! cause for server-side logging; handlers never forward them to callers.

use thiserror::Error;

/// Failure to establish a connection or create the schema/index.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("search engine unreachable: {0}")]
    Http(#[from] reqwest::Error),

    #[error("index creation failed with status {0}")]
    IndexCreation(reqwest::StatusCode),
}

/// Failure of an upsert or lookup against a connected store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The adapter has no live connection; `connect` never succeeded.
    #[error("store is not connected")]
    NotConnected,

    #[error("database operation failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("index request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected index response with status {0}")]
    UnexpectedStatus(reqwest::StatusCode),
}
