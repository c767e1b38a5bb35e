//! Error types for the pagination engine.

use thiserror::Error;

/// Reasons a cursor token could not be turned back into a key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorDecodeError {
    #[error("cursor token is empty")]
    Empty,

    #[error("cursor token exceeds max length: {len} chars (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("cursor token is not valid base64: {0}")]
    Base64(String),

    #[error("cursor token does not decode to UTF-8")]
    NotUtf8,
}

/// Errors surfaced by [`next_page`](crate::next_page).
///
/// Store failures are carried opaquely; the engine never looks at what
/// kind of failure the store reported.
#[derive(Debug, Error)]
pub enum PaginationError {
    #[error("query failed")]
    QueryFailed(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}
