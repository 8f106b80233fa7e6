//! Error type for `interview-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] interview_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// The comment counter only holds values that fit a SQLite INTEGER.
  #[error("comment id {0} is outside the storable range")]
  CommentIdOutOfRange(u64),

  /// A configured collection name is not usable as a table name.
  #[error("invalid collection name {0:?}")]
  InvalidCollectionName(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
