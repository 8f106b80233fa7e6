//! Error types for `interview-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid interview id {0:?}")]
  InvalidInterviewId(String),

  #[error("status {0:?} is not in the list To do, In Progress, Done")]
  InvalidStatus(String),

  #[error("password hashing error: {0}")]
  PasswordHash(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
