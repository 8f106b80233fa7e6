//! Encoding and decoding between domain types and SQLite column values.
//!
//! Interviews are stored as compact JSON documents (RFC 3339 timestamps,
//! hyphenated ids). The comment counter is stored as a plain INTEGER.

use interview_core::{
  comment::CommentId,
  interview::{Interview, InterviewId},
  user::User,
};

use crate::{Error, Result};

// ─── Ids ─────────────────────────────────────────────────────────────────────

pub fn encode_id(id: InterviewId) -> String { id.to_string() }

// ─── Documents ───────────────────────────────────────────────────────────────

pub fn encode_interview(interview: &Interview) -> Result<String> {
  Ok(serde_json::to_string(interview)?)
}

pub fn decode_interview(document: &str) -> Result<Interview> {
  Ok(serde_json::from_str(document)?)
}

/// Variant of [`decode_interview`] for use inside a connection closure,
/// where errors must be expressed as [`tokio_rusqlite::Error`].
pub fn decode_interview_in_call(
  document: &str,
) -> Result<Interview, tokio_rusqlite::Error> {
  serde_json::from_str(document).map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))
}

pub fn encode_interview_in_call(
  interview: &Interview,
) -> Result<String, tokio_rusqlite::Error> {
  serde_json::to_string(interview).map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))
}

// ─── Counter ─────────────────────────────────────────────────────────────────

/// Fails rather than clamping, so the counter can never fall back onto an id
/// that was already handed out.
pub fn encode_counter(next: CommentId) -> Result<i64> {
  i64::try_from(next).map_err(|_| Error::CommentIdOutOfRange(next))
}

pub fn encode_counter_in_call(next: CommentId) -> Result<i64, tokio_rusqlite::Error> {
  encode_counter(next).map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))
}

/// The first id to hand out after `highest`.
pub fn counter_after(highest: CommentId) -> Result<i64> {
  let next = highest
    .checked_add(1)
    .ok_or(Error::CommentIdOutOfRange(highest))?;
  encode_counter(next)
}

pub fn decode_counter(raw: i64) -> CommentId { CommentId::try_from(raw).unwrap_or(1).max(1) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a users row.
pub struct RawUser {
  pub username:      String,
  pub password_hash: String,
}

impl RawUser {
  pub fn into_user(self) -> User {
    User {
      username:      self.username,
      password_hash: self.password_hash,
    }
  }
}
