//! The `InterviewStore` and `UserStore` traits.
//!
//! Implemented by storage backends (e.g. `interview-store-sqlite`). The API
//! layer depends on these abstractions, not on any concrete backend.

use std::future::Future;

use crate::{
  comment::{Comment, CommentId, CommentUpdate, NewComment},
  interview::{Interview, InterviewId, InterviewUpdate, NewInterview},
  user::User,
};

// ─── Interviews ──────────────────────────────────────────────────────────────

/// Abstraction over the interview collection.
///
/// Every write is a single atomic operation on one interview document.
/// Writes report how many documents they changed; a count of 0 means the
/// document (or the addressed comment inside it) was not found.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait InterviewStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new interview. The store assigns the id, forces the status to
  /// `Pending`, stamps both timestamps, and starts with no comments.
  fn add_interview(
    &self,
    input: NewInterview,
  ) -> impl Future<Output = Result<Interview, Self::Error>> + Send + '_;

  /// Every interview, in insertion order.
  fn list_interviews(
    &self,
  ) -> impl Future<Output = Result<Vec<Interview>, Self::Error>> + Send + '_;

  /// Retrieve an interview by id. Returns `None` if not found.
  fn get_interview(
    &self,
    id: InterviewId,
  ) -> impl Future<Output = Result<Option<Interview>, Self::Error>> + Send + '_;

  /// Replace subject, detail, status and updated-by; `updated_date` is always
  /// stamped by the store. Returns the modified count.
  fn update_interview(
    &self,
    id: InterviewId,
    update: InterviewUpdate,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Remove an interview and its comments. Returns the deleted count.
  fn delete_interview(
    &self,
    id: InterviewId,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Comments ──────────────────────────────────────────────────────────

  /// Append a comment to the end of the interview's comment sequence.
  ///
  /// The comment id is drawn from a per-interview counter in the same atomic
  /// write as the append, so ids are unique under concurrent callers and are
  /// never reused after deletion. Returns `None` if the interview does not
  /// exist.
  fn add_comment(
    &self,
    interview_id: InterviewId,
    input: NewComment,
  ) -> impl Future<Output = Result<Option<Comment>, Self::Error>> + Send + '_;

  /// Replace the text of one comment and stamp its `updated_date`.
  /// Returns 0 if either the interview or the comment is missing.
  fn update_comment(
    &self,
    interview_id: InterviewId,
    comment_id: CommentId,
    update: CommentUpdate,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Remove one comment, leaving the others in place.
  /// Returns 0 if either the interview or the comment is missing.
  fn delete_comment(
    &self,
    interview_id: InterviewId,
    comment_id: CommentId,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}

// ─── Users ───────────────────────────────────────────────────────────────────

/// Read-only access to the user collection.
pub trait UserStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn get_user<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Look up `username` and compare `password` against its stored hash.
  /// Returns `None` for an unknown user or a wrong password.
  fn authenticate<'a>(
    &'a self,
    username: &'a str,
    password: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;
}
