//! Interview, the aggregate root.
//!
//! An interview owns its comments. Comments have no existence outside their
//! parent and are only ever created, changed, or removed through it.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  comment::{Comment, CommentId, CommentUpdate, NewComment},
};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Globally unique interview identifier, assigned by the store on creation.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct InterviewId(Uuid);

impl InterviewId {
  pub fn new() -> Self { Self(Uuid::new_v4()) }

  pub fn as_uuid(&self) -> Uuid { self.0 }
}

impl Default for InterviewId {
  fn default() -> Self { Self::new() }
}

impl From<Uuid> for InterviewId {
  fn from(id: Uuid) -> Self { Self(id) }
}

impl fmt::Display for InterviewId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.hyphenated().fmt(f)
  }
}

impl FromStr for InterviewId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Uuid::parse_str(s)
      .map(Self)
      .map_err(|_| Error::InvalidInterviewId(s.to_owned()))
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Workflow status of an interview.
///
/// `Pending` is only ever produced by creation. Updates may move an interview
/// to one of the other three values but never back to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewStatus {
  Pending,
  #[serde(rename = "To do")]
  ToDo,
  #[serde(rename = "In Progress")]
  InProgress,
  Done,
}

impl InterviewStatus {
  /// The values a client may set through an update.
  pub const ASSIGNABLE: [Self; 3] = [Self::ToDo, Self::InProgress, Self::Done];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Pending => "Pending",
      Self::ToDo => "To do",
      Self::InProgress => "In Progress",
      Self::Done => "Done",
    }
  }

  /// Parse a status submitted by a client. `"Pending"` is rejected.
  pub fn parse_assignable(s: &str) -> Result<Self> {
    Self::ASSIGNABLE
      .into_iter()
      .find(|status| status.as_str() == s)
      .ok_or_else(|| Error::InvalidStatus(s.to_owned()))
  }
}

impl fmt::Display for InterviewStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Aggregate ───────────────────────────────────────────────────────────────

/// A persisted interview document with its embedded comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
  pub id:           InterviewId,
  pub subject:      String,
  pub detail:       String,
  /// Insertion order is display order.
  #[serde(default)]
  pub comments:     Vec<Comment>,
  pub status:       InterviewStatus,
  pub create_by:    String,
  pub create_date:  DateTime<Utc>,
  pub updated_by:   String,
  pub updated_date: DateTime<Utc>,
}

/// Fields a client supplies when creating an interview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInterview {
  pub subject:   String,
  #[serde(default)]
  pub detail:    String,
  #[serde(default)]
  pub create_by: String,
}

/// The mutable fields replaced by an update.
#[derive(Debug, Clone)]
pub struct InterviewUpdate {
  pub subject:    String,
  pub detail:     String,
  pub status:     InterviewStatus,
  pub updated_by: String,
}

impl Interview {
  /// Build a fresh interview: status `Pending`, no comments, and identical
  /// creation and update timestamps.
  pub fn create(id: InterviewId, input: NewInterview, now: DateTime<Utc>) -> Self {
    Self {
      id,
      subject: input.subject,
      detail: input.detail,
      comments: Vec::new(),
      status: InterviewStatus::Pending,
      updated_by: input.create_by.clone(),
      create_by: input.create_by,
      create_date: now,
      updated_date: now,
    }
  }

  /// Overwrite the mutable fields and stamp `updated_date`.
  pub fn apply_update(&mut self, update: InterviewUpdate, now: DateTime<Utc>) {
    self.subject = update.subject;
    self.detail = update.detail;
    self.status = update.status;
    self.updated_by = update.updated_by;
    self.updated_date = now;
  }

  /// Highest comment id currently present, or 0 when there are none.
  pub fn highest_comment_id(&self) -> CommentId {
    self.comments.iter().map(|c| c.id).max().unwrap_or(0)
  }

  /// Append a comment under an id allocated by the caller's counter.
  pub fn push_comment(
    &mut self,
    id: CommentId,
    input: NewComment,
    now: DateTime<Utc>,
  ) -> Comment {
    let comment = Comment {
      id,
      comment: input.comment,
      create_by: input.create_by,
      create_date: now,
      updated_date: now,
    };
    self.comments.push(comment.clone());
    comment
  }

  /// Replace the text of comment `id`. Returns `false` if it does not exist.
  pub fn update_comment(
    &mut self,
    id: CommentId,
    update: CommentUpdate,
    now: DateTime<Utc>,
  ) -> bool {
    match self.comments.iter_mut().find(|c| c.id == id) {
      Some(comment) => {
        comment.comment = update.comment;
        comment.updated_date = now;
        true
      }
      None => false,
    }
  }

  /// Remove comment `id`, keeping the order of the others. Returns `false`
  /// if it does not exist.
  pub fn remove_comment(&mut self, id: CommentId) -> bool {
    let before = self.comments.len();
    self.comments.retain(|c| c.id != id);
    self.comments.len() != before
  }
}
