//! Comments: entries embedded in exactly one interview each.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment identifier, unique within its parent interview only.
pub type CommentId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
  pub id:           CommentId,
  pub comment:      String,
  pub create_by:    String,
  pub create_date:  DateTime<Utc>,
  pub updated_date: DateTime<Utc>,
}

/// Fields a client supplies when adding a comment. The id and both
/// timestamps are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
  pub comment:   String,
  #[serde(default)]
  pub create_by: String,
}

/// Replacement text for an existing comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentUpdate {
  pub comment: String,
}
