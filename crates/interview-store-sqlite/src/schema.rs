//! Table layout and SQL text for the document store.
//!
//! Collection (table) names come from configuration, so every statement is
//! rendered once at open time from a validated [`Collections`].

use serde::Deserialize;

use crate::{Error, Result};

/// Table names for the two document collections.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Collections {
  pub interviews: String,
  pub users:      String,
}

impl Default for Collections {
  fn default() -> Self {
    Self {
      interviews: "interviews".to_owned(),
      users:      "users".to_owned(),
    }
  }
}

impl Collections {
  /// Reject names that cannot be used verbatim as SQL identifiers, or that
  /// point both collections at one table.
  pub fn validate(&self) -> Result<()> {
    for name in [&self.interviews, &self.users] {
      if !is_identifier(name) {
        return Err(Error::InvalidCollectionName(name.clone()));
      }
    }
    if self.interviews.eq_ignore_ascii_case(&self.users) {
      return Err(Error::InvalidCollectionName(self.users.clone()));
    }
    Ok(())
  }
}

fn is_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    && !name.to_ascii_lowercase().starts_with("sqlite_")
}

/// Pre-rendered SQL for one pair of collections.
#[derive(Debug)]
pub struct Statements {
  pub schema:            String,
  pub insert_interview:  String,
  pub seed_interview:    String,
  pub list_interviews:   String,
  pub get_interview:     String,
  pub lock_interview:    String,
  pub write_interview:   String,
  pub delete_interview:  String,
  pub seed_user:         String,
  pub get_user:          String,
}

impl Statements {
  pub fn render(c: &Collections) -> Result<Self> {
    c.validate()?;
    let interviews = &c.interviews;
    let users = &c.users;

    Ok(Self {
      // `next_comment_id` is the per-interview comment id counter. It only
      // ever grows, independently of which comments currently exist.
      schema: format!(
        "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS {interviews} (
    id              TEXT PRIMARY KEY,
    document        TEXT NOT NULL,             -- JSON-encoded Interview
    next_comment_id INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS {users} (
    username      TEXT PRIMARY KEY,
    password_hash TEXT NOT NULL               -- argon2 PHC string
);
"
      ),
      insert_interview: format!(
        "INSERT INTO {interviews} (id, document, next_comment_id) VALUES (?1, ?2, 1)"
      ),
      seed_interview: format!(
        "INSERT INTO {interviews} (id, document, next_comment_id) VALUES (?1, ?2, ?3)
         ON CONFLICT(id) DO NOTHING"
      ),
      list_interviews: format!("SELECT document FROM {interviews} ORDER BY rowid"),
      get_interview: format!("SELECT document FROM {interviews} WHERE id = ?1"),
      lock_interview: format!(
        "SELECT document, next_comment_id FROM {interviews} WHERE id = ?1"
      ),
      write_interview: format!(
        "UPDATE {interviews} SET document = ?2, next_comment_id = ?3 WHERE id = ?1"
      ),
      delete_interview: format!("DELETE FROM {interviews} WHERE id = ?1"),
      seed_user: format!(
        "INSERT INTO {users} (username, password_hash) VALUES (?1, ?2)
         ON CONFLICT(username) DO NOTHING"
      ),
      get_user: format!("SELECT username, password_hash FROM {users} WHERE username = ?1"),
    })
  }
}
