//! Idempotent bulk loading of fixture documents.
//!
//! Documents whose primary key already exists are skipped rather than
//! treated as an error, so seeding can run on every startup.

use interview_core::{interview::Interview, password::hash_password, user::SeedUser};

use crate::{
  Result, SqliteStore,
  encode::{counter_after, encode_id, encode_interview},
};

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
  pub inserted: usize,
  /// Documents whose key was already present.
  pub skipped:  usize,
}

impl SqliteStore {
  /// Insert fixture interviews as-is, keeping their ids and comments.
  ///
  /// Each interview's comment counter starts after its highest existing
  /// comment id.
  pub async fn seed_interviews(&self, interviews: Vec<Interview>) -> Result<SeedReport> {
    let rows = interviews
      .iter()
      .map(|i| -> Result<(String, String, i64)> {
        Ok((
          encode_id(i.id),
          encode_interview(i)?,
          counter_after(i.highest_comment_id())?,
        ))
      })
      .collect::<Result<Vec<_>>>()?;
    let sql = self.sql.clone();

    let report = self
      .conn()
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut report = SeedReport::default();
        {
          let mut stmt = tx.prepare(&sql.seed_interview)?;
          for (id, document, next_comment_id) in rows {
            match stmt.execute(rusqlite::params![id, document, next_comment_id])? {
              0 => report.skipped += 1,
              _ => report.inserted += 1,
            }
          }
        }
        tx.commit()?;
        Ok(report)
      })
      .await?;

    tracing::info!(
      inserted = report.inserted,
      skipped = report.skipped,
      "seeded interviews"
    );
    Ok(report)
  }

  /// Insert fixture users, hashing each plaintext password first.
  pub async fn seed_users(&self, users: Vec<SeedUser>) -> Result<SeedReport> {
    let rows = users
      .into_iter()
      .map(|u| -> Result<(String, String)> {
        Ok((u.username, hash_password(&u.password)?))
      })
      .collect::<Result<Vec<_>>>()?;
    let sql = self.sql.clone();

    let report = self
      .conn()
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut report = SeedReport::default();
        {
          let mut stmt = tx.prepare(&sql.seed_user)?;
          for (username, password_hash) in rows {
            match stmt.execute(rusqlite::params![username, password_hash])? {
              0 => report.skipped += 1,
              _ => report.inserted += 1,
            }
          }
        }
        tx.commit()?;
        Ok(report)
      })
      .await?;

    tracing::info!(
      inserted = report.inserted,
      skipped = report.skipped,
      "seeded users"
    );
    Ok(report)
  }
}
