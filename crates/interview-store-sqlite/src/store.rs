//! [`SqliteStore`], the SQLite implementation of [`InterviewStore`] and
//! [`UserStore`].

use std::{path::Path, sync::Arc, time::Duration};

use chrono::Utc;
use rusqlite::{OptionalExtension as _, TransactionBehavior};

use interview_core::{
  comment::{Comment, CommentId, CommentUpdate, NewComment},
  interview::{Interview, InterviewId, InterviewUpdate, NewInterview},
  password::verify_password,
  store::{InterviewStore, UserStore},
  user::User,
};

use crate::{
  Error, Result,
  encode::{
    RawUser, decode_counter, decode_interview, decode_interview_in_call,
    encode_counter_in_call, encode_id, encode_interview, encode_interview_in_call,
  },
  schema::{Collections, Statements},
};

/// How long a writer waits for another connection's lock before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// ─── Store ───────────────────────────────────────────────────────────────────

/// An interview/user document store backed by a single SQLite file.
///
/// Cloning is cheap. The inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
  pub(crate) sql: Arc<Statements>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>, collections: &Collections) -> Result<Self> {
    let sql = Arc::new(Statements::render(collections)?);
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, sql };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store with the default collection names, for
  /// testing.
  pub async fn open_in_memory() -> Result<Self> {
    let sql = Arc::new(Statements::render(&Collections::default())?);
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, sql };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    let sql = self.sql.clone();
    self
      .conn
      .call(move |conn| {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch(&sql.schema)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub(crate) fn conn(&self) -> &tokio_rusqlite::Connection { &self.conn }

  /// Run `mutate` against one interview document as a single atomic write.
  ///
  /// The document and its comment counter are read and written back inside
  /// one IMMEDIATE transaction, so no other writer can interleave. `mutate`
  /// returns `None` to signal "nothing matched"; the document is then left
  /// untouched. Returns `None` as well when the interview does not exist.
  async fn modify<R, F>(&self, id: InterviewId, mutate: F) -> Result<Option<R>>
  where
    F: FnOnce(&mut Interview, &mut CommentId) -> Option<R> + Send + 'static,
    R: Send + 'static,
  {
    let sql = self.sql.clone();
    let id_str = encode_id(id);

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let row: Option<(String, i64)> = tx
          .query_row(&sql.lock_interview, rusqlite::params![id_str], |row| {
            Ok((row.get(0)?, row.get(1)?))
          })
          .optional()?;

        let Some((document, raw_counter)) = row else {
          return Ok(None);
        };

        let mut interview = decode_interview_in_call(&document)?;
        let mut next_comment_id = decode_counter(raw_counter);

        let Some(out) = mutate(&mut interview, &mut next_comment_id) else {
          return Ok(None);
        };

        tx.execute(
          &sql.write_interview,
          rusqlite::params![
            id_str,
            encode_interview_in_call(&interview)?,
            encode_counter_in_call(next_comment_id)?,
          ],
        )?;
        tx.commit()?;

        Ok(Some(out))
      })
      .await?;

    Ok(outcome)
  }
}

fn count(matched: Option<()>) -> u64 { u64::from(matched.is_some()) }

// ─── InterviewStore impl ─────────────────────────────────────────────────────

impl InterviewStore for SqliteStore {
  type Error = Error;

  async fn add_interview(&self, input: NewInterview) -> Result<Interview> {
    let interview = Interview::create(InterviewId::new(), input, Utc::now());

    let id_str   = encode_id(interview.id);
    let document = encode_interview(&interview)?;
    let sql      = self.sql.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(&sql.insert_interview, rusqlite::params![id_str, document])?;
        Ok(())
      })
      .await?;

    tracing::debug!(id = %interview.id, "interview created");
    Ok(interview)
  }

  async fn list_interviews(&self) -> Result<Vec<Interview>> {
    let sql = self.sql.clone();

    let documents: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql.list_interviews)?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;

    documents.iter().map(String::as_str).map(decode_interview).collect()
  }

  async fn get_interview(&self, id: InterviewId) -> Result<Option<Interview>> {
    let sql    = self.sql.clone();
    let id_str = encode_id(id);

    let document: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql.get_interview, rusqlite::params![id_str], |row| row.get(0))
            .optional()?,
        )
      })
      .await?;

    document.as_deref().map(decode_interview).transpose()
  }

  async fn update_interview(&self, id: InterviewId, update: InterviewUpdate) -> Result<u64> {
    let now = Utc::now();
    let matched = self
      .modify(id, move |interview, _| {
        interview.apply_update(update, now);
        Some(())
      })
      .await?;
    Ok(count(matched))
  }

  async fn delete_interview(&self, id: InterviewId) -> Result<u64> {
    let sql    = self.sql.clone();
    let id_str = encode_id(id);

    let deleted = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql.delete_interview, rusqlite::params![id_str])?))
      .await?;

    Ok(deleted as u64)
  }

  // ── Comments ──────────────────────────────────────────────────────────────

  async fn add_comment(
    &self,
    interview_id: InterviewId,
    input: NewComment,
  ) -> Result<Option<Comment>> {
    let now = Utc::now();
    let comment = self
      .modify(interview_id, move |interview, next_comment_id| {
        let id = *next_comment_id;
        *next_comment_id += 1;
        Some(interview.push_comment(id, input, now))
      })
      .await?;

    if let Some(c) = &comment {
      tracing::debug!(interview = %interview_id, comment = c.id, "comment appended");
    }
    Ok(comment)
  }

  async fn update_comment(
    &self,
    interview_id: InterviewId,
    comment_id: CommentId,
    update: CommentUpdate,
  ) -> Result<u64> {
    let now = Utc::now();
    let matched = self
      .modify(interview_id, move |interview, _| {
        interview.update_comment(comment_id, update, now).then_some(())
      })
      .await?;
    Ok(count(matched))
  }

  async fn delete_comment(&self, interview_id: InterviewId, comment_id: CommentId) -> Result<u64> {
    let matched = self
      .modify(interview_id, move |interview, _| {
        interview.remove_comment(comment_id).then_some(())
      })
      .await?;
    Ok(count(matched))
  }
}

// ─── UserStore impl ──────────────────────────────────────────────────────────

impl UserStore for SqliteStore {
  type Error = Error;

  async fn get_user(&self, username: &str) -> Result<Option<User>> {
    let sql      = self.sql.clone();
    let username = username.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql.get_user, rusqlite::params![username], |row| {
              Ok(RawUser {
                username:      row.get(0)?,
                password_hash: row.get(1)?,
              })
            })
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(RawUser::into_user))
  }

  async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>> {
    let Some(user) = self.get_user(username).await? else {
      return Ok(None);
    };
    Ok(verify_password(password, &user.password_hash).then_some(user))
  }
}
