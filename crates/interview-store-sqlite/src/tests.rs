//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::HashSet;

use chrono::Utc;
use interview_core::{
  comment::{CommentUpdate, NewComment},
  interview::{Interview, InterviewId, InterviewStatus, InterviewUpdate, NewInterview},
  store::{InterviewStore, UserStore},
  user::SeedUser,
};

use crate::{Collections, Error, SeedReport, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_interview(subject: &str) -> NewInterview {
  NewInterview {
    subject:   subject.into(),
    detail:    "Panel with two engineers".into(),
    create_by: "alice".into(),
  }
}

fn new_comment(text: &str) -> NewComment {
  NewComment {
    comment:   text.into(),
    create_by: "bob".into(),
  }
}

fn comment_ids(interview: &Interview) -> Vec<u64> {
  interview.comments.iter().map(|c| c.id).collect()
}

// ─── Interviews ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_interview_forces_initial_state() {
  let s = store().await;

  let created = s.add_interview(new_interview("Rust backend")).await.unwrap();
  assert_eq!(created.status, InterviewStatus::Pending);
  assert!(created.comments.is_empty());
  assert_eq!(created.create_date, created.updated_date);
  assert_eq!(created.updated_by, "alice");
}

#[tokio::test]
async fn add_then_get_round_trips() {
  let s = store().await;

  let created = s.add_interview(new_interview("Rust backend")).await.unwrap();
  let fetched = s.get_interview(created.id).await.unwrap().unwrap();

  assert_eq!(fetched.subject, created.subject);
  assert_eq!(fetched.detail, created.detail);
  assert_eq!(fetched.status, created.status);
  assert_eq!(fetched.create_by, created.create_by);
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_unknown_interview_returns_none() {
  let s = store().await;
  assert!(s.get_interview(InterviewId::new()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_empty_store_is_empty() {
  let s = store().await;
  assert!(s.list_interviews().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_returns_insertion_order() {
  let s = store().await;
  let a = s.add_interview(new_interview("first")).await.unwrap();
  let b = s.add_interview(new_interview("second")).await.unwrap();
  let c = s.add_interview(new_interview("third")).await.unwrap();

  let ids: Vec<_> = s.list_interviews().await.unwrap().iter().map(|i| i.id).collect();
  assert_eq!(ids, [a.id, b.id, c.id]);
}

#[tokio::test]
async fn update_replaces_mutable_fields_and_stamps_date() {
  let s = store().await;
  let created = s.add_interview(new_interview("Rust backend")).await.unwrap();

  let modified = s
    .update_interview(
      created.id,
      InterviewUpdate {
        subject:    "Rust platform".into(),
        detail:     "Moved to onsite".into(),
        status:     InterviewStatus::InProgress,
        updated_by: "carol".into(),
      },
    )
    .await
    .unwrap();
  assert_eq!(modified, 1);

  let fetched = s.get_interview(created.id).await.unwrap().unwrap();
  assert_eq!(fetched.subject, "Rust platform");
  assert_eq!(fetched.detail, "Moved to onsite");
  assert_eq!(fetched.status, InterviewStatus::InProgress);
  assert_eq!(fetched.updated_by, "carol");
  assert_eq!(fetched.create_by, "alice");
  assert_eq!(fetched.create_date, created.create_date);
  assert!(fetched.updated_date >= created.updated_date);
}

#[tokio::test]
async fn update_unknown_interview_modifies_nothing() {
  let s = store().await;
  let modified = s
    .update_interview(
      InterviewId::new(),
      InterviewUpdate {
        subject:    "x".into(),
        detail:     String::new(),
        status:     InterviewStatus::Done,
        updated_by: "carol".into(),
      },
    )
    .await
    .unwrap();
  assert_eq!(modified, 0);
}

#[tokio::test]
async fn delete_interview_counts() {
  let s = store().await;
  let created = s.add_interview(new_interview("Rust backend")).await.unwrap();

  assert_eq!(s.delete_interview(created.id).await.unwrap(), 1);
  assert_eq!(s.delete_interview(created.id).await.unwrap(), 0);
  assert!(s.get_interview(created.id).await.unwrap().is_none());
}

// ─── Comments ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn sequential_comments_are_numbered_from_one() {
  let s = store().await;
  let interview = s.add_interview(new_interview("Rust backend")).await.unwrap();

  for n in 1..=5 {
    let comment = s
      .add_comment(interview.id, new_comment(&format!("note {n}")))
      .await
      .unwrap()
      .unwrap();
    assert_eq!(comment.id, n);
    assert_eq!(comment.create_date, comment.updated_date);
  }

  let fetched = s.get_interview(interview.id).await.unwrap().unwrap();
  assert_eq!(comment_ids(&fetched), [1, 2, 3, 4, 5]);
  assert_eq!(fetched.comments[2].comment, "note 3");
}

#[tokio::test]
async fn add_comment_to_unknown_interview_returns_none() {
  let s = store().await;
  let result = s.add_comment(InterviewId::new(), new_comment("orphan")).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn deleted_last_comment_id_is_not_reused() {
  let s = store().await;
  let interview = s.add_interview(new_interview("Rust backend")).await.unwrap();

  s.add_comment(interview.id, new_comment("one")).await.unwrap();
  s.add_comment(interview.id, new_comment("two")).await.unwrap();
  s.add_comment(interview.id, new_comment("three")).await.unwrap();

  assert_eq!(s.delete_comment(interview.id, 3).await.unwrap(), 1);

  let next = s
    .add_comment(interview.id, new_comment("four"))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(next.id, 4);

  let fetched = s.get_interview(interview.id).await.unwrap().unwrap();
  assert_eq!(comment_ids(&fetched), [1, 2, 4]);
}

#[tokio::test]
async fn deleting_every_comment_does_not_reset_ids() {
  let s = store().await;
  let interview = s.add_interview(new_interview("Rust backend")).await.unwrap();

  s.add_comment(interview.id, new_comment("one")).await.unwrap();
  assert_eq!(s.delete_comment(interview.id, 1).await.unwrap(), 1);

  let next = s
    .add_comment(interview.id, new_comment("again"))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(next.id, 2);
}

#[tokio::test]
async fn concurrent_add_comment_yields_distinct_ids() {
  let s = store().await;
  let interview = s.add_interview(new_interview("Rust backend")).await.unwrap();

  let (a, b) = tokio::join!(
    s.add_comment(interview.id, new_comment("left")),
    s.add_comment(interview.id, new_comment("right")),
  );
  let (a, b) = (a.unwrap().unwrap(), b.unwrap().unwrap());
  assert_ne!(a.id, b.id);

  let fetched = s.get_interview(interview.id).await.unwrap().unwrap();
  assert_eq!(fetched.comments.len(), 2);
}

#[tokio::test]
async fn many_concurrent_writers_never_share_an_id() {
  let s = store().await;
  let interview = s.add_interview(new_interview("Rust backend")).await.unwrap();

  let handles: Vec<_> = (0..32)
    .map(|n| {
      let s = s.clone();
      let id = interview.id;
      tokio::spawn(async move { s.add_comment(id, new_comment(&format!("c{n}"))).await })
    })
    .collect();

  let mut ids = HashSet::new();
  for handle in handles {
    let comment = handle.await.unwrap().unwrap().unwrap();
    assert!(ids.insert(comment.id), "duplicate comment id {}", comment.id);
  }

  let fetched = s.get_interview(interview.id).await.unwrap().unwrap();
  assert_eq!(fetched.comments.len(), 32);
  assert_eq!(ids, (1..=32).collect::<HashSet<u64>>());
}

#[tokio::test]
async fn concurrent_writers_on_separate_connections() {
  let path = std::env::temp_dir().join(format!("interview-store-{}.db", uuid::Uuid::new_v4()));
  let collections = Collections::default();
  let first = SqliteStore::open(&path, &collections).await.unwrap();
  let second = SqliteStore::open(&path, &collections).await.unwrap();

  let interview = first.add_interview(new_interview("Rust backend")).await.unwrap();

  let (a, b) = tokio::join!(
    first.add_comment(interview.id, new_comment("via first")),
    second.add_comment(interview.id, new_comment("via second")),
  );
  let (a, b) = (a.unwrap().unwrap(), b.unwrap().unwrap());
  assert_ne!(a.id, b.id);

  let fetched = second.get_interview(interview.id).await.unwrap().unwrap();
  assert_eq!(fetched.comments.len(), 2);

  drop((first, second));
  for suffix in ["", "-wal", "-shm"] {
    let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
  }
}

#[tokio::test]
async fn update_comment_replaces_text_only() {
  let s = store().await;
  let interview = s.add_interview(new_interview("Rust backend")).await.unwrap();
  let original = s
    .add_comment(interview.id, new_comment("first draft"))
    .await
    .unwrap()
    .unwrap();
  s.add_comment(interview.id, new_comment("untouched")).await.unwrap();

  let modified = s
    .update_comment(interview.id, original.id, CommentUpdate { comment: "final".into() })
    .await
    .unwrap();
  assert_eq!(modified, 1);

  let fetched = s.get_interview(interview.id).await.unwrap().unwrap();
  let edited = &fetched.comments[0];
  assert_eq!(edited.id, original.id);
  assert_eq!(edited.comment, "final");
  assert_eq!(edited.create_by, "bob");
  assert_eq!(edited.create_date, original.create_date);
  assert!(edited.updated_date >= original.updated_date);
  assert_eq!(fetched.comments[1].comment, "untouched");
}

#[tokio::test]
async fn update_missing_comment_modifies_nothing() {
  let s = store().await;
  let interview = s.add_interview(new_interview("Rust backend")).await.unwrap();
  s.add_comment(interview.id, new_comment("one")).await.unwrap();

  let update = || CommentUpdate { comment: "x".into() };
  assert_eq!(s.update_comment(interview.id, 42, update()).await.unwrap(), 0);
  assert_eq!(s.update_comment(InterviewId::new(), 1, update()).await.unwrap(), 0);
}

#[tokio::test]
async fn delete_comment_keeps_others_in_place() {
  let s = store().await;
  let interview = s.add_interview(new_interview("Rust backend")).await.unwrap();
  for text in ["a", "b", "c", "d"] {
    s.add_comment(interview.id, new_comment(text)).await.unwrap();
  }

  assert_eq!(s.delete_comment(interview.id, 2).await.unwrap(), 1);
  assert_eq!(s.delete_comment(interview.id, 2).await.unwrap(), 0);
  assert_eq!(s.delete_comment(InterviewId::new(), 1).await.unwrap(), 0);

  let fetched = s.get_interview(interview.id).await.unwrap().unwrap();
  let texts: Vec<_> = fetched.comments.iter().map(|c| c.comment.as_str()).collect();
  assert_eq!(comment_ids(&fetched), [1, 3, 4]);
  assert_eq!(texts, ["a", "c", "d"]);
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

fn fixture_interview() -> Interview {
  let mut interview = Interview::create(InterviewId::new(), new_interview("Seeded"), Utc::now());
  interview.status = InterviewStatus::ToDo;
  for id in [1, 2, 7] {
    interview.push_comment(id, new_comment("seeded"), Utc::now());
  }
  interview
}

#[tokio::test]
async fn seeding_interviews_is_idempotent() {
  let s = store().await;
  let fixture = vec![fixture_interview(), fixture_interview()];

  let first = s.seed_interviews(fixture.clone()).await.unwrap();
  assert_eq!(first, SeedReport { inserted: 2, skipped: 0 });

  let second = s.seed_interviews(fixture.clone()).await.unwrap();
  assert_eq!(second, SeedReport { inserted: 0, skipped: 2 });

  assert_eq!(s.list_interviews().await.unwrap(), fixture);
}

#[tokio::test]
async fn seeded_interview_continues_comment_numbering() {
  let s = store().await;
  let seeded = fixture_interview();
  s.seed_interviews(vec![seeded.clone()]).await.unwrap();

  let comment = s
    .add_comment(seeded.id, new_comment("after seed"))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(comment.id, 8);
}

#[tokio::test]
async fn seeding_rejects_comment_ids_beyond_the_counter_range() {
  let s = store().await;

  let mut too_big = Interview::create(InterviewId::new(), new_interview("Huge"), Utc::now());
  too_big.push_comment(1 << 63, new_comment("out of range"), Utc::now());
  let err = s.seed_interviews(vec![too_big.clone()]).await.unwrap_err();
  assert!(matches!(err, Error::CommentIdOutOfRange(_)), "{err:?}");

  let mut maxed = too_big;
  maxed.comments[0].id = u64::MAX;
  let err = s.seed_interviews(vec![maxed]).await.unwrap_err();
  assert!(matches!(err, Error::CommentIdOutOfRange(u64::MAX)), "{err:?}");

  assert!(s.list_interviews().await.unwrap().is_empty());
}

#[tokio::test]
async fn exhausted_counter_never_repeats_an_id() {
  let s = store().await;

  let mut seeded = Interview::create(InterviewId::new(), new_interview("Edge"), Utc::now());
  seeded.push_comment(i64::MAX as u64 - 1, new_comment("last storable"), Utc::now());
  s.seed_interviews(vec![seeded.clone()]).await.unwrap();

  assert!(s.add_comment(seeded.id, new_comment("a")).await.is_err());
  assert!(s.add_comment(seeded.id, new_comment("b")).await.is_err());

  let fetched = s.get_interview(seeded.id).await.unwrap().unwrap();
  assert_eq!(comment_ids(&fetched), [i64::MAX as u64 - 1]);
}

// ─── Users ───────────────────────────────────────────────────────────────────

fn seed_user(username: &str, password: &str) -> SeedUser {
  SeedUser {
    username: username.into(),
    password: password.into(),
  }
}

#[tokio::test]
async fn seeded_users_are_hashed_and_authenticate() {
  let s = store().await;
  let report = s.seed_users(vec![seed_user("admin", "s3cret")]).await.unwrap();
  assert_eq!(report.inserted, 1);

  let user = s.get_user("admin").await.unwrap().unwrap();
  assert_ne!(user.password_hash, "s3cret");
  assert!(user.password_hash.starts_with("$argon2"));

  assert!(s.authenticate("admin", "s3cret").await.unwrap().is_some());
  assert!(s.authenticate("admin", "wrong").await.unwrap().is_none());
  assert!(s.authenticate("nobody", "s3cret").await.unwrap().is_none());
}

#[tokio::test]
async fn reseeding_users_keeps_the_original_hash() {
  let s = store().await;
  s.seed_users(vec![seed_user("admin", "s3cret")]).await.unwrap();
  let before = s.get_user("admin").await.unwrap().unwrap();

  let report = s.seed_users(vec![seed_user("admin", "other")]).await.unwrap();
  assert_eq!(report, SeedReport { inserted: 0, skipped: 1 });

  let after = s.get_user("admin").await.unwrap().unwrap();
  assert_eq!(before, after);
  assert!(s.authenticate("admin", "s3cret").await.unwrap().is_some());
}

// ─── Configuration ───────────────────────────────────────────────────────────

#[tokio::test]
async fn open_rejects_invalid_collection_names() {
  let collections = Collections {
    interviews: "interviews; --".into(),
    users:      "users".into(),
  };
  let result = SqliteStore::open(":memory:", &collections).await;
  assert!(matches!(result, Err(Error::InvalidCollectionName(_))));
}
