//! Startup fixture loading.
//!
//! A missing or unparsable fixture file aborts startup. Documents that are
//! already present are left untouched.

use std::path::Path;

use anyhow::Context as _;
use interview_api::SeedConfig;
use interview_core::{interview::Interview, user::SeedUser};
use interview_store_sqlite::SqliteStore;
use serde::de::DeserializeOwned;

pub async fn run(store: &SqliteStore, cfg: &SeedConfig) -> anyhow::Result<()> {
  if let Some(path) = &cfg.interviews {
    let interviews: Vec<Interview> = load_fixture(path)?;
    store
      .seed_interviews(interviews)
      .await
      .with_context(|| format!("failed to seed interviews from {path:?}"))?;
  }

  if let Some(path) = &cfg.users {
    let users: Vec<SeedUser> = load_fixture(path)?;
    store
      .seed_users(users)
      .await
      .with_context(|| format!("failed to seed users from {path:?}"))?;
  }

  Ok(())
}

fn load_fixture<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read fixture {path:?}"))?;
  serde_json::from_str(&raw).with_context(|| format!("failed to parse fixture {path:?}"))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("{}-{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
  }

  #[test]
  fn parses_user_fixture() {
    let path = write_temp("users.json", r#"[{"username":"admin","password":"pw"}]"#);
    let users: Vec<SeedUser> = load_fixture(&path).unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "admin");
    std::fs::remove_file(path).ok();
  }

  #[test]
  fn missing_fixture_is_an_error() {
    let err = load_fixture::<SeedUser>(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("failed to read fixture"));
  }

  #[test]
  fn malformed_fixture_is_an_error() {
    let path = write_temp("broken.json", "[{");
    let err = load_fixture::<Interview>(&path).unwrap_err();
    assert!(err.to_string().contains("failed to parse fixture"));
    std::fs::remove_file(path).ok();
  }

  #[tokio::test]
  async fn bundled_fixtures_load() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../default_data");
    let store = SqliteStore::open_in_memory().await.unwrap();
    let cfg = SeedConfig {
      interviews: Some(root.join("interviews.json")),
      users:      Some(root.join("users.json")),
    };

    run(&store, &cfg).await.unwrap();
    run(&store, &cfg).await.unwrap();

    let interviews: Vec<Interview> = load_fixture(&root.join("interviews.json")).unwrap();
    assert_eq!(
      interview_core::store::InterviewStore::list_interviews(&store)
        .await
        .unwrap()
        .len(),
      interviews.len()
    );
  }
}
