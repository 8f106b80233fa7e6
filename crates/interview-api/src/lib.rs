//! JSON REST API for the interview tracker.
//!
//! Exposes an axum [`Router`] backed by any store implementing
//! [`InterviewStore`] and [`UserStore`]. Handlers validate request shape,
//! call exactly one store operation, and map its result to a status code.

pub mod auth;
pub mod comments;
pub mod error;
pub mod extract;
pub mod interviews;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Json, Router,
  routing::{get, post, put},
};
use interview_core::store::{InterviewStore, UserStore};
use interview_store_sqlite::Collections;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `INTERVIEW_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  pub store_path:   PathBuf,
  /// Require HTTP Basic credentials on every mutating route.
  pub require_auth: bool,
  pub collections:  Collections,
  pub seed:         SeedConfig,
}

/// Fixture files loaded into the store at startup. `None` skips a collection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
  pub interviews: Option<PathBuf>,
  pub users:      Option<PathBuf>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:         "0.0.0.0".to_owned(),
      port:         8080,
      store_path:   PathBuf::from("interviews.db"),
      require_auth: false,
      collections:  Collections::default(),
      seed:         SeedConfig::default(),
    }
  }
}

impl Default for SeedConfig {
  fn default() -> Self {
    Self {
      interviews: Some(PathBuf::from("default_data/interviews.json")),
      users:      Some(PathBuf::from("default_data/users.json")),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers. Built once at startup.
#[derive(Clone)]
pub struct AppState<S> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

impl<S> AppState<S> {
  pub fn new(store: S, config: ServerConfig) -> Self {
    Self {
      store:  Arc::new(store),
      config: Arc::new(config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: InterviewStore + UserStore + Clone + 'static,
{
  Router::new()
    .route("/healthCheck", get(health_check))
    // Interviews
    .route(
      "/interviews",
      get(interviews::list::<S>).post(interviews::create::<S>),
    )
    .route(
      "/interviews/{id}",
      get(interviews::get_one::<S>)
        .put(interviews::update::<S>)
        .delete(interviews::delete_one::<S>),
    )
    // Comments
    .route("/comment/{id}", post(comments::create::<S>))
    .route(
      "/comment/{id}/{comment_id}",
      put(comments::update::<S>).delete(comments::delete_one::<S>),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// `GET /healthCheck`. Never touches the store.
async fn health_check() -> &'static str { "service start" }

pub(crate) fn message(text: &str) -> Json<Value> { Json(json!({ "message": text })) }

// ─── Integration tests ────────────────────────────────────────────────────────
