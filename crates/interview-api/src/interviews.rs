//! Handlers for `/interviews` endpoints.
//!
//! | Method   | Path              | Notes |
//! |----------|-------------------|-------|
//! | `GET`    | `/interviews`     | Every interview |
//! | `GET`    | `/interviews/:id` | 404 if not found |
//! | `POST`   | `/interviews`     | Body: [`CreateBody`]; returns 201 + stored interview |
//! | `PUT`    | `/interviews/:id` | Body: [`UpdateBody`]; status must be `To do`, `In Progress` or `Done` |
//! | `DELETE` | `/interviews/:id` | 404 if nothing was deleted |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use interview_core::{
  interview::{Interview, InterviewStatus, InterviewUpdate, NewInterview},
  store::{InterviewStore, UserStore},
};
use serde::Deserialize;

use crate::{
  AppState,
  auth::Authenticated,
  error::ApiError,
  extract::{JsonBody, interview_id},
  message,
};

fn require_subject(subject: &str) -> Result<(), ApiError> {
  if subject.trim().is_empty() {
    return Err(ApiError::BadRequest("subject must not be empty".to_owned()));
  }
  Ok(())
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /interviews`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Json<Vec<Interview>>, ApiError>
where
  S: InterviewStore + UserStore + Clone + 'static,
{
  let interviews = state.store.list_interviews().await.map_err(ApiError::store)?;
  Ok(Json(interviews))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /interviews/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Interview>, ApiError>
where
  S: InterviewStore + UserStore + Clone + 'static,
{
  let id = interview_id(&id)?;
  let interview = state
    .store
    .get_interview(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("interview {id} not found")))?;
  Ok(Json(interview))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /interviews`. Any id, status or timestamps in
/// the body are ignored.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub subject:   String,
  #[serde(default)]
  pub detail:    String,
  #[serde(default)]
  pub create_by: String,
}

/// `POST /interviews`: returns 201 + the stored [`Interview`].
pub async fn create<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  JsonBody(body): JsonBody<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InterviewStore + UserStore + Clone + 'static,
{
  require_subject(&body.subject)?;

  let interview = state
    .store
    .add_interview(NewInterview {
      subject:   body.subject,
      detail:    body.detail,
      create_by: body.create_by,
    })
    .await
    .map_err(ApiError::store)?;

  tracing::info!(id = %interview.id, "interview created");
  Ok((StatusCode::CREATED, Json(interview)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `PUT /interviews/:id`.
#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub subject:    String,
  #[serde(default)]
  pub detail:     String,
  /// Kept as text so an unknown value gets a precise error message.
  pub status:     String,
  #[serde(default)]
  pub updated_by: String,
}

/// `PUT /interviews/:id`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Path(id): Path<String>,
  JsonBody(body): JsonBody<UpdateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InterviewStore + UserStore + Clone + 'static,
{
  let status = InterviewStatus::parse_assignable(&body.status)?;
  require_subject(&body.subject)?;
  let id = interview_id(&id)?;

  let modified = state
    .store
    .update_interview(id, InterviewUpdate {
      subject: body.subject,
      detail: body.detail,
      status,
      updated_by: body.updated_by,
    })
    .await
    .map_err(ApiError::store)?;

  if modified == 0 {
    return Err(ApiError::NotFound(format!("interview {id} not found")));
  }
  Ok(message("interview has been updated"))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /interviews/:id`
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InterviewStore + UserStore + Clone + 'static,
{
  let id = interview_id(&id)?;
  let deleted = state.store.delete_interview(id).await.map_err(ApiError::store)?;

  if deleted == 0 {
    return Err(ApiError::NotFound(format!("interview {id} not found")));
  }
  Ok(message("interview has been deleted"))
}
