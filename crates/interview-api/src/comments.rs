//! Handlers for `/comment` endpoints.
//!
//! | Method   | Path                                    | Notes |
//! |----------|-----------------------------------------|-------|
//! | `POST`   | `/comment/:idInterview`                 | Body: [`CreateBody`]; returns 201 + the comment with its assigned id |
//! | `PUT`    | `/comment/:idInterview/:idComment`      | Body: [`UpdateBody`] |
//! | `DELETE` | `/comment/:idInterview/:idComment`      | |
//!
//! All three report 404 when either the interview or the comment is missing.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use interview_core::{
  comment::{CommentUpdate, NewComment},
  store::{InterviewStore, UserStore},
};
use serde::Deserialize;

use crate::{
  AppState,
  auth::Authenticated,
  error::ApiError,
  extract::{JsonBody, comment_id, interview_id},
  message,
};

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /comment/:idInterview`. Any id or timestamps
/// in the body are ignored; the store assigns them.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub comment:   String,
  #[serde(default)]
  pub create_by: String,
}

/// `POST /comment/:idInterview`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Path(id): Path<String>,
  JsonBody(body): JsonBody<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InterviewStore + UserStore + Clone + 'static,
{
  let id = interview_id(&id)?;

  let comment = state
    .store
    .add_comment(id, NewComment {
      comment:   body.comment,
      create_by: body.create_by,
    })
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("interview {id} not found")))?;

  tracing::info!(interview = %id, comment = comment.id, "comment created");
  Ok((StatusCode::CREATED, Json(comment)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub comment: String,
}

/// `PUT /comment/:idInterview/:idComment`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Path((id, cid)): Path<(String, String)>,
  JsonBody(body): JsonBody<UpdateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InterviewStore + UserStore + Clone + 'static,
{
  let cid = comment_id(&cid)?;
  let id = interview_id(&id)?;

  let modified = state
    .store
    .update_comment(id, cid, CommentUpdate { comment: body.comment })
    .await
    .map_err(ApiError::store)?;

  if modified == 0 {
    return Err(ApiError::NotFound(format!("comment {cid} not found")));
  }
  Ok(message("comment has been updated"))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /comment/:idInterview/:idComment`
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  _auth: Authenticated,
  Path((id, cid)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InterviewStore + UserStore + Clone + 'static,
{
  let cid = comment_id(&cid)?;
  let id = interview_id(&id)?;

  let deleted = state.store.delete_comment(id, cid).await.map_err(ApiError::store)?;

  if deleted == 0 {
    return Err(ApiError::NotFound(format!("comment {cid} not found")));
  }
  Ok(message("comment has been deleted"))
}
