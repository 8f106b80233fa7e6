//! Request extractors and path-segment parsing shared by the handlers.

use axum::extract::FromRequest;
use interview_core::{comment::CommentId, interview::InterviewId};

use crate::error::ApiError;

/// `axum::Json` with every rejection turned into a 400 [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Parse an interview id from the path.
///
/// An id that cannot be parsed cannot name a stored interview, so it is
/// reported as not found rather than as a bad request.
pub fn interview_id(raw: &str) -> Result<InterviewId, ApiError> {
  raw.parse().map_err(|_| {
    tracing::debug!(id = raw, "malformed interview id");
    ApiError::NotFound(format!("interview {raw} not found"))
  })
}

/// Parse a comment id from the path. Comment ids are positive integers.
pub fn comment_id(raw: &str) -> Result<CommentId, ApiError> {
  match raw.parse::<CommentId>() {
    Ok(id) if id > 0 => Ok(id),
    _ => Err(ApiError::BadRequest(format!("comment id {raw:?} is not a positive integer"))),
  }
}
