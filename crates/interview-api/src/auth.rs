//! HTTP Basic-auth extractor for the mutating routes.
//!
//! Credentials are checked against the user collection. When the server is
//! configured with `require_auth = false` every request passes.

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use interview_core::store::UserStore;

use crate::{AppState, error::ApiError};

/// Present in a handler's arguments means the request may write.
///
/// Holds the authenticated username, or `None` when auth is disabled.
#[derive(Debug)]
pub struct Authenticated(pub Option<String>);

/// Decode `Authorization: Basic …` into `(username, password)`.
pub fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
  let header_val = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
  let encoded    = header_val.strip_prefix("Basic ")?;
  let decoded    = B64.decode(encoded).ok()?;
  let creds      = String::from_utf8(decoded).ok()?;

  let (username, password) = creds.split_once(':')?;
  Some((username.to_owned(), password.to_owned()))
}

impl<S> FromRequestParts<AppState<S>> for Authenticated
where
  S: UserStore + Clone + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    if !state.config.require_auth {
      return Ok(Authenticated(None));
    }

    let (username, password) =
      basic_credentials(&parts.headers).ok_or(ApiError::Unauthorized)?;

    let user = state
      .store
      .authenticate(&username, &password)
      .await
      .map_err(ApiError::store)?
      .ok_or_else(|| {
        tracing::info!(username = %username, "rejected credentials");
        ApiError::Unauthorized
      })?;

    Ok(Authenticated(Some(user.username)))
  }
}
