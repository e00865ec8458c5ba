pub mod health;
pub mod landing;
pub mod others;
pub mod snippet;
pub mod subscription;

use axum::{
  http::{HeaderMap, header},
  response::Redirect,
};
use snippets_core::model::is_valid_user_name;

use crate::error::Error;

/// A user name taken from the path. Anything that no user could be called is
/// not a page.
pub(super) fn user_from_path(name: String) -> Result<String, Error> {
  if is_valid_user_name(&name) {
    Ok(name)
  } else {
    tracing::debug!(user = %name, "rejected user name");
    Err(Error::NotFound)
  }
}

/// Send the browser back where the form was submitted from, or to
/// `fallback` when the request carries no usable `Referer`.
pub(super) fn back_to(headers: &HeaderMap, fallback: &str) -> Redirect {
  let target = headers
    .get(header::REFERER)
    .and_then(|v| v.to_str().ok())
    .filter(|s| !s.is_empty())
    .unwrap_or(fallback);
  Redirect::to(target)
}
