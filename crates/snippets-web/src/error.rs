//! Error types and axum `IntoResponse` implementation.

use axum::{
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::templates::error_page;

#[derive(Debug, Error)]
pub enum Error {
  #[error("no identity supplied by the authenticating proxy")]
  Unauthorized,
  #[error("not found")]
  NotFound,
  #[error("{0}")]
  Forbidden(String),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn status(&self) -> StatusCode {
    match self {
      Error::Unauthorized => StatusCode::UNAUTHORIZED,
      Error::NotFound => StatusCode::NOT_FOUND,
      Error::Forbidden(_) => StatusCode::FORBIDDEN,
      Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    } else {
      tracing::debug!(error = %self, %status, "request rejected");
    }
    let page = error_page(status, &self.to_string());
    (status, Html(page.into_string())).into_response()
  }
}
