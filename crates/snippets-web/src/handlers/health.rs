//! Health check: succeeds only while the store answers.

use axum::{
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use snippets_core::store::SnippetStore;

use crate::AppState;

pub async fn handler<S>(State(state): State<AppState<S>>) -> Response
where
  S: SnippetStore + Clone + 'static,
{
  match state.store.ping().await {
    Ok(()) => StatusCode::OK.into_response(),
    Err(e) => {
      tracing::error!(error = %e, "health check failed");
      (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
    }
  }
}
