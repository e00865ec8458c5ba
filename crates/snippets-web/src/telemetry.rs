//! Prometheus metrics for the HTTP surface.
//!
//! Every routed request is counted and timed by [`track`], labelled with its
//! method, route pattern and status. [`render`] serves the text exposition
//! format on `GET /metrics`.

use std::time::Instant;

use axum::{
  extract::{MatchedPath, Request, State},
  http::header,
  middleware::Next,
  response::{IntoResponse, Response},
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use snippets_core::store::SnippetStore;

use crate::AppState;

pub const REQUESTS_TOTAL: &str = "http_requests_total";
pub const REQUEST_DURATION: &str = "http_requests_duration_seconds";

const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Install the process-wide Prometheus recorder. Call once, at startup.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
  PrometheusBuilder::new().install_recorder()
}

pub async fn track(req: Request, next: Next) -> Response {
  let start = Instant::now();
  // Route patterns, not raw paths, so label cardinality stays bounded.
  let path = req
    .extensions()
    .get::<MatchedPath>()
    .map(|p| p.as_str().to_owned())
    .unwrap_or_else(|| "unmatched".to_owned());
  let method = req.method().to_string();

  let response = next.run(req).await;

  let labels = [
    ("method", method),
    ("path", path),
    ("status", response.status().as_u16().to_string()),
  ];
  metrics::counter!(REQUESTS_TOTAL, &labels).increment(1);
  metrics::histogram!(REQUEST_DURATION, &labels).record(start.elapsed().as_secs_f64());

  response
}

pub async fn render<S>(State(state): State<AppState<S>>) -> impl IntoResponse
where
  S: SnippetStore + Clone + 'static,
{
  (
    [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
    state.metrics.render(),
  )
}
