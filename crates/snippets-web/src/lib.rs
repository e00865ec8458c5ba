//! Web front end for Snippets.
//!
//! Exposes an axum [`Router`] backed by any [`SnippetStore`]. Requests are
//! expected to arrive through an authenticating reverse proxy; see
//! [`identity`].

pub mod error;
pub mod handlers;
pub mod identity;
pub mod telemetry;
pub mod templates;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  middleware,
  routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use snippets_core::store::SnippetStore;
use tower_http::{services::ServeDir, trace::TraceLayer};

use handlers::{health, landing, others, snippet, subscription};
use templates::Templates;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SNIPPETS_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// Public URL of the site; prefixed to every generated link.
  pub base_url:   String,
  /// Path of the SQLite database file.
  pub db_address: PathBuf,
  /// Directory served under `/static/`.
  pub static_dir: PathBuf,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: SnippetStore> {
  pub store:     Arc<S>,
  pub config:    Arc<ServerConfig>,
  pub templates: Arc<Templates>,
  /// Renders everything recorded through the `metrics` facade.
  pub metrics:   PrometheusHandle,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the Snippets site.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: SnippetStore + Clone + 'static,
{
  let assets = ServeDir::new(&state.config.static_dir);

  Router::new()
    .route("/",                        get(landing::handler::<S>))
    .route("/others",                  get(others::handler::<S>))
    .route("/health",                  get(health::handler::<S>))
    .route("/metrics",                 get(telemetry::render::<S>))
    .route("/{user_name}/subscribe",   post(subscription::subscribe::<S>))
    .route("/{user_name}/unsubscribe", post(subscription::unsubscribe::<S>))
    .route("/{user_name}/{week}",      get(snippet::view::<S>).post(snippet::edit::<S>))
    .nest_service("/static", assets)
    .route_layer(middleware::from_fn(telemetry::track))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
