//! snippets-web server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered under
//! `SNIPPETS_*` environment variables, opens the SQLite database and serves
//! the site over plain HTTP. TLS and authentication belong to the reverse
//! proxy in front of it.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use anyhow::Context as _;
use clap::Parser;
use snippets_core::site::SiteUrl;
use snippets_store_sqlite::SqliteStore;
use snippets_web::{AppState, ServerConfig, telemetry, templates::Templates};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// How often histogram buckets are drained into the exposition snapshot.
const METRICS_UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(author, version, about = "Snippets web server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .set_default("host", "0.0.0.0")?
    .set_default("port", 8080)?
    .set_default("base_url", "/")?
    .set_default("db_address", "snippets.sqlite")?
    .set_default("static_dir", "static")?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("SNIPPETS"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let db_path = expand_tilde(&server_cfg.db_address);
  let store = SqliteStore::open(&db_path)
    .await
    .with_context(|| format!("failed to open database at {db_path:?}"))?;

  let metrics = telemetry::install_recorder()
    .context("failed to install metrics recorder")?;
  let upkeep = metrics.clone();
  tokio::spawn(async move {
    let mut interval = tokio::time::interval(METRICS_UPKEEP_INTERVAL);
    loop {
      interval.tick().await;
      upkeep.run_upkeep();
    }
  });

  let state = AppState {
    store:     Arc::new(store),
    templates: Arc::new(Templates::new(SiteUrl::new(server_cfg.base_url.clone()))),
    config:    Arc::new(server_cfg.clone()),
    metrics,
  };

  let app = snippets_web::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!(base_url = %server_cfg.base_url, "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("shut down cleanly");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::warn!(error = %e, "failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
