//! Sends the weekly reminder to everyone who wrote a snippet recently.
//!
//! Meant to be run by an external scheduler late in the week. Every run is
//! independent; rerunning it sends the reminders again.

use anyhow::Context as _;
use clap::Parser;
use snippets_core::{IsoWeek, site::SiteUrl};
use snippets_digest::{config::DigestCli, mailer::SmtpMailer, reminder};
use snippets_store_sqlite::SqliteStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
  snippets_digest::init_tracing();

  let cli = DigestCli::parse();
  let cfg = cli.load().context("failed to load configuration")?;

  let store = SqliteStore::open(&cfg.db_address)
    .await
    .with_context(|| format!("failed to open database at {:?}", cfg.db_address))?;
  let mailer = SmtpMailer::new(&cfg.smtp_from, &cfg.smtp_smarthost)
    .context("failed to set up SMTP transport")?;
  let site = SiteUrl::new(cfg.snippets_url.clone());

  let summary = reminder::run(&store, &mailer, &site, IsoWeek::current())
    .await
    .context("reminder run failed")?;

  tracing::info!(sent = summary.sent, failed = summary.failed, "reminders done");
  Ok(())
}
