//! Sends every subscriber last week's snippets of the people they follow.
//!
//! Meant to be run by an external scheduler on Monday.

use anyhow::Context as _;
use clap::Parser;
use snippets_core::{IsoWeek, site::SiteUrl};
use snippets_digest::{config::DigestCli, mailer::SmtpMailer, subscription};
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

  let summary = subscription::run(&store, &mailer, &site, IsoWeek::current())
    .await
    .context("subscription digest run failed")?;

  tracing::info!(sent = summary.sent, failed = summary.failed, "subscription digests done");
  Ok(())
}
