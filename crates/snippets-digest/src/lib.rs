//! Weekly email digests for Snippets.
//!
//! Two independent batch jobs share this crate:
//!
//! - [`reminder`]: nudges recent writers about the current week's snippet.
//! - [`subscription`]: sends each subscriber last week's snippets of the
//!   people they follow.
//!
//! Each job gathers everything it needs from a [`SnippetStore`] up front,
//! renders one email per recipient and hands it to a [`mailer::Mailer`].
//! A failed send is logged and counted; the run carries on.
//!
//! [`SnippetStore`]: snippets_core::store::SnippetStore

pub mod config;
pub mod error;
pub mod mailer;
pub mod reminder;
pub mod subscription;
mod templates;

pub use error::{Error, Result};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Outcome of one digest run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
  pub sent:   usize,
  pub failed: usize,
}

/// Install the `fmt` subscriber used by both cron binaries.
pub fn init_tracing() {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();
}
