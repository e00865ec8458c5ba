//! Command-line flags and configuration shared by the cron binaries.
//!
//! Values are layered, lowest priority first: the optional TOML file,
//! `SNIPPETS_*` environment variables, then explicit flags.

use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

#[derive(Parser, Debug, Default)]
#[command(author, version)]
pub struct DigestCli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  pub config: PathBuf,

  /// Path of the SQLite database file.
  #[arg(long)]
  pub db_address: Option<String>,

  /// Source email address.
  #[arg(long)]
  pub smtp_from: Option<String>,

  /// SMTP server to relay through, as `host[:port]`.
  #[arg(long)]
  pub smtp_smarthost: Option<String>,

  /// Public URL of the Snippets site.
  #[arg(long)]
  pub snippets_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DigestConfig {
  pub db_address:     PathBuf,
  pub smtp_from:      String,
  pub smtp_smarthost: String,
  pub snippets_url:   String,
}

impl DigestCli {
  pub fn load(&self) -> Result<DigestConfig, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(self.config.clone()).required(false))
      .add_source(config::Environment::with_prefix("SNIPPETS"))
      .set_override_option("db_address", self.db_address.clone())?
      .set_override_option("smtp_from", self.smtp_from.clone())?
      .set_override_option("smtp_smarthost", self.smtp_smarthost.clone())?
      .set_override_option("snippets_url", self.snippets_url.clone())?
      .build()?
      .try_deserialize()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn temp_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("snippets.toml");
    std::fs::write(&path, body).unwrap();
    path
  }

  #[test]
  fn flags_override_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_config(
      &dir,
      r#"
        db_address     = "/var/lib/snippets.sqlite"
        smtp_from      = "file@example.com"
        smtp_smarthost = "mail.example.com:25"
        snippets_url   = "https://snippets.example.com/"
      "#,
    );
    let cli = DigestCli {
      config: path,
      smtp_from: Some("flag@example.com".into()),
      ..Default::default()
    };
    let cfg = cli.load().unwrap();
    assert_eq!(cfg.smtp_from, "flag@example.com");
    assert_eq!(cfg.smtp_smarthost, "mail.example.com:25");
    assert_eq!(cfg.db_address, PathBuf::from("/var/lib/snippets.sqlite"));
  }

  #[test]
  fn flags_alone_are_enough() {
    let cli = DigestCli {
      config:         PathBuf::from("/nonexistent/snippets.toml"),
      db_address:     Some("snippets.sqlite".into()),
      smtp_from:      Some("snippets@example.com".into()),
      smtp_smarthost: Some("localhost".into()),
      snippets_url:   Some("https://s.example/".into()),
    };
    let cfg = cli.load().unwrap();
    assert_eq!(cfg.snippets_url, "https://s.example/");
  }

  #[test]
  fn missing_setting_is_an_error() {
    let cli = DigestCli {
      config:    PathBuf::from("/nonexistent/snippets.toml"),
      smtp_from: Some("snippets@example.com".into()),
      ..Default::default()
    };
    assert!(cli.load().is_err());
  }
}
