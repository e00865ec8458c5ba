//! Outgoing mail.
//!
//! Digest builders produce [`Email`] values; a [`Mailer`] delivers them.
//! [`SmtpMailer`] relays through an unauthenticated smarthost with lettre.

use std::future::Future;

use lettre::{
  AsyncSmtpTransport, AsyncTransport as _, Message, Tokio1Executor,
  message::{Mailbox, header::ContentType},
};
use thiserror::Error;

use crate::RunSummary;

const DEFAULT_SMTP_PORT: u16 = 25;

/// A rendered HTML email for one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
  pub to:      String,
  pub subject: String,
  pub html:    String,
}

#[derive(Debug, Error)]
pub enum MailError {
  #[error("invalid email address {address:?}: {source}")]
  Address {
    address: String,
    #[source]
    source:  lettre::address::AddressError,
  },

  #[error("invalid smarthost {0:?}, expected host[:port]")]
  Smarthost(String),

  #[error("failed to build message: {0}")]
  Message(#[from] lettre::error::Error),

  #[error("smtp error: {0}")]
  Transport(#[from] lettre::transport::smtp::Error),
}

/// Delivers rendered emails.
pub trait Mailer: Send + Sync {
  fn send<'a>(
    &'a self,
    email: &'a Email,
  ) -> impl Future<Output = Result<(), MailError>> + Send + 'a;
}

/// Send `emails` one after another. Failures are logged and counted.
pub async fn send_all<M: Mailer>(mailer: &M, emails: &[Email]) -> RunSummary {
  let mut summary = RunSummary::default();
  for email in emails {
    match mailer.send(email).await {
      Ok(()) => {
        tracing::debug!(to = %email.to, subject = %email.subject, "sent");
        summary.sent += 1;
      }
      Err(e) => {
        tracing::warn!(to = %email.to, error = %e, "failed to send email");
        summary.failed += 1;
      }
    }
  }
  summary
}

// ─── SMTP ────────────────────────────────────────────────────────────────────

pub struct SmtpMailer {
  from:      Mailbox,
  transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
  /// `smarthost` is `host` or `host:port`; the port defaults to 25.
  pub fn new(from: &str, smarthost: &str) -> Result<Self, MailError> {
    let from = parse_mailbox(from)?;
    let (host, port) = split_smarthost(smarthost)?;
    let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
      .port(port)
      .build();
    Ok(Self { from, transport })
  }
}

impl Mailer for SmtpMailer {
  async fn send(&self, email: &Email) -> Result<(), MailError> {
    let message = Message::builder()
      .from(self.from.clone())
      .to(parse_mailbox(&email.to)?)
      .subject(email.subject.as_str())
      .header(ContentType::TEXT_HTML)
      .body(email.html.clone())?;
    self.transport.send(message).await?;
    Ok(())
  }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
  address.parse().map_err(|source| MailError::Address {
    address: address.to_owned(),
    source,
  })
}

fn split_smarthost(smarthost: &str) -> Result<(&str, u16), MailError> {
  let invalid = || MailError::Smarthost(smarthost.to_owned());
  let (host, port) = match smarthost.rsplit_once(':') {
    Some((host, port)) => (host, port.parse().map_err(|_| invalid())?),
    None => (smarthost, DEFAULT_SMTP_PORT),
  };
  if host.is_empty() {
    return Err(invalid());
  }
  Ok((host, port))
}
