//! Reminder digest.
//!
//! Everyone who posted during the last [`BACKLOG_WEEKS`] weeks gets an email
//! showing what they have written for the current week so far. Eligibility
//! looks back over the whole window; the content shown is the current week
//! only.

use snippets_core::{
  IsoWeek,
  model::{Post, User},
  site::SiteUrl,
  store::SnippetStore,
};

use crate::{
  Error, Result, RunSummary,
  mailer::{Email, Mailer, send_all},
  templates,
};

pub const BACKLOG_WEEKS: i64 = 6;

const SUBJECT: &str = "Snippets reminder";

/// One recipient of the reminder, with their post for the current week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
  pub user:    User,
  pub current: Option<Post>,
}

/// Gather reminder recipients for `this_week`, ordered by user name.
pub async fn collect<S: SnippetStore>(
  store: &S,
  this_week: IsoWeek,
) -> Result<Vec<Reminder>> {
  let since = this_week.seek(-BACKLOG_WEEKS)?;

  let active = store
    .users_active_since(since)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  let mut posts = store
    .posts_for(&active, this_week)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  let mut users = store
    .users_by_name(&active)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  let mut reminders = Vec::with_capacity(active.len());
  for user_name in &active {
    let Some(user) = users.remove(user_name) else {
      tracing::warn!(user = %user_name, "active writer has no user row, skipping");
      continue;
    };
    reminders.push(Reminder {
      current: posts.remove(user_name),
      user,
    });
  }
  Ok(reminders)
}

pub fn render(site: &SiteUrl, reminder: &Reminder) -> Email {
  let body = templates::reminder(site, &reminder.user, BACKLOG_WEEKS, reminder.current.as_ref());
  Email {
    to:      reminder.user.email_address.clone(),
    subject: SUBJECT.to_owned(),
    html:    body.into_string(),
  }
}

/// Collect, render and send every reminder for `this_week`.
pub async fn run<S: SnippetStore, M: Mailer>(
  store: &S,
  mailer: &M,
  site: &SiteUrl,
  this_week: IsoWeek,
) -> Result<RunSummary> {
  let reminders = collect(store, this_week).await?;
  tracing::info!(%this_week, recipients = reminders.len(), "sending reminders");

  let emails: Vec<Email> = reminders.iter().map(|r| render(site, r)).collect();
  Ok(send_all(mailer, &emails).await)
}
