//! Subscription digest.
//!
//! Every subscriber receives one email with last week's snippets of the
//! people they follow, split into those who wrote something and those who
//! did not.

use std::collections::{BTreeMap, BTreeSet};

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

/// One subscriber's digest for `week`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
  pub subscriber:    User,
  pub week:          IsoWeek,
  /// Subscribees with a post for `week`, ordered by user name.
  pub wrote:         Vec<(User, Post)>,
  /// Subscribees without one, ordered by user name.
  pub did_not_write: Vec<User>,
}

/// Build every subscriber's digest for `week`, ordered by subscriber name.
pub async fn collect<S: SnippetStore>(store: &S, week: IsoWeek) -> Result<Vec<Digest>> {
  let subscriptions = store
    .subscriptions_all()
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  let mut following: BTreeMap<String, Vec<String>> = BTreeMap::new();
  let mut followed = BTreeSet::new();
  let mut participants = BTreeSet::new();
  for s in subscriptions {
    participants.insert(s.subscriber.clone());
    participants.insert(s.subscribee.clone());
    followed.insert(s.subscribee.clone());
    following.entry(s.subscriber).or_default().push(s.subscribee);
  }

  let participants: Vec<String> = participants.into_iter().collect();
  let followed: Vec<String> = followed.into_iter().collect();

  let users = store
    .users_by_name(&participants)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  let posts = store
    .posts_for(&followed, week)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  let mut digests = Vec::with_capacity(following.len());
  for (subscriber, mut subscribees) in following {
    let Some(subscriber) = users.get(&subscriber).cloned() else {
      tracing::warn!(user = %subscriber, "subscriber has no user row, skipping");
      continue;
    };
    subscribees.sort();

    let mut wrote = Vec::new();
    let mut did_not_write = Vec::new();
    for name in &subscribees {
      let user = users
        .get(name)
        .cloned()
        .unwrap_or_else(|| User::unknown(name));
      match posts.get(name) {
        Some(post) => wrote.push((user, post.clone())),
        None => did_not_write.push(user),
      }
    }

    digests.push(Digest { subscriber, week, wrote, did_not_write });
  }

  Ok(digests)
}

pub fn render(site: &SiteUrl, digest: &Digest) -> Email {
  let body = templates::subscription(
    site,
    &digest.subscriber,
    digest.week,
    &digest.wrote,
    &digest.did_not_write,
  );
  Email {
    to:      digest.subscriber.email_address.clone(),
    subject: format!("Snippets for {}", digest.week),
    html:    body.into_string(),
  }
}

/// Collect, render and send every digest for the week before `this_week`.
pub async fn run<S: SnippetStore, M: Mailer>(
  store: &S,
  mailer: &M,
  site: &SiteUrl,
  this_week: IsoWeek,
) -> Result<RunSummary> {
  let week = this_week.seek(-1)?;
  let digests = collect(store, week).await?;
  tracing::info!(%week, recipients = digests.len(), "sending subscription digests");

  let emails: Vec<Email> = digests.iter().map(|d| render(site, d)).collect();
  Ok(send_all(mailer, &emails).await)
}
