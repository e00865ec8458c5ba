//! `POST /{user}/subscribe` and `POST /{user}/unsubscribe`.

use axum::{
  extract::{Path, State},
  http::HeaderMap,
  response::Redirect,
};
use snippets_core::{IsoWeek, model::Subscription, store::SnippetStore};

use crate::{
  AppState,
  error::Error,
  handlers::{back_to, user_from_path},
  identity::Identity,
};

pub async fn subscribe<S>(
  State(state): State<AppState<S>>,
  identity: Identity,
  Path(user_name): Path<String>,
  headers: HeaderMap,
) -> Result<Redirect, Error>
where
  S: SnippetStore + Clone + 'static,
{
  let user_name = user_from_path(user_name)?;
  // The subscriber needs a user row to receive digests.
  state
    .store
    .upsert_user(&identity.to_user())
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  let subscription = Subscription::new(identity.user_name, user_name);
  state
    .store
    .create_subscription(&subscription)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  tracing::info!(
    subscriber = %subscription.subscriber,
    subscribee = %subscription.subscribee,
    "subscribed"
  );

  let fallback = state
    .templates
    .site()
    .snippet(&subscription.subscribee, IsoWeek::current());
  Ok(back_to(&headers, &fallback))
}

pub async fn unsubscribe<S>(
  State(state): State<AppState<S>>,
  identity: Identity,
  Path(user_name): Path<String>,
  headers: HeaderMap,
) -> Result<Redirect, Error>
where
  S: SnippetStore + Clone + 'static,
{
  let user_name = user_from_path(user_name)?;
  let subscription = Subscription::new(identity.user_name, user_name);
  state
    .store
    .delete_subscription(&subscription)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  tracing::info!(
    subscriber = %subscription.subscriber,
    subscribee = %subscription.subscribee,
    "unsubscribed"
  );

  let fallback = state
    .templates
    .site()
    .snippet(&subscription.subscribee, IsoWeek::current());
  Ok(back_to(&headers, &fallback))
}
