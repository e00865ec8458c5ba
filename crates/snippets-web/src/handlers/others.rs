//! `GET /others`: everybody except the viewer.

use axum::{extract::State, response::Html};
use snippets_core::{IsoWeek, store::SnippetStore};

use crate::{AppState, error::Error, identity::Identity};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  identity: Identity,
) -> Result<Html<String>, Error>
where
  S: SnippetStore + Clone + 'static,
{
  let users = state
    .store
    .list_users_except(&identity.user_name)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  // Most people look at others' snippets for the week that just ended.
  let current = IsoWeek::current();
  let last_week = current.seek(-1).unwrap_or(current);

  Ok(Html(state.templates.others(&users, last_week).into_string()))
}
