//! `GET /`: jump to the viewer's snippet for the current week.

use axum::{extract::State, response::Redirect};
use snippets_core::{IsoWeek, store::SnippetStore};

use crate::{AppState, identity::Identity};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  identity: Identity,
) -> Redirect
where
  S: SnippetStore + Clone + 'static,
{
  let target = state
    .templates
    .site()
    .snippet(&identity.user_name, IsoWeek::current());
  Redirect::to(&target)
}
