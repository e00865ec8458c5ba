//! `GET|POST /{user}/{YYYY-Www}`: view, or edit one's own, snippet.

use axum::{
  Form,
  extract::{Path, State},
  http::HeaderMap,
  response::{Html, Redirect},
};
use serde::Deserialize;
use snippets_core::{
  IsoWeek, extract::list_elements_from_html, model::Post, store::SnippetStore,
};

use crate::{
  AppState,
  error::Error,
  handlers::{back_to, user_from_path},
  identity::Identity,
  templates::SnippetPage,
};

/// Any week that fails to parse (malformed, nonexistent, before founding,
/// or in the future) is simply not a page.
fn parse_week(text: &str) -> Result<IsoWeek, Error> {
  text.parse().map_err(|e| {
    tracing::debug!(week = text, error = %e, "rejected week");
    Error::NotFound
  })
}

pub async fn view<S>(
  State(state): State<AppState<S>>,
  identity: Identity,
  Path((user_name, week)): Path<(String, String)>,
) -> Result<Html<String>, Error>
where
  S: SnippetStore + Clone + 'static,
{
  let user_name = user_from_path(user_name)?;
  let week = parse_week(&week)?;

  let post = state
    .store
    .get_post(&user_name, week)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  let page = SnippetPage::new(&user_name, week, post.as_ref());

  if identity.owns(&user_name) {
    return Ok(Html(state.templates.snippet_edit(&page).into_string()));
  }

  let user = state
    .store
    .get_user(&user_name)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or(Error::NotFound)?;

  let subscribed = state
    .store
    .is_subscribed(&identity.user_name, &user_name)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  Ok(Html(
    state
      .templates
      .snippet_view(&page, &user.real_name, subscribed)
      .into_string(),
  ))
}

/// Fields posted by the edit form. Either may hold HTML or plain text.
#[derive(Debug, Default, Deserialize)]
pub struct SnippetForm {
  #[serde(default)]
  pub body_this_week: String,
  #[serde(default)]
  pub body_next_week: String,
}

pub async fn edit<S>(
  State(state): State<AppState<S>>,
  identity: Identity,
  Path((user_name, week)): Path<(String, String)>,
  headers: HeaderMap,
  Form(form): Form<SnippetForm>,
) -> Result<Redirect, Error>
where
  S: SnippetStore + Clone + 'static,
{
  let user_name = user_from_path(user_name)?;
  let week = parse_week(&week)?;

  if !identity.owns(&user_name) {
    return Err(Error::Forbidden(
      "Snippets from other users cannot be edited".to_string(),
    ));
  }

  let post = Post::new(
    user_name,
    week,
    list_elements_from_html(&form.body_this_week),
    list_elements_from_html(&form.body_next_week),
  );

  if !post.is_empty() {
    state
      .store
      .upsert_user(&identity.to_user())
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;
  }

  let stored = state
    .store
    .upsert_post(&post)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  tracing::info!(user = %post.user_name, %week, ?stored, "saved snippet");

  let fallback = state.templates.site().snippet(&post.user_name, week);
  Ok(back_to(&headers, &fallback))
}
