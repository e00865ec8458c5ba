//! Persisted entities: users, posts and subscriptions.

use serde::{Deserialize, Serialize};

use crate::week::IsoWeek;

/// A person known to the service, keyed by the upstream identity subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub user_name:     String,
  pub real_name:     String,
  pub email_address: String,
}

impl User {
  /// Stand-in for a user that has no stored row; renders by user name.
  pub fn unknown(user_name: &str) -> Self {
    Self {
      user_name:     user_name.to_owned(),
      real_name:     user_name.to_owned(),
      email_address: String::new(),
    }
  }
}

/// One user's snippet for one ISO week.
///
/// Both bodies hold newline-separated plain-text lines as produced by
/// [`crate::extract::list_elements_from_html`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
  pub user_name:      String,
  pub year:           i32,
  pub week:           u32,
  pub body_this_week: String,
  pub body_next_week: String,
}

impl Post {
  pub fn new(
    user_name: impl Into<String>,
    week: IsoWeek,
    body_this_week: impl Into<String>,
    body_next_week: impl Into<String>,
  ) -> Self {
    Self {
      user_name:      user_name.into(),
      year:           week.year(),
      week:           week.week(),
      body_this_week: body_this_week.into(),
      body_next_week: body_next_week.into(),
    }
  }

  /// A post with no text in either body is never stored.
  pub fn is_empty(&self) -> bool {
    self.body_this_week.is_empty() && self.body_next_week.is_empty()
  }

  pub fn lines_this_week(&self) -> Vec<&str> { split_lines(&self.body_this_week) }

  pub fn lines_next_week(&self) -> Vec<&str> { split_lines(&self.body_next_week) }
}

/// Whether a post row exists after an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostState {
  Absent,
  Present,
}

/// A directed "subscriber follows subscribee" edge.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Subscription {
  pub subscriber: String,
  pub subscribee: String,
}

impl Subscription {
  pub fn new(subscriber: impl Into<String>, subscribee: impl Into<String>) -> Self {
    Self { subscriber: subscriber.into(), subscribee: subscribee.into() }
  }
}

/// User names are one or more lowercase ASCII letters, so they can be used
/// as URL path segments as-is.
pub fn is_valid_user_name(name: &str) -> bool {
  !name.is_empty() && name.bytes().all(|b| b.is_ascii_lowercase())
}

/// The non-empty lines of a stored body.
pub fn split_lines(body: &str) -> Vec<&str> {
  body.split('\n').filter(|line| !line.is_empty()).collect()
}
