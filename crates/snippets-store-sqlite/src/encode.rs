//! Row decoding and parameter encoding between domain types and SQLite
//! columns.
//!
//! Weeks are stored as two integer columns, `year` and `week`, holding the
//! ISO week-numbering year and the week number.

use rusqlite::Row;
use snippets_core::{
  IsoWeek,
  model::{Post, Subscription, User},
};

pub const USER_COLUMNS: &str = "user_name, real_name, email_address";

pub const POST_COLUMNS: &str =
  "user_name, year, week, body_this_week, body_next_week";

pub fn encode_week(week: IsoWeek) -> (i32, u32) { (week.year(), week.week()) }

/// `?1, ?2, …, ?n` for `IN (…)` clauses, starting at placeholder `first`.
pub fn placeholders(first: usize, n: usize) -> String {
  (first..first + n)
    .map(|i| format!("?{i}"))
    .collect::<Vec<_>>()
    .join(", ")
}

pub fn decode_user(row: &Row<'_>) -> rusqlite::Result<User> {
  Ok(User {
    user_name:     row.get(0)?,
    real_name:     row.get(1)?,
    email_address: row.get(2)?,
  })
}

pub fn decode_post(row: &Row<'_>) -> rusqlite::Result<Post> {
  Ok(Post {
    user_name:      row.get(0)?,
    year:           row.get(1)?,
    week:           row.get(2)?,
    body_this_week: row.get(3)?,
    body_next_week: row.get(4)?,
  })
}

pub fn decode_subscription(row: &Row<'_>) -> rusqlite::Result<Subscription> {
  Ok(Subscription {
    subscriber: row.get(0)?,
    subscribee: row.get(1)?,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn placeholders_are_numbered_from_first() {
    assert_eq!(placeholders(1, 3), "?1, ?2, ?3");
    assert_eq!(placeholders(3, 2), "?3, ?4");
    assert_eq!(placeholders(1, 0), "");
  }
}
