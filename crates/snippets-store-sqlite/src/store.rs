//! [`SqliteStore`]: the SQLite implementation of [`SnippetStore`].

use std::{collections::BTreeMap, path::Path};

use rusqlite::{OptionalExtension as _, types::Value};
use snippets_core::{
  IsoWeek,
  model::{Post, PostState, Subscription, User},
  store::SnippetStore,
};

use crate::{
  Result,
  encode::{
    POST_COLUMNS, USER_COLUMNS, decode_post, decode_subscription, decode_user,
    encode_week, placeholders,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Snippets store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_post(&self, user_name: String, year: i32, week: u32) -> Result<()> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM posts WHERE user_name = ?1 AND year = ?2 AND week = ?3",
          rusqlite::params![user_name, year, week],
        )?)
      })
      .await?;
    tracing::debug!(deleted, year, week, "removed empty post");
    Ok(())
  }
}

// ─── SnippetStore impl ───────────────────────────────────────────────────────

impl SnippetStore for SqliteStore {
  type Error = crate::Error;

  async fn ping(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn upsert_user(&self, user: &User) -> Result<()> {
    let user = user.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (user_name, real_name, email_address)
           VALUES (?1, ?2, ?3)
           ON CONFLICT (user_name) DO UPDATE SET
             real_name     = excluded.real_name,
             email_address = excluded.email_address",
          rusqlite::params![user.user_name, user.real_name, user.email_address],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn get_user(&self, user_name: &str) -> Result<Option<User>> {
    let user_name = user_name.to_owned();
    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(
            conn
              .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE user_name = ?1"),
                rusqlite::params![user_name],
                decode_user,
              )
              .optional()?,
          )
        })
        .await?,
    )
  }

  async fn list_users_except(&self, user_name: &str) -> Result<Vec<User>> {
    let user_name = user_name.to_owned();
    Ok(
      self
        .conn
        .call(move |conn| {
          let mut stmt = conn.prepare(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE user_name != ?1
             ORDER BY user_name"
          ))?;
          let rows = stmt
            .query_map(rusqlite::params![user_name], decode_user)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn users_by_name(
    &self,
    user_names: &[String],
  ) -> Result<BTreeMap<String, User>> {
    if user_names.is_empty() {
      return Ok(BTreeMap::new());
    }
    let names = user_names.to_vec();

    let users: Vec<User> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {USER_COLUMNS} FROM users WHERE user_name IN ({})",
          placeholders(1, names.len())
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(names.iter()), decode_user)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(users.into_iter().map(|u| (u.user_name.clone(), u)).collect())
  }

  // ── Posts ─────────────────────────────────────────────────────────────────

  async fn users_active_since(&self, week: IsoWeek) -> Result<Vec<String>> {
    let (year, week) = encode_week(week);
    Ok(
      self
        .conn
        .call(move |conn| {
          let mut stmt = conn.prepare(
            "SELECT DISTINCT user_name FROM posts
             WHERE (year = ?1 AND week >= ?2) OR year > ?1
             ORDER BY user_name",
          )?;
          let rows = stmt
            .query_map(rusqlite::params![year, week], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn get_post(&self, user_name: &str, week: IsoWeek) -> Result<Option<Post>> {
    let user_name = user_name.to_owned();
    let (year, week) = encode_week(week);
    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(
            conn
              .query_row(
                &format!(
                  "SELECT {POST_COLUMNS} FROM posts
                   WHERE user_name = ?1 AND year = ?2 AND week = ?3"
                ),
                rusqlite::params![user_name, year, week],
                decode_post,
              )
              .optional()?,
          )
        })
        .await?,
    )
  }

  async fn posts_for(
    &self,
    user_names: &[String],
    week: IsoWeek,
  ) -> Result<BTreeMap<String, Post>> {
    if user_names.is_empty() {
      return Ok(BTreeMap::new());
    }
    let (year, week) = encode_week(week);
    let mut values = vec![Value::Integer(year.into()), Value::Integer(week.into())];
    values.extend(user_names.iter().cloned().map(Value::Text));

    let posts: Vec<Post> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {POST_COLUMNS} FROM posts
           WHERE year = ?1 AND week = ?2 AND user_name IN ({})",
          placeholders(3, values.len() - 2)
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(values.iter()), decode_post)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(posts.into_iter().map(|p| (p.user_name.clone(), p)).collect())
  }

  async fn upsert_post(&self, post: &Post) -> Result<PostState> {
    if post.is_empty() {
      self
        .delete_post(post.user_name.clone(), post.year, post.week)
        .await?;
      return Ok(PostState::Absent);
    }

    let post = post.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO posts (user_name, year, week, body_this_week, body_next_week)
           VALUES (?1, ?2, ?3, ?4, ?5)
           ON CONFLICT (user_name, year, week) DO UPDATE SET
             body_this_week = excluded.body_this_week,
             body_next_week = excluded.body_next_week",
          rusqlite::params![
            post.user_name,
            post.year,
            post.week,
            post.body_this_week,
            post.body_next_week,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(PostState::Present)
  }

  // ── Subscriptions ─────────────────────────────────────────────────────────

  async fn subscriptions_all(&self) -> Result<Vec<Subscription>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn.prepare(
            "SELECT subscriber, subscribee FROM subscriptions
             ORDER BY subscriber, subscribee",
          )?;
          let rows = stmt
            .query_map([], decode_subscription)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn is_subscribed(&self, subscriber: &str, subscribee: &str) -> Result<bool> {
    let (subscriber, subscribee) = (subscriber.to_owned(), subscribee.to_owned());
    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(
            conn
              .query_row(
                "SELECT 1 FROM subscriptions WHERE subscriber = ?1 AND subscribee = ?2",
                rusqlite::params![subscriber, subscribee],
                |_| Ok(true),
              )
              .optional()?
              .unwrap_or(false),
          )
        })
        .await?,
    )
  }

  async fn create_subscription(&self, subscription: &Subscription) -> Result<()> {
    let Subscription { subscriber, subscribee } = subscription.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO subscriptions (subscriber, subscribee) VALUES (?1, ?2)",
          rusqlite::params![subscriber, subscribee],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_subscription(&self, subscription: &Subscription) -> Result<()> {
    let Subscription { subscriber, subscribee } = subscription.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM subscriptions WHERE subscriber = ?1 AND subscribee = ?2",
          rusqlite::params![subscriber, subscribee],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
