//! The `SnippetStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `snippets-store-sqlite`).
//! The web handlers and the digest jobs depend on this abstraction, not on
//! any concrete backend.

use std::{collections::BTreeMap, future::Future};

use crate::{
  model::{Post, PostState, Subscription, User},
  week::IsoWeek,
};

/// Abstraction over a Snippets store backend.
///
/// Every write touches a single row; no operation spans a transaction, and
/// concurrent writers to the same row resolve as last-write-wins.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait SnippetStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Cheap round-trip used by the health check.
  fn ping(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Insert the user, or refresh the names of an existing one.
  fn upsert_user<'a>(
    &'a self,
    user: &'a User,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  fn get_user<'a>(
    &'a self,
    user_name: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Every user other than `user_name`, ordered by user name.
  fn list_users_except<'a>(
    &'a self,
    user_name: &'a str,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + 'a;

  /// The stored users among `user_names`. Unknown names are absent from the
  /// map.
  fn users_by_name<'a>(
    &'a self,
    user_names: &'a [String],
  ) -> impl Future<Output = Result<BTreeMap<String, User>, Self::Error>> + Send + 'a;

  // ── Posts ─────────────────────────────────────────────────────────────

  /// Names of users with at least one post in `week` or any later week,
  /// ordered by user name.
  fn users_active_since(
    &self,
    week: IsoWeek,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  fn get_post<'a>(
    &'a self,
    user_name: &'a str,
    week: IsoWeek,
  ) -> impl Future<Output = Result<Option<Post>, Self::Error>> + Send + 'a;

  /// Posts for exactly `week`, restricted to `user_names`, keyed by user name.
  fn posts_for<'a>(
    &'a self,
    user_names: &'a [String],
    week: IsoWeek,
  ) -> impl Future<Output = Result<BTreeMap<String, Post>, Self::Error>> + Send + 'a;

  /// Store `post`, or delete the row when both bodies are empty.
  ///
  /// Returns whether a row exists afterwards.
  fn upsert_post<'a>(
    &'a self,
    post: &'a Post,
  ) -> impl Future<Output = Result<PostState, Self::Error>> + Send + 'a;

  // ── Subscriptions ─────────────────────────────────────────────────────

  fn subscriptions_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Subscription>, Self::Error>> + Send + '_;

  fn is_subscribed<'a>(
    &'a self,
    subscriber: &'a str,
    subscribee: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Idempotent: an existing subscription is left untouched.
  fn create_subscription<'a>(
    &'a self,
    subscription: &'a Subscription,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Idempotent: deleting an absent subscription succeeds.
  fn delete_subscription<'a>(
    &'a self,
    subscription: &'a Subscription,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
