//! Integration tests for `SqliteStore` against an in-memory database.

use snippets_core::{
  IsoWeek,
  model::{Post, PostState, Subscription, User},
  store::SnippetStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn user(name: &str) -> User {
  User {
    user_name:     name.into(),
    real_name:     format!("{name} real"),
    email_address: format!("{name}@example.com"),
  }
}

fn weeks_ago(n: i64) -> IsoWeek { IsoWeek::current().seek(-n).unwrap() }

fn names(list: &[&str]) -> Vec<String> { list.iter().map(|s| s.to_string()).collect() }

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ping_succeeds() {
  store().await.ping().await.unwrap();
}

#[tokio::test]
async fn upsert_user_creates_then_refreshes() {
  let s = store().await;
  s.upsert_user(&user("alice")).await.unwrap();
  assert_eq!(s.get_user("alice").await.unwrap(), Some(user("alice")));

  let renamed = User {
    real_name: "Alice Liddell".into(),
    ..user("alice")
  };
  s.upsert_user(&renamed).await.unwrap();
  assert_eq!(s.get_user("alice").await.unwrap(), Some(renamed));
}

#[tokio::test]
async fn get_user_missing_returns_none() {
  let s = store().await;
  assert!(s.get_user("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn list_users_except_excludes_and_sorts() {
  let s = store().await;
  for name in ["carol", "alice", "bob"] {
    s.upsert_user(&user(name)).await.unwrap();
  }
  let others = s.list_users_except("bob").await.unwrap();
  let listed: Vec<_> = others.iter().map(|u| u.user_name.as_str()).collect();
  assert_eq!(listed, vec!["alice", "carol"]);
}

#[tokio::test]
async fn users_by_name_skips_unknown() {
  let s = store().await;
  s.upsert_user(&user("alice")).await.unwrap();
  s.upsert_user(&user("bob")).await.unwrap();

  let found = s.users_by_name(&names(&["alice", "ghost"])).await.unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found["alice"], user("alice"));

  assert!(s.users_by_name(&[]).await.unwrap().is_empty());
}

// ─── Posts ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_post_creates_and_reads_back() {
  let s = store().await;
  let week = weeks_ago(1);
  let post = Post::new("alice", week, "wrote tests", "ship it");

  assert_eq!(s.upsert_post(&post).await.unwrap(), PostState::Present);
  assert_eq!(s.get_post("alice", week).await.unwrap(), Some(post));
  assert!(s.get_post("alice", weeks_ago(2)).await.unwrap().is_none());
}

#[tokio::test]
async fn upsert_post_updates_in_place() {
  let s = store().await;
  let week = IsoWeek::current();
  s.upsert_post(&Post::new("alice", week, "draft", "")).await.unwrap();
  s.upsert_post(&Post::new("alice", week, "final", "more"))
    .await
    .unwrap();

  let stored = s.get_post("alice", week).await.unwrap().unwrap();
  assert_eq!(stored.body_this_week, "final");
  assert_eq!(stored.body_next_week, "more");
}

#[tokio::test]
async fn identical_resubmission_keeps_one_row() {
  let s = store().await;
  let week = IsoWeek::current();
  let post = Post::new("alice", week, "same", "same");
  s.upsert_post(&post).await.unwrap();
  s.upsert_post(&post).await.unwrap();

  let posts = s.posts_for(&names(&["alice"]), week).await.unwrap();
  assert_eq!(posts.len(), 1);
  assert_eq!(posts["alice"], post);
}

#[tokio::test]
async fn empty_post_deletes_existing_row() {
  let s = store().await;
  let week = IsoWeek::current();
  s.upsert_post(&Post::new("alice", week, "something", ""))
    .await
    .unwrap();

  let state = s.upsert_post(&Post::new("alice", week, "", "")).await.unwrap();
  assert_eq!(state, PostState::Absent);
  assert!(s.get_post("alice", week).await.unwrap().is_none());
}

#[tokio::test]
async fn empty_post_when_absent_stays_absent() {
  let s = store().await;
  let week = IsoWeek::current();
  let state = s.upsert_post(&Post::new("alice", week, "", "")).await.unwrap();
  assert_eq!(state, PostState::Absent);
  assert!(s.get_post("alice", week).await.unwrap().is_none());
}

#[tokio::test]
async fn users_active_since_includes_boundary_week() {
  let s = store().await;
  s.upsert_post(&Post::new("recent", weeks_ago(5), "x", "")).await.unwrap();
  s.upsert_post(&Post::new("boundary", weeks_ago(6), "x", "")).await.unwrap();
  s.upsert_post(&Post::new("stale", weeks_ago(7), "x", "")).await.unwrap();
  s.upsert_post(&Post::new("recent", weeks_ago(0), "y", "")).await.unwrap();

  let active = s.users_active_since(weeks_ago(6)).await.unwrap();
  assert_eq!(active, vec!["boundary".to_string(), "recent".to_string()]);
}

#[tokio::test]
async fn users_active_since_compares_year_then_week() {
  let s = store().await;
  s.upsert_post(&Post::new("old", weeks_ago(60), "x", "")).await.unwrap();
  s.upsert_post(&Post::new("new", weeks_ago(5), "x", "")).await.unwrap();

  let since = s.users_active_since(weeks_ago(59)).await.unwrap();
  assert_eq!(since, vec!["new".to_string()]);
  let since = s.users_active_since(weeks_ago(60)).await.unwrap();
  assert_eq!(since, vec!["new".to_string(), "old".to_string()]);
}

#[tokio::test]
async fn posts_for_restricts_to_users_and_week() {
  let s = store().await;
  let week = weeks_ago(1);
  s.upsert_post(&Post::new("alice", week, "a", "")).await.unwrap();
  s.upsert_post(&Post::new("bob", week, "b", "")).await.unwrap();
  s.upsert_post(&Post::new("carol", week, "c", "")).await.unwrap();
  s.upsert_post(&Post::new("alice", weeks_ago(2), "older", "")).await.unwrap();

  let posts = s.posts_for(&names(&["alice", "bob", "dave"]), week).await.unwrap();
  assert_eq!(posts.keys().collect::<Vec<_>>(), vec!["alice", "bob"]);
  assert_eq!(posts["alice"].body_this_week, "a");

  assert!(s.posts_for(&[], week).await.unwrap().is_empty());
}

// ─── Subscriptions ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_subscription_is_idempotent() {
  let s = store().await;
  let sub = Subscription::new("alice", "bob");
  s.create_subscription(&sub).await.unwrap();
  s.create_subscription(&sub).await.unwrap();

  assert_eq!(s.subscriptions_all().await.unwrap(), vec![sub]);
  assert!(s.is_subscribed("alice", "bob").await.unwrap());
  assert!(!s.is_subscribed("bob", "alice").await.unwrap());
}

#[tokio::test]
async fn delete_subscription_is_idempotent() {
  let s = store().await;
  let sub = Subscription::new("alice", "bob");
  s.delete_subscription(&sub).await.unwrap();

  s.create_subscription(&sub).await.unwrap();
  s.delete_subscription(&sub).await.unwrap();
  s.delete_subscription(&sub).await.unwrap();
  assert!(s.subscriptions_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn subscriptions_all_is_ordered() {
  let s = store().await;
  s.create_subscription(&Subscription::new("bob", "carol")).await.unwrap();
  s.create_subscription(&Subscription::new("alice", "carol")).await.unwrap();
  s.create_subscription(&Subscription::new("alice", "bob")).await.unwrap();

  let all = s.subscriptions_all().await.unwrap();
  assert_eq!(all, vec![
    Subscription::new("alice", "bob"),
    Subscription::new("alice", "carol"),
    Subscription::new("bob", "carol"),
  ]);
}

#[tokio::test]
async fn file_store_persists_across_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("snippets.sqlite");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.upsert_user(&user("alice")).await.unwrap();
  }
  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.get_user("alice").await.unwrap(), Some(user("alice")));
}
