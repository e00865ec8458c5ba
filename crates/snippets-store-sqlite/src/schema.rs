//! SQL schema for the Snippets SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS users (
    user_name     TEXT PRIMARY KEY,
    real_name     TEXT NOT NULL,
    email_address TEXT NOT NULL
);

-- One row per (user, ISO week). Rows with both bodies empty are deleted
-- rather than stored.
CREATE TABLE IF NOT EXISTS posts (
    user_name      TEXT    NOT NULL,
    year           INTEGER NOT NULL,   -- ISO week-numbering year
    week           INTEGER NOT NULL,   -- 1..=53
    body_this_week TEXT    NOT NULL DEFAULT '',
    body_next_week TEXT    NOT NULL DEFAULT '',
    PRIMARY KEY (user_name, year, week)
);

-- Directed edges: subscriber receives digests of subscribee's posts.
CREATE TABLE IF NOT EXISTS subscriptions (
    subscriber TEXT NOT NULL,
    subscribee TEXT NOT NULL,
    PRIMARY KEY (subscriber, subscribee)
);

CREATE INDEX IF NOT EXISTS posts_week_idx ON posts(year, week);

PRAGMA user_version = 1;
";
