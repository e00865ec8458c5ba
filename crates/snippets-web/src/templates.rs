//! HTML pages, rendered with maud.
//!
//! [`Templates`] is built once at startup and shared read-only through
//! [`crate::AppState`]; it only carries what every page needs to build
//! absolute links.

use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};
use snippets_core::{IsoWeek, model::Post, model::User, site::SiteUrl};

/// Everything a snippet page shows besides the owner's name.
pub struct SnippetPage<'a> {
  pub user_name: &'a str,
  pub week:      IsoWeek,
  /// `None` when the previous week is before the founding year.
  pub previous:  Option<IsoWeek>,
  /// `None` when the next week has not started yet.
  pub next:      Option<IsoWeek>,
  pub current:   IsoWeek,
  pub post:      Option<&'a Post>,
}

impl<'a> SnippetPage<'a> {
  pub fn new(user_name: &'a str, week: IsoWeek, post: Option<&'a Post>) -> Self {
    Self {
      user_name,
      week,
      previous: week.seek(-1).ok(),
      next: week.seek(1).ok(),
      current: IsoWeek::current(),
      post,
    }
  }

  fn lines_this_week(&self) -> Vec<&'a str> {
    self.post.map(|p| p.lines_this_week()).unwrap_or_default()
  }

  fn lines_next_week(&self) -> Vec<&'a str> {
    self.post.map(|p| p.lines_next_week()).unwrap_or_default()
  }
}

#[derive(Debug, Clone)]
pub struct Templates {
  site: SiteUrl,
}

impl Templates {
  pub fn new(site: SiteUrl) -> Self { Self { site } }

  pub fn site(&self) -> &SiteUrl { &self.site }

  fn layout(&self, title: &str, content: Markup) -> Markup {
    html! {
      (DOCTYPE)
      html lang="en" {
        head {
          meta charset="utf-8";
          meta name="viewport" content="width=device-width, initial-scale=1";
          title { (title) " · Snippets" }
          link rel="stylesheet" href=(self.site.asset("style.css"));
        }
        body {
          nav {
            a href=(self.site.root()) { "My snippets" }
            a href=(self.site.others()) { "Other people" }
          }
          main { (content) }
        }
      }
    }
  }

  fn week_nav(&self, page: &SnippetPage<'_>) -> Markup {
    html! {
      p.week-nav {
        @if let Some(previous) = page.previous {
          a.previous href=(self.site.snippet(page.user_name, previous)) { "« " (previous) }
        }
        span {
          strong { (page.week) }
          " (" (page.week.first_day()) " to " (page.week.last_day()) ")"
        }
        @if let Some(next) = page.next {
          a.next href=(self.site.snippet(page.user_name, next)) { (next) " »" }
        }
        @if page.week != page.current {
          a.current href=(self.site.snippet(page.user_name, page.current)) { "this week" }
        }
      }
    }
  }

  /// The owner's own page: editable.
  pub fn snippet_edit(&self, page: &SnippetPage<'_>) -> Markup {
    let content = html! {
      h1 { "Your snippets" }
      (self.week_nav(page))
      form method="post" action=(self.site.snippet(page.user_name, page.week)) {
        label for="body_this_week" { "What have you been up to this week?" }
        textarea id="body_this_week" name="body_this_week" rows="8" {
          (page.lines_this_week().join("\n"))
        }
        label for="body_next_week" { "What are your plans for next week?" }
        textarea id="body_next_week" name="body_next_week" rows="8" {
          (page.lines_next_week().join("\n"))
        }
        p.hint { "One item per line. Clear both fields to delete this snippet." }
        button type="submit" { "Save" }
      }
    };
    self.layout(&page.week.to_string(), content)
  }

  /// Somebody else's page: read-only, with a subscription toggle.
  pub fn snippet_view(
    &self,
    page: &SnippetPage<'_>,
    real_name: &str,
    subscribed: bool,
  ) -> Markup {
    let this_week = page.lines_this_week();
    let next_week = page.lines_next_week();
    let content = html! {
      h1 { (real_name) "'s snippets" }
      (self.week_nav(page))
      @if this_week.is_empty() && next_week.is_empty() {
        p { (real_name) " did not write a snippet for this week." }
      }
      @if !this_week.is_empty() {
        h2 { "What has " (real_name) " been up to this week?" }
        ul { @for line in &this_week { li { (line) } } }
      }
      @if !next_week.is_empty() {
        h2 { "What are " (real_name) "'s plans for next week?" }
        ul { @for line in &next_week { li { (line) } } }
      }
      @if subscribed {
        form method="post" action=(self.site.unsubscribe(page.user_name)) {
          button type="submit" { "Unsubscribe" }
        }
      } @else {
        form method="post" action=(self.site.subscribe(page.user_name)) {
          button type="submit" { "Subscribe" }
        }
      }
    };
    self.layout(&format!("{real_name} · {}", page.week), content)
  }

  /// Everybody except the viewer, linking to last week's snippets.
  pub fn others(&self, users: &[User], last_week: IsoWeek) -> Markup {
    let content = html! {
      h1 { "Other people" }
      @if users.is_empty() {
        p { "Nobody else has written snippets yet." }
      } @else {
        ul {
          @for user in users {
            li {
              a href=(self.site.snippet(&user.user_name, last_week)) { (user.real_name) }
              " (" (user.user_name) ")"
            }
          }
        }
      }
    };
    self.layout("Other people", content)
  }
}

/// Standalone error page; needs no links so it can render from any
/// [`crate::Error`].
pub fn error_page(status: StatusCode, message: &str) -> Markup {
  html! {
    (DOCTYPE)
    html lang="en" {
      head {
        meta charset="utf-8";
        title { (status) " · Snippets" }
      }
      body {
        h1 { (status.canonical_reason().unwrap_or("Error")) }
        p { (message) }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn templates() -> Templates { Templates::new(SiteUrl::new("https://s.example/")) }

  #[test]
  fn current_week_has_no_next_link() {
    let week = IsoWeek::current();
    let page = SnippetPage::new("alice", week, None);
    let html = templates().snippet_edit(&page).into_string();
    assert!(!html.contains("class=\"next\""), "{html}");
    assert!(html.contains("class=\"previous\""), "{html}");
    assert!(!html.contains("class=\"current\""), "{html}");
  }

  #[test]
  fn founding_week_has_no_previous_link() {
    let week = IsoWeek::parse("1993", "1").unwrap();
    let page = SnippetPage::new("alice", week, None);
    let html = templates().snippet_edit(&page).into_string();
    assert!(!html.contains("class=\"previous\""), "{html}");
    assert!(html.contains("https://s.example/alice/1993-W02"), "{html}");
    assert!(html.contains("1993-01-04 to 1993-01-10"), "{html}");
  }

  #[test]
  fn view_escapes_user_text() {
    let week = IsoWeek::current();
    let post = Post::new("bob", week, "<script>alert(1)</script>", "");
    let page = SnippetPage::new("bob", week, Some(&post));
    let html = templates().snippet_view(&page, "Bob", false).into_string();
    assert!(html.contains("&lt;script&gt;"), "{html}");
    assert!(html.contains("https://s.example/bob/subscribe"), "{html}");
  }

  #[test]
  fn view_without_post_says_so() {
    let page = SnippetPage::new("bob", IsoWeek::current(), None);
    let html = templates().snippet_view(&page, "Bob", true).into_string();
    assert!(html.contains("Bob did not write a snippet for this week."), "{html}");
    assert!(html.contains("https://s.example/bob/unsubscribe"), "{html}");
  }

  #[test]
  fn error_page_shows_reason_and_message() {
    let html = error_page(StatusCode::FORBIDDEN, "nope").into_string();
    assert!(html.contains("Forbidden"));
    assert!(html.contains("nope"));
  }
}
