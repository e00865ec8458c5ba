//! Absolute links into the public site, shared by pages and emails.

use crate::week::IsoWeek;

/// The public base URL of the site, e.g. `https://snippets.example.com/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrl {
  base: String,
}

impl SiteUrl {
  pub fn new(base: impl Into<String>) -> Self {
    let mut base = base.into();
    while base.ends_with('/') {
      base.pop();
    }
    Self { base }
  }

  /// The landing page.
  pub fn root(&self) -> String { format!("{}/", self.base) }

  /// The page for one user's snippet in one week.
  pub fn snippet(&self, user_name: &str, week: IsoWeek) -> String {
    format!("{}/{user_name}/{week}", self.base)
  }

  pub fn others(&self) -> String { format!("{}/others", self.base) }

  pub fn subscribe(&self, user_name: &str) -> String {
    format!("{}/{user_name}/subscribe", self.base)
  }

  pub fn unsubscribe(&self, user_name: &str) -> String {
    format!("{}/{user_name}/unsubscribe", self.base)
  }

  pub fn asset(&self, path: &str) -> String {
    format!("{}/static/{path}", self.base)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn trailing_slashes_are_normalised() {
    let week = IsoWeek::parse_as_of(
      "2024",
      "7",
      chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    )
    .unwrap();
    for base in ["https://s.example", "https://s.example/", "https://s.example//"] {
      let site = SiteUrl::new(base);
      assert_eq!(site.root(), "https://s.example/");
      assert_eq!(site.snippet("alice", week), "https://s.example/alice/2024-W07");
    }
  }

  #[test]
  fn empty_base_gives_relative_links() {
    let site = SiteUrl::new("");
    assert_eq!(site.root(), "/");
    assert_eq!(site.others(), "/others");
    assert_eq!(site.subscribe("bob"), "/bob/subscribe");
  }
}
