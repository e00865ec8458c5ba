//! Email bodies, rendered with maud.

use maud::{DOCTYPE, Markup, html};
use snippets_core::{IsoWeek, model::Post, model::User, site::SiteUrl};

fn email(content: Markup) -> Markup {
  html! {
    (DOCTYPE)
    html {
      head { title { "Snippets" } }
      body { (content) }
    }
  }
}

fn bullet_list(lines: &[&str]) -> Markup {
  html! { ul { @for line in lines { li { (line) } } } }
}

pub(crate) fn reminder(
  site: &SiteUrl,
  user: &User,
  backlog_weeks: i64,
  current: Option<&Post>,
) -> Markup {
  let this_week = current.map(Post::lines_this_week).unwrap_or_default();
  let next_week = current.map(Post::lines_next_week).unwrap_or_default();
  email(html! {
    p { "Hello " (user.real_name) "," }
    p {
      "You are receiving this email, because you wrote on "
      a href=(site.root()) { "Snippets" }
      " during any of the past " (backlog_weeks) " weeks."
    }
    @if this_week.is_empty() {
      p { "You currently didn't write any snippets this week." }
    } @else {
      p { "You currently wrote the following:" }
      ul {
        li { "What have you been up to this week?" }
        (bullet_list(&this_week))
        @if !next_week.is_empty() {
          li { "What are your plans for next week?" }
          (bullet_list(&next_week))
        }
      }
    }
    p {
      "Your snippet will be sent on Monday to your subscribers. "
      "Please make sure they are completed by then."
    }
  })
}

pub(crate) fn subscription(
  site: &SiteUrl,
  subscriber: &User,
  week: IsoWeek,
  wrote: &[(User, Post)],
  did_not_write: &[User],
) -> Markup {
  email(html! {
    p { "Hello " (subscriber.real_name) "," }
    p {
      "You are receiving this email, because you are subscribed to one or more people on "
      a href=(site.root()) { "Snippets" }
      ". This email contains copies of snippets that people you are subscribed to have written last week."
    }
    @for (user, post) in wrote {
      hr;
      @let this_week = post.lines_this_week();
      @let next_week = post.lines_next_week();
      @if !this_week.is_empty() {
        h2 { "What has " (user.real_name) " been up to last week?" }
        (bullet_list(&this_week))
      }
      @if !next_week.is_empty() {
        h2 { "What are " (user.real_name) "'s plans for this week?" }
        (bullet_list(&next_week))
      }
      p { a href=(site.snippet(&user.user_name, week)) { "link" } }
    }
    @if !did_not_write.is_empty() {
      hr;
      h2 { "People who did not write a snippet last week" }
      ul {
        @for user in did_not_write {
          li { a href=(site.snippet(&user.user_name, week)) { (user.real_name) } }
        }
      }
    }
  })
}
