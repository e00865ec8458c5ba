//! ISO-8601 week arithmetic.
//!
//! An [`IsoWeek`] is always bounded: it never names a week before the
//! founding year and never names a week that has not started yet. Every
//! constructor re-validates, so a value that exists is safe to use in URLs,
//! queries and navigation links.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Local, NaiveDate, TimeDelta, Weekday};

use crate::{Error, Result};

/// The company was founded in 1993; no snippets exist before that.
pub const FOUNDING_YEAR: i32 = 1993;

/// A single ISO week, e.g. `2024-W05`.
///
/// Stored as the Monday the week starts on, so ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoWeek {
  monday: NaiveDate,
}

fn today() -> NaiveDate { Local::now().date_naive() }

impl IsoWeek {
  /// The week containing today's local date.
  pub fn current() -> Self { Self::containing(today()) }

  fn containing(date: NaiveDate) -> Self {
    let days_from_monday = u64::from(date.weekday().num_days_from_monday());
    let monday = date
      .checked_sub_days(chrono::Days::new(days_from_monday))
      .unwrap_or(date);
    Self { monday }
  }

  /// Parse a week from its year and week-number components.
  pub fn parse(year: &str, week: &str) -> Result<Self> {
    Self::parse_as_of(year, week, today())
  }

  /// Like [`IsoWeek::parse`], with "today" supplied by the caller.
  pub fn parse_as_of(year: &str, week: &str, today: NaiveDate) -> Result<Self> {
    let year = year
      .parse::<u32>()
      .ok()
      .and_then(|y| i32::try_from(y).ok())
      .ok_or_else(|| Error::Malformed(year.to_owned()))?;
    let week = week
      .parse::<u32>()
      .map_err(|_| Error::Malformed(week.to_owned()))?;
    Self::bounded(year, week, today)
  }

  /// Move `weeks` weeks forwards (or backwards, when negative).
  ///
  /// Fails instead of clamping when the target is out of bounds, so callers
  /// can treat a missing neighbour as absence.
  pub fn seek(&self, weeks: i64) -> Result<Self> {
    self.seek_as_of(weeks, today())
  }

  /// Like [`IsoWeek::seek`], with "today" supplied by the caller.
  pub fn seek_as_of(&self, weeks: i64, today: NaiveDate) -> Result<Self> {
    let target = TimeDelta::try_weeks(weeks)
      .and_then(|delta| self.monday.checked_add_signed(delta))
      .ok_or(Error::OutOfRange)?;
    let iso = target.iso_week();
    Self::bounded(iso.year(), iso.week(), today)
  }

  fn bounded(year: i32, week: u32, today: NaiveDate) -> Result<Self> {
    let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
      .ok_or(Error::NoSuchWeek { year, week })?;
    if year < FOUNDING_YEAR {
      return Err(Error::BeforeFounding(year));
    }
    let candidate = Self { monday };
    if candidate > Self::containing(today) {
      return Err(Error::InFuture(candidate));
    }
    Ok(candidate)
  }

  /// The ISO week-numbering year, which differs from the calendar year
  /// around New Year.
  pub fn year(&self) -> i32 { self.monday.iso_week().year() }

  pub fn week(&self) -> u32 { self.monday.iso_week().week() }

  /// Monday of this week.
  pub fn first_day(&self) -> NaiveDate { self.monday }

  /// Sunday of this week.
  pub fn last_day(&self) -> NaiveDate {
    self
      .monday
      .checked_add_days(chrono::Days::new(6))
      .unwrap_or(self.monday)
  }
}

impl fmt::Display for IsoWeek {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:04}-W{:02}", self.year(), self.week())
  }
}

/// Parses the canonical `YYYY-Www` form produced by [`fmt::Display`].
impl FromStr for IsoWeek {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let malformed = || Error::Malformed(s.to_owned());
    let (year, week) = s.split_once("-W").ok_or_else(malformed)?;
    let digits = |part: &str, len: usize| {
      part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
    };
    if !digits(year, 4) || !digits(week, 2) {
      return Err(malformed());
    }
    Self::parse(year, week)
  }
}
