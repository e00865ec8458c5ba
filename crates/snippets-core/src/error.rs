//! Error types for `snippets-core`.

use thiserror::Error;

use crate::week::IsoWeek;

#[derive(Debug, Error)]
pub enum Error {
  #[error("malformed week component: {0:?}")]
  Malformed(String),

  #[error("{year} has no ISO week {week}")]
  NoSuchWeek { year: i32, week: u32 },

  #[error("year {0} is before the founding year")]
  BeforeFounding(i32),

  #[error("week {0} has not started yet")]
  InFuture(IsoWeek),

  #[error("week offset out of range")]
  OutOfRange,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
