use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error(transparent)]
  Week(#[from] snippets_core::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
