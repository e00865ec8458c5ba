//! Trusted-header identity extractor.
//!
//! Authentication happens entirely in the reverse proxy in front of this
//! service. The proxy injects the authenticated subject, display name and
//! email address as request headers; this module is the only place those
//! headers are read.

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, request::Parts},
};
use snippets_core::model::{User, is_valid_user_name};

use crate::error::Error;

pub const SUBJECT_HEADER: &str = "x-auth-subject";
pub const NAME_HEADER: &str = "x-auth-name";
pub const EMAIL_HEADER: &str = "x-auth-email";

/// The user on whose behalf the proxy forwarded this request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
  pub user_name:     String,
  pub real_name:     String,
  pub email_address: String,
}

fn header<'h>(headers: &'h HeaderMap, name: &str) -> &'h str {
  headers
    .get(name)
    .and_then(|v| v.to_str().ok())
    .map(str::trim)
    .unwrap_or_default()
}

impl Identity {
  /// Read the identity headers. A missing or empty subject is rejected, as
  /// is one that is not a valid user name.
  pub fn from_headers(headers: &HeaderMap) -> Result<Self, Error> {
    let user_name = header(headers, SUBJECT_HEADER);
    if user_name.is_empty() {
      return Err(Error::Unauthorized);
    }
    if !is_valid_user_name(user_name) {
      return Err(Error::Forbidden(format!(
        "{user_name:?} is not a valid user name; only lowercase letters are allowed"
      )));
    }
    Ok(Self {
      user_name:     user_name.to_owned(),
      real_name:     header(headers, NAME_HEADER).to_owned(),
      email_address: header(headers, EMAIL_HEADER).to_owned(),
    })
  }

  /// The user row to upsert when this identity writes something.
  pub fn to_user(&self) -> User {
    User {
      user_name:     self.user_name.clone(),
      real_name:     self.real_name.clone(),
      email_address: self.email_address.clone(),
    }
  }

  pub fn owns(&self, user_name: &str) -> bool { self.user_name == user_name }
}

impl<S> FromRequestParts<S> for Identity
where
  S: Send + Sync,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    Self::from_headers(&parts.headers)
  }
}
