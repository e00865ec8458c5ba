//! Core types and trait definitions for the Snippets service.
//!
//! Free of HTTP and database dependencies. All other crates depend on it;
//! it holds the ISO-week arithmetic that every page view and digest run
//! relies on.

#![allow(async_fn_in_trait)]

pub mod error;
pub mod extract;
pub mod model;
pub mod site;
pub mod store;
pub mod week;

pub use error::{Error, Result};
pub use week::IsoWeek;
