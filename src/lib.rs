//! LMS Client Library
//!
//! Client core for a learning-management backend: "load more" lists of
//! announcements, module sections and discussion comments, kept consistent
//! across resets and mutations, on top of a small REST client.

pub mod connection;
pub mod constants;
pub mod domain;
pub mod error;
pub mod eventing;
pub mod helpers;
pub mod paging;
pub mod services;
pub mod state;

pub use error::{Error, Result};
