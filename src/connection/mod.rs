//! Connection Management
//!
//! API endpoint configuration and its persistence.

mod config;

pub use config::*;
