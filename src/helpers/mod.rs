//! Helper Utilities
//!
//! Platform directories, secret-at-rest encoding and display formatting.

mod format;
mod fs;
mod string;

pub use format::*;
pub use fs::*;
pub use string::*;
