//! Service Layer
//!
//! Abstraction over the remote LMS API and the async runtime that drives it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 ApiClient                    │
//! │   GET list pages · POST / PATCH / DELETE     │
//! └─────────────────────────────────────────────┘
//!                       │ PageFetcher
//!                       ▼
//! ┌─────────────────────────────────────────────┐
//! │         Paging Layer (accumulators)          │
//! └─────────────────────────────────────────────┘
//! ```

mod api;
mod runtime;

pub use api::*;
pub use runtime::*;
