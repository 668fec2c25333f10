//! Paging Layer
//!
//! Incremental "load more" lists built from paginated REST responses.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌────────────────────────┐
//! │ PageFetcher  │──▶│ CachedFetcher│──▶│ IncrementalAccumulator │
//! │ (ApiClient)  │   │ (LruPageCache│   │ (items, page, epoch)   │
//! └──────────────┘   └──────────────┘   └────────────────────────┘
//!                                                   ▲
//!                                      MutationBridge (reset on write)
//! ```

mod accumulator;
mod bridge;
mod cache;
mod fetcher;
mod page;

#[cfg(test)]
pub(crate) mod testing;

pub use accumulator::*;
pub use bridge::*;
pub use cache::*;
pub use fetcher::*;
pub use page::*;
