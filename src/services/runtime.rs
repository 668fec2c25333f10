//! Tokio Runtime Bridge
//!
//! The CLI entry point is synchronous; list views and the API client are
//! async. This module owns the process-wide runtime that drives them.
//!
//! ```text
//! main()
//!   │
//!   ▼
//! block_on(async { view.load_more().await })
//!   │
//!   ▼
//! tokio::Runtime (multi-thread, io + time)
//! ```

use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::{Builder, Runtime};

use crate::error::Result;

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> Result<&'static Runtime> {
    if let Some(runtime) = TOKIO_RUNTIME.get() {
        return Ok(runtime);
    }
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .thread_name("lms-client-io")
        .build()?;
    // A concurrent initializer may have won; its runtime is kept and ours dropped
    Ok(TOKIO_RUNTIME.get_or_init(|| runtime))
}

/// Block on a future synchronously
///
/// **Warning**: This blocks the current thread. Use it from `main` only,
/// never from inside another async task.
pub fn block_on<F, T>(future: F) -> Result<T>
where
    F: Future<Output = T>,
{
    Ok(get_runtime()?.block_on(future))
}
