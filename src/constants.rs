//! Client Constants
//!
//! Defaults shared by the config layer, the API client and the list views.

/// Items requested per page when the config does not say otherwise
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Per-request timeout applied by the HTTP transport
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Bounded page cache capacity (pages, not items)
pub const PAGE_CACHE_CAPACITY: usize = 256;

/// Default API endpoint
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

/// Config file name inside the platform config directory
pub const CONFIG_FILE_NAME: &str = "client.toml";

/// Log file prefix inside the platform data directory
pub const LOG_FILE_PREFIX: &str = "lms-client.log";

/// Pages loaded by the CLI when no budget is given
pub const DEFAULT_PAGE_BUDGET: u32 = 3;
