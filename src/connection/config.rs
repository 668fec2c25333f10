//! Client Configuration
//!
//! API endpoint, paging and cache settings, persisted as TOML in the
//! platform config directory. The session token is stored encrypted.

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_API_BASE_URL, DEFAULT_PAGE_SIZE, PAGE_CACHE_CAPACITY,
    REQUEST_TIMEOUT_SECS,
};
use crate::error::{Error, Result};
use crate::helpers::{decrypt, encrypt, get_or_create_config_dir};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Client configuration
#[derive(Debug, Deserialize, Clone, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// REST API root, e.g. `https://lms.example.com/api`
    pub api_base_url: String,
    /// Items per "load more" page
    pub page_size: u32,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Maximum cached pages per list view
    pub cache_capacity: usize,
    /// Session token (encrypted storage)
    pub session_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            cache_capacity: PAGE_CACHE_CAPACITY,
            session_token: None,
        }
    }
}

impl ClientConfig {
    /// Reject settings the client cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(Error::invalid("api_base_url must not be empty"));
        }
        if self.page_size == 0 {
            return Err(Error::invalid("page_size must be greater than 0"));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::invalid("request_timeout_secs must be greater than 0"));
        }
        Ok(())
    }

    /// Load from an explicit path; a missing or blank file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let value = std::fs::read_to_string(path)?;
        if value.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut config: ClientConfig = toml::from_str(&value)?;
        if let Some(token) = &config.session_token {
            // Hand-edited files may carry a plain token
            config.session_token = Some(decrypt(token).unwrap_or_else(|_| token.clone()));
        }
        config.validate()?;
        Ok(config)
    }

    /// Save to an explicit path, encrypting the session token
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let mut stored = self.clone();
        if let Some(token) = &stored.session_token {
            if !token.is_empty() {
                stored.session_token = Some(encrypt(token)?);
            }
        }

        let content = toml::to_string_pretty(&stored)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    /// Load from the platform config directory
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Save to the platform config directory
    pub async fn save(&self) -> Result<()> {
        self.save_to(&config_path()?).await
    }
}

/// Location of `client.toml`
pub fn config_path() -> Result<PathBuf> {
    let path = get_or_create_config_dir()?.join(CONFIG_FILE_NAME);

    #[cfg(debug_assertions)]
    tracing::info!("Client config file: {}", path.display());

    Ok(path)
}
