//! File System Utilities
//!
//! Platform config/data directory management.

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "lms", "lms-client")
        .ok_or_else(|| Error::invalid("Could not determine project directories"))
}

fn ensure_dir(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(dir.to_path_buf())
}

/// Get or create the client's configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/lms-client/` or `$XDG_CONFIG_HOME/lms-client/`
/// - **macOS**: `~/Library/Application Support/com.lms.lms-client/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\lms\lms-client\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    ensure_dir(project_dirs()?.config_dir())
}

/// Get or create the data directory (log files)
///
/// Platform-specific locations:
/// - **Linux**: `~/.local/share/lms-client/`
/// - **macOS**: `~/Library/Application Support/com.lms.lms-client/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\lms\lms-client\data\`
pub fn get_or_create_data_dir() -> Result<PathBuf> {
    ensure_dir(project_dirs()?.data_dir())
}

/// Check if running in development mode
pub fn is_development() -> bool {
    cfg!(debug_assertions)
}
