//! Error types for LMS Client
//!
//! One snafu enum covers config, transport and API failures; the paging
//! layer propagates it unchanged to the caller.

use snafu::Snafu;

/// Main error type for the client
#[derive(Debug, Snafu)]
pub enum Error {
    /// Rejected argument, config value or response shape
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// IO error (config files, log directory)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },

    /// Transport-level HTTP failure
    #[snafu(display("HTTP error: {source}"))]
    Http { source: reqwest::Error },

    /// The API answered with a non-success status
    #[snafu(display("API error ({status}): {message}"))]
    Api { status: u16, message: String },

    /// Missing or rejected session token
    #[snafu(display("Unauthorized: {message}"))]
    Unauthorized { message: String },

    /// Request exceeded its deadline
    #[snafu(display("Timed out: {message}"))]
    Timeout { message: String },
}

impl Error {
    /// Build an `Invalid` error from any message
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::Invalid {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        if source.is_timeout() {
            return Error::Timeout {
                message: source.to_string(),
            };
        }
        Error::Http { source }
    }
}

/// Crate-wide result alias
pub type Result<T, E = Error> = std::result::Result<T, E>;
