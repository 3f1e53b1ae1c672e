// src/config.rs
// =============================================================================
// Runtime settings for talking to the GitHub API.
//
// The CLI fills these in from flags or environment variables; library users
// start from Config::default() and override what they need.
// =============================================================================

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Per-request timeout. Expiry is reported as a network error.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root the `repos/{owner}/{repo}/commits/{sha}` path is appended to.
    pub api_base_url: String,
    pub timeout: Duration,
    /// GitHub rejects requests that carry no User-Agent.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
        }
    }
}

pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
