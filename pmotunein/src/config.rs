//! Client configuration
//!
//! The configuration is fixed when a [`TuneInClient`](crate::TuneInClient)
//! is built and never changes afterwards. A client talking to another
//! backend needs its own instance.
//!
//! ```
//! use pmotunein::TuneInConfig;
//!
//! let config = TuneInConfig::from_yaml_str(
//!     "base_url: https://opml.radiotime.com\npartner_id: abc123\n",
//! )
//! .unwrap();
//! assert_eq!(config.partner_id.as_deref(), Some("abc123"));
//! assert_eq!(config.timeout_ms, 30_000);
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default TuneIn OPML base URL
pub const DEFAULT_BASE_URL: &str = "https://opml.radiotime.com";

/// Output format requested on every call
pub const RENDER_FORMAT: &str = "json";

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = concat!("PMOMusic/", env!("CARGO_PKG_VERSION"), " (pmotunein)");

/// Settings shared by every call of a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuneInConfig {
    /// Scheme, host and optional service prefix
    pub base_url: String,
    /// TuneIn partner id, sent as `partnerId` when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,
    /// Transport timeout in milliseconds, must be non-zero
    pub timeout_ms: u64,
    /// User-Agent header
    pub user_agent: String,
}

impl Default for TuneInConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            partner_id: None,
            timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl TuneInConfig {
    /// Parse a YAML document, missing keys take their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML configuration file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Transport timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Parsed base URL
    pub fn base_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    /// Check that endpoint paths can be appended to the base URL and that
    /// the timeout lets a request complete
    pub fn validate(&self) -> Result<()> {
        let url = self.base_url()?;
        if url.cannot_be_a_base() {
            return Err(Error::other(format!(
                "base URL cannot carry a path: {}",
                self.base_url
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(Error::other(format!(
                "base URL must not carry a query or fragment: {}",
                self.base_url
            )));
        }
        if self.timeout_ms == 0 {
            return Err(Error::other("request timeout must be non-zero"));
        }
        Ok(())
    }
}
