//! Configuration loaded from environment variables.

use std::time::Duration;

use list_sync::{DEFAULT_NOTIFICATION_TTL, SyncConfig};
use transport::HttpTransportConfig;
use views::Capabilities;

use crate::{ConsoleError, Result};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Client configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `LIBRARY_API_URL`: server base URL (default: `"http://127.0.0.1:5000"`)
/// - `LIBRARY_API_KEY`: credential sent with mutations (default: none)
/// - `LIBRARY_CAPABILITIES`: comma separated, e.g. `"manage_books,borrow"` (default: none)
/// - `LIBRARY_REQUEST_TIMEOUT_SECS`: per-request timeout (default: none)
/// - `LIBRARY_NOTIFICATION_TTL_SECS`: notification lifetime (default: `5`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub api_key: Option<String>,
    pub capabilities: String,
    pub request_timeout: Option<Duration>,
    pub notification_ttl: Duration,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            capabilities: String::new(),
            request_timeout: None,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
            log_level: "info".to_string(),
        }
    }
}

fn seconds(name: &'static str, value: Option<String>) -> Result<Option<Duration>> {
    value
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConsoleError::InvalidSetting { name, value: raw })
        })
        .transpose()
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults.
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            api_url: get("LIBRARY_API_URL").unwrap_or(defaults.api_url),
            api_key: get("LIBRARY_API_KEY"),
            capabilities: get("LIBRARY_CAPABILITIES").unwrap_or_default(),
            request_timeout: seconds(
                "LIBRARY_REQUEST_TIMEOUT_SECS",
                get("LIBRARY_REQUEST_TIMEOUT_SECS"),
            )?,
            notification_ttl: seconds(
                "LIBRARY_NOTIFICATION_TTL_SECS",
                get("LIBRARY_NOTIFICATION_TTL_SECS"),
            )?
            .unwrap_or(defaults.notification_ttl),
            log_level: get("RUST_LOG").unwrap_or(defaults.log_level),
        })
    }

    /// Parses the capability list.
    pub fn capabilities(&self) -> Result<Capabilities> {
        Ok(Capabilities::parse_list(&self.capabilities)?)
    }

    /// Builds the per-view synchronizer configuration.
    pub fn sync_config(&self) -> Result<SyncConfig> {
        Ok(SyncConfig::new()
            .with_credential(self.api_key.clone())
            .with_notification_ttl(self.notification_ttl)
            .with_capabilities(self.capabilities()?))
    }

    /// Builds the HTTP client configuration.
    pub fn transport_config(&self) -> HttpTransportConfig {
        let config = HttpTransportConfig::new(self.api_url.clone());
        match self.request_timeout {
            Some(timeout) => config.with_request_timeout(timeout),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use views::Capability;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://127.0.0.1:5000");
        assert!(config.api_key.is_none());
        assert!(config.request_timeout.is_none());
        assert_eq!(config.notification_ttl, Duration::from_secs(5));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_environment_values() {
        let config = Config::from_lookup(lookup(&[
            ("LIBRARY_API_URL", "https://library.example.org"),
            ("LIBRARY_API_KEY", "k-123"),
            ("LIBRARY_CAPABILITIES", "manage_books,borrow"),
            ("LIBRARY_REQUEST_TIMEOUT_SECS", "30"),
            ("LIBRARY_NOTIFICATION_TTL_SECS", "2"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "https://library.example.org");
        assert_eq!(config.api_key.as_deref(), Some("k-123"));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.notification_ttl, Duration::from_secs(2));
        assert_eq!(config.log_level, "debug");

        let sync = config.sync_config().unwrap();
        assert_eq!(sync.credential.as_deref(), Some("k-123"));
        assert!(sync.capabilities.has(Capability::ManageBooks));
        assert!(!sync.capabilities.has(Capability::ManageUsers));
    }

    #[test]
    fn test_blank_key_is_unset() {
        let config = Config::from_lookup(lookup(&[("LIBRARY_API_KEY", "  ")])).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_invalid_timeout() {
        let result = Config::from_lookup(lookup(&[("LIBRARY_REQUEST_TIMEOUT_SECS", "soon")]));
        assert!(matches!(
            result,
            Err(ConsoleError::InvalidSetting { name: "LIBRARY_REQUEST_TIMEOUT_SECS", .. })
        ));
    }

    #[test]
    fn test_invalid_capability() {
        let config = Config {
            capabilities: "admin".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.sync_config(),
            Err(ConsoleError::InvalidCapabilities(_))
        ));
    }
}
