//! Synchronizer configuration.

use std::time::Duration;

use views::Capabilities;

/// How long a notification stays up unless dismissed.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Per-view configuration, injected at construction.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// API key sent with mutations. Reads are sent without it.
    pub credential: Option<String>,

    pub notification_ttl: Duration,

    /// Decides which row actions are offered.
    pub capabilities: Capabilities,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            credential: None,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
            capabilities: Capabilities::none(),
        }
    }
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the credential; blank keys are treated as absent.
    pub fn with_credential(mut self, credential: Option<String>) -> Self {
        self.credential = credential.filter(|key| !key.trim().is_empty());
        self
    }

    pub fn with_notification_ttl(mut self, ttl: Duration) -> Self {
        self.notification_ttl = ttl;
        self
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SyncConfig::default();
        assert!(config.credential.is_none());
        assert_eq!(config.notification_ttl, Duration::from_secs(5));
        assert_eq!(config.capabilities, Capabilities::none());
    }

    #[test]
    fn blank_credential_is_absent() {
        let config = SyncConfig::new().with_credential(Some("  ".into()));
        assert!(config.credential.is_none());
        let config = SyncConfig::new().with_credential(Some("k".into()));
        assert_eq!(config.credential.as_deref(), Some("k"));
    }
}
