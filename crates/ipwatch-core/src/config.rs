// ── Runtime connection configuration ──
//
// Describes *how* to reach the monitoring backend. The CLI builds a
// `MonitorConfig` from its profile and flags and hands it in; core never
// reads config files or credential stores itself.

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use ipwatch_api::{StaticToken, TlsMode, TokenSource, TransportConfig};

/// Backend root used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8081";

/// Configuration for one monitoring backend.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Backend root (e.g. `http://localhost:8081`) or the monitoring base.
    pub url: Url,
    /// Consulted on every request.
    pub token: Arc<dyn TokenSource>,
    pub tls: TlsMode,
    /// `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl MonitorConfig {
    /// Unauthenticated config with default transport settings.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            token: Arc::new(StaticToken::none()),
            tls: TlsMode::default(),
            timeout: None,
        }
    }

    pub fn with_token(mut self, token: Arc<dyn TokenSource>) -> Self {
        self.token = token;
        self
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let transport = TransportConfig {
            tls: self.tls.clone(),
            ..TransportConfig::default()
        };
        match self.timeout {
            Some(timeout) => transport.with_timeout(timeout),
            None => transport,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn transport_carries_timeout_and_tls() {
        let mut config = MonitorConfig::new(Url::parse(DEFAULT_API_URL).unwrap());
        assert_eq!(config.transport().timeout, None);

        config.timeout = Some(Duration::from_secs(5));
        config.tls = TlsMode::DangerAcceptInvalid;
        let transport = config.transport();
        assert_eq!(transport.timeout, Some(Duration::from_secs(5)));
        assert_eq!(transport.tls, TlsMode::DangerAcceptInvalid);
    }
}
