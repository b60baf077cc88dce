// ── Runtime connection configuration ──
//
// Describes how to reach one WhatsUp Gold endpoint. Carries credentials
// and transport tuning but never touches disk; the CLI builds a
// `ConnectionConfig` from its profile and hands it in.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use tracing::debug;
use url::Url;
use wug_api::{Session, TlsMode, TransportConfig, WugClient};

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (`allow_unverified_ssl`).
    DangerAcceptInvalid,
}

/// Configuration for one endpoint.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// API root, e.g. `https://wug.example.net:9644/api/v1`.
    pub url: Url,
    pub username: String,
    pub password: SecretString,
    pub tls: TlsVerification,
    pub timeout: Duration,
}

impl ConnectionConfig {
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
        }
    }

    /// Authenticate once and return a client sharing the session.
    ///
    /// Must complete before any reconciliation call.
    pub async fn connect(&self) -> Result<WugClient, CoreError> {
        let session = Session::authenticate(
            self.url.as_str(),
            &self.username,
            &self.password,
            &self.transport(),
        )
        .await?;
        debug!(base = %session.base_url(), "session established");
        Ok(WugClient::new(Arc::new(session)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn insecure_flag_maps_to_transport() {
        let config = ConnectionConfig {
            url: "https://wug.local/api/v1".parse().unwrap(),
            username: "admin".into(),
            password: SecretString::from("pw".to_owned()),
            tls: TlsVerification::DangerAcceptInvalid,
            timeout: Duration::from_secs(5),
        };
        let transport = config.transport();
        assert!(matches!(transport.tls, TlsMode::DangerAcceptInvalid));
        assert_eq!(transport.timeout, Duration::from_secs(5));
    }
}
