//! Open configuration: signing keys, transport override, metrics callback

use crate::client::HttpClient;
use crate::metrics::MetricsCallback;
use crate::sign::{SigV2Signer, Signer};
use std::env;
use std::sync::{Arc, LazyLock};

/// Signing credentials.
#[derive(Clone, Debug, Default)]
pub struct Keys {
    pub access_key: String,
    pub secret_key: String,
    /// Session token for temporary credentials, sent as
    /// `x-amz-security-token` when present.
    pub security_token: Option<String>,
}

impl Keys {
    #[must_use]
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            security_token: None,
        }
    }

    /// Read credentials from `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`,
    /// and `AWS_SECURITY_TOKEN`. Unset variables yield empty fields; the
    /// request is still signed and the server rejects it.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            access_key: env::var("AWS_ACCESS_KEY_ID").unwrap_or_default(),
            secret_key: env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_default(),
            security_token: env::var("AWS_SECURITY_TOKEN").ok(),
        }
    }
}

/// Capabilities for one open: keys, signing, transport, metrics.
///
/// Constructed per call and passed by reference; nothing here is mutated
/// after construction.
#[derive(Clone)]
pub struct Config {
    pub keys: Keys,
    /// Signing capability applied to every outgoing request.
    pub signer: Arc<dyn Signer>,
    /// Transport override. `None` uses the shared default client.
    pub client: Option<Arc<dyn HttpClient>>,
    /// Invoked synchronously after every read on the returned stream.
    pub metrics_callback: Option<MetricsCallback>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keys: Keys::from_env(),
            signer: Arc::new(SigV2Signer),
            client: None,
            metrics_callback: None,
        }
    }
}

/// Process-wide default configuration, constructed once and immutable
/// thereafter. Callers that need different behavior pass their own
/// [`Config`] instead of mutating shared state.
pub static DEFAULT_CONFIG: LazyLock<Config> = LazyLock::new(Config::default);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_new_has_no_token() {
        let keys = Keys::new("AKID", "secret");
        assert_eq!(keys.access_key, "AKID");
        assert_eq!(keys.secret_key, "secret");
        assert!(keys.security_token.is_none());
    }

    #[test]
    fn test_default_config_has_no_overrides() {
        let config = Config::default();
        assert!(config.client.is_none());
        assert!(config.metrics_callback.is_none());
    }
}
