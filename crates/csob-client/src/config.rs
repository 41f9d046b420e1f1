//! Gateway client configuration.
//!
//! Defaults point at the production gateway. Use [`GatewayConfig::integration`]
//! or `CSOB_BASE_URL` for the integration (test) environment.

use csob_crypto::KeySource;
use url::Url;

/// Production eAPI v1.9 base URL.
pub const PRODUCTION_URL: &str = "https://api.platebnibrana.csob.cz/api/v1.9";
/// Integration eAPI v1.9 base URL.
pub const INTEGRATION_URL: &str = "https://iapi.iplatebnibrana.csob.cz/api/v1.9";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for a [`GatewayClient`](crate::GatewayClient).
///
/// Custom `Debug` implementation redacts the key sources.
#[derive(Clone)]
pub struct GatewayConfig {
    pub merchant_id: String,
    /// Merchant private key, signs requests.
    pub private_key: KeySource,
    /// Gateway public key, verifies responses.
    pub public_key: KeySource,
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("merchant_id", &self.merchant_id)
            .field("private_key", &"[REDACTED]")
            .field("public_key", &self.public_key)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GatewayConfig {
    /// Production configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingMerchantId` for an empty merchant id.
    pub fn new(
        merchant_id: impl Into<String>,
        private_key: KeySource,
        public_key: KeySource,
    ) -> Result<Self, ConfigError> {
        let merchant_id = merchant_id.into();
        if merchant_id.trim().is_empty() {
            return Err(ConfigError::MissingMerchantId);
        }
        Ok(Self {
            merchant_id,
            private_key,
            public_key,
            base_url: parse_url("base_url", PRODUCTION_URL)?,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Same as [`new`](Self::new) but against the integration gateway.
    pub fn integration(
        merchant_id: impl Into<String>,
        private_key: KeySource,
        public_key: KeySource,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::new(merchant_id, private_key, public_key)?;
        config.base_url = parse_url("base_url", INTEGRATION_URL)?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_url("base_url", base_url)?;
        Ok(self)
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CSOB_MERCHANT_ID` (required)
    /// - `CSOB_PRIVATE_KEY_PATH` (required, merchant private key PEM file)
    /// - `CSOB_PUBLIC_KEY_PATH` (required, gateway public key PEM file)
    /// - `CSOB_BASE_URL` (default: production gateway)
    /// - `CSOB_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let merchant_id = std::env::var("CSOB_MERCHANT_ID").map_err(|_| ConfigError::MissingMerchantId)?;
        let private_key = required_var("CSOB_PRIVATE_KEY_PATH")?;
        let public_key = required_var("CSOB_PUBLIC_KEY_PATH")?;

        let config = Self::new(merchant_id, KeySource::file(private_key), KeySource::file(public_key))?;
        Ok(Self {
            base_url: env_url("CSOB_BASE_URL", PRODUCTION_URL)?,
            timeout_secs: std::env::var("CSOB_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ..config
        })
    }

    /// Base URL as a string without a trailing `/`.
    pub(crate) fn base_url_trimmed(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }
}

fn required_var(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingVar(var.to_string()))
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_url(var, &raw)
}

fn parse_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(name.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("merchant id is required (CSOB_MERCHANT_ID)")]
    MissingMerchantId,
    #[error("{0} environment variable is required")]
    MissingVar(String),
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
