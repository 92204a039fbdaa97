//! Verifier configuration from environment variables.

use crate::domain::network::NetworkParams;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default bound for [`crate::SignedMessageVerifier::verify_bounded`].
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime configuration for the verifier and its logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Network used when a call does not name one
    pub network: NetworkParams,

    /// Bound applied by `verify_bounded`
    pub default_timeout: Duration,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            network: NetworkParams::mainnet(),
            default_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl VerifierConfig {
    /// Create configuration from environment variables, ignoring bad values.
    ///
    /// # Environment Variables
    ///
    /// - `BIP137_NETWORK`: mainnet, testnet, signet or regtest (default: mainnet)
    /// - `BIP137_TIMEOUT_MS`: verification bound in ms (default: 5000)
    /// - `BIP137_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `BIP137_JSON_LOGS`: Enable JSON logs (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            network: env::var("BIP137_NETWORK")
                .ok()
                .and_then(|name| NetworkParams::by_name(&name))
                .unwrap_or(defaults.network),

            default_timeout: env::var("BIP137_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.default_timeout),

            log_level: env::var("BIP137_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: env::var("BIP137_JSON_LOGS")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.json_logs),
        }
    }

    /// Like [`Self::from_env`] but reports unknown networks and bad numbers.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("BIP137_NETWORK") {
            config.network =
                NetworkParams::by_name(&name).ok_or(ConfigError::UnknownNetwork(name))?;
        }

        if let Some(value) = lookup("BIP137_TIMEOUT_MS") {
            let ms: u64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "BIP137_TIMEOUT_MS",
                value: value.clone(),
            })?;
            config.default_timeout = Duration::from_millis(ms);
        }

        if let Some(level) = lookup("BIP137_LOG_LEVEL").or_else(|| lookup("RUST_LOG")) {
            config.log_level = level;
        }

        if let Some(value) = lookup("BIP137_JSON_LOGS") {
            config.json_logs = parse_flag(&value);
        }

        Ok(config)
    }

    pub fn with_network(mut self, network: NetworkParams) -> Self {
        self.network = network;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}
