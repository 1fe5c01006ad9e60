//! SDK configuration.
//!
//! There is no process-wide initialization: an [`SdkConfig`] value is built
//! once and handed to every [`Client`](crate::Client) that needs it.

use std::fmt;

use serde::Deserialize;

use bitmark_core::Network;

use crate::error::{Result, SdkError};

pub const ENV_NETWORK: &str = "BITMARK_NETWORK";
pub const ENV_API_TOKEN: &str = "BITMARK_API_TOKEN";
pub const ENV_API_BASE_URL: &str = "BITMARK_API_BASE_URL";

const LIVENET_API_URL: &str = "https://api.bitmark.com";
const TESTNET_API_URL: &str = "https://api.test.bitmark.com";

/// Configuration for the SDK.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    /// The network every account and record must belong to.
    pub network: Network,
    /// Token sent to the ledger API by HTTP transports.
    pub api_token: Option<String>,
    /// Override for the ledger API endpoint.
    pub api_base_url: Option<String>,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            network: Network::Testnet,
            api_token: None,
            api_base_url: None,
        }
    }
}

impl SdkConfig {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            ..Self::default()
        }
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// The ledger API endpoint: the override if set, else the network default.
    pub fn api_base_url(&self) -> &str {
        match &self.api_base_url {
            Some(url) => url,
            None => match self.network {
                Network::Livenet => LIVENET_API_URL,
                Network::Testnet => TESTNET_API_URL,
            },
        }
    }

    /// Read `BITMARK_NETWORK`, `BITMARK_API_TOKEN` and `BITMARK_API_BASE_URL`.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(network) = lookup(ENV_NETWORK) {
            config.network = network
                .parse()
                .map_err(|e| SdkError::Config(format!("{ENV_NETWORK}: {e}")))?;
        }
        if let Some(token) = lookup(ENV_API_TOKEN).filter(|t| !t.is_empty()) {
            config.api_token = Some(token);
        }
        if let Some(url) = lookup(ENV_API_BASE_URL).filter(|u| !u.is_empty()) {
            config.api_base_url = Some(url);
        }

        Ok(config)
    }
}

impl fmt::Debug for SdkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SdkConfig")
            .field("network", &self.network)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}
