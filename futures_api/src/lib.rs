pub mod binance_api;
pub mod error;
pub mod mock;
pub mod types;
mod utils;

use anyhow::Result;
use serde::Deserialize;

pub use binance_api::BinanceClient;
pub use error::ExchangeError;
pub use mock::MockClient;
pub use types::{
    AccountInfo, AssetBalance, NewOrder, OrderResult, OrderStatus, OrderType, Side, SymbolInfo,
    TimeInForce,
};

pub const API_KEY_VAR: &str = "BINANCE_API_KEY";
pub const API_SECRET_VAR: &str = "BINANCE_API_SECRET";

/// What a futures venue has to offer the bot: submit one order and answer two queries.
pub trait ExchangeClient {
    fn submit_order(
        &self,
        order: &NewOrder,
    ) -> impl Future<Output = Result<OrderResult, ExchangeError>> + Send;

    fn get_account_info(&self) -> impl Future<Output = Result<AccountInfo, ExchangeError>> + Send;

    /// `None` when the exchange does not list `symbol`.
    fn get_symbol_info(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<Option<SymbolInfo>, ExchangeError>> + Send;
}

#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"***")
            .finish()
    }
}

/// Read from `BINANCE_*` environment variables, after loading `.env` if present.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_recv_window")]
    pub recv_window: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://testnet.binancefuture.com".to_owned()
}

fn default_recv_window() -> u64 {
    5000
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            base_url: default_base_url(),
            recv_window: default_recv_window(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Ok(envy::prefixed("BINANCE_").from_env::<Config>()?)
    }

    /// Explicit values win over the environment. `None` unless both halves are present.
    pub fn credentials(&self, api_key: Option<String>, api_secret: Option<String>) -> Option<Credentials> {
        let api_key = api_key.or_else(|| self.api_key.clone()).filter(|k| !k.is_empty())?;
        let api_secret = api_secret
            .or_else(|| self.api_secret.clone())
            .filter(|s| !s.is_empty())?;
        Some(Credentials {
            api_key,
            api_secret,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://testnet.binancefuture.com");
        assert_eq!(config.recv_window, 5000);
        assert!(config.credentials(None, None).is_none());
    }

    #[test]
    fn test_credentials_precedence() {
        let config = Config {
            api_key: Some("env-key".into()),
            api_secret: Some("env-secret".into()),
            ..Config::default()
        };
        let creds = config.credentials(Some("cli-key".into()), None).unwrap();
        assert_eq!(creds.api_key, "cli-key");
        assert_eq!(creds.api_secret, "env-secret");
        assert!(!format!("{creds:?}").contains("env-secret"));
    }

    #[test]
    fn test_credentials_need_both_halves() {
        let config = Config::default();
        assert!(config.credentials(Some("key".into()), None).is_none());
        assert!(config.credentials(Some("key".into()), Some(String::new())).is_none());
        assert!(config.credentials(Some("key".into()), Some("secret".into())).is_some());
    }
}
