pub mod cli;
pub mod orders;
pub mod validators;

use std::path::PathBuf;

use anyhow::Result;
use futures_api::{OrderType, Side};
use serde::Deserialize;

pub use orders::{OrderManager, format_order_response, format_request_summary};
pub use validators::{Symbol, ValidationError};

/// A validated order. Built once from raw input and never changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    symbol: Symbol,
    side: Side,
    order_type: OrderType,
    quantity: f64,
    price: Option<f64>,
}

impl OrderRequest {
    pub fn from_raw(
        symbol: &str,
        side: &str,
        order_type: &str,
        quantity: &str,
        price: Option<&str>,
        quote_asset: &str,
    ) -> Result<Self, ValidationError> {
        let symbol = validators::validate_symbol(symbol, quote_asset)?;
        let side = validators::validate_side(side)?;
        let order_type = validators::validate_order_type(order_type)?;
        let quantity = validators::validate_quantity(quantity)?;
        let price = validators::validate_price(price, order_type)?;
        if order_type == OrderType::Market && price.is_some() {
            tracing::warn!("Price is ignored for MARKET orders");
        }

        Ok(Self {
            symbol,
            side,
            order_type,
            quantity,
            price,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }
}

/// Bot-level settings from `TRADING_BOT_*` environment variables.
#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    #[serde(default = "default_quote_asset")]
    pub quote_asset: String,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_quote_asset() -> String {
    "USDT".to_owned()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            quote_asset: default_quote_asset(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Ok(envy::prefixed("TRADING_BOT_").from_env::<Settings>()?)
    }
}
