use std::str::FromStr;

use arrayvec::ArrayString;
use futures_api::{OrderType, Side};
use thiserror::Error;

pub type Symbol = ArrayString<32>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Symbol cannot be empty")]
    EmptySymbol,
    #[error("Symbol {0} is too long")]
    SymbolTooLong(String),
    #[error("Invalid side: {0}. Must be BUY or SELL")]
    InvalidSide(String),
    #[error("Invalid order type: {0}. Must be MARKET or LIMIT")]
    InvalidOrderType(String),
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
    #[error("Price is required for LIMIT orders")]
    MissingPrice,
    #[error("Invalid price: {0}")]
    InvalidPrice(String),
}

pub fn validate_symbol(symbol: &str, quote_asset: &str) -> Result<Symbol, ValidationError> {
    if symbol.is_empty() {
        return Err(ValidationError::EmptySymbol);
    }
    let upper = symbol.to_uppercase();
    let symbol = Symbol::from(&upper).map_err(|_| ValidationError::SymbolTooLong(upper.clone()))?;
    let quote_asset = quote_asset.to_uppercase();
    if !symbol.ends_with(&quote_asset) {
        tracing::warn!(
            "Symbol {symbol} doesn't end with {quote_asset} - might not work on {quote_asset}-M futures"
        );
    }
    Ok(symbol)
}

pub fn validate_side(side: &str) -> Result<Side, ValidationError> {
    let side = side.to_uppercase();
    Side::from_str(&side).map_err(|_| ValidationError::InvalidSide(side))
}

pub fn validate_order_type(order_type: &str) -> Result<OrderType, ValidationError> {
    let order_type = order_type.to_uppercase();
    OrderType::from_str(&order_type).map_err(|_| ValidationError::InvalidOrderType(order_type))
}

fn parse_finite(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn validate_quantity(quantity: &str) -> Result<f64, ValidationError> {
    parse_finite(quantity)
        .filter(|q| *q > 0.)
        .ok_or_else(|| ValidationError::InvalidQuantity(quantity.to_owned()))
}

/// Required and positive for LIMIT orders. Otherwise an absent price stays absent and a
/// given one only has to be a number.
pub fn validate_price(
    price: Option<&str>,
    order_type: OrderType,
) -> Result<Option<f64>, ValidationError> {
    match (order_type, price) {
        (OrderType::Limit, None) => Err(ValidationError::MissingPrice),
        (OrderType::Limit, Some(raw)) => parse_finite(raw)
            .filter(|p| *p > 0.)
            .map(Some)
            .ok_or_else(|| ValidationError::InvalidPrice(raw.to_owned())),
        (OrderType::Market, None) => Ok(None),
        (OrderType::Market, Some(raw)) => parse_finite(raw)
            .map(Some)
            .ok_or_else(|| ValidationError::InvalidPrice(raw.to_owned())),
    }
}
