use serde::{Deserialize, Serialize};
use serde_json::Value;
use smartstring::alias::String;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Buy,
    Sell,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Market,
    Limit,
}

/// GTC: resting until filled or cancelled.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeInForce {
    Gtc,
    Ioc,
    Fok,
    Gtx,
    Gtd,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    PartiallyFilled,
    Filled,
    Canceled,
    Rejected,
    Expired,
    ExpiredInMatch,
    /// Any status this client does not know yet. The order still decodes.
    #[serde(other)]
    Unknown,
}

serde_plain::derive_display_from_serialize!(Side);
serde_plain::derive_fromstr_from_deserialize!(Side);
serde_plain::derive_display_from_serialize!(OrderType);
serde_plain::derive_fromstr_from_deserialize!(OrderType);
serde_plain::derive_display_from_serialize!(TimeInForce);
serde_plain::derive_display_from_serialize!(OrderStatus);

/// A single order submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: f64,
    pub price: Option<f64>,
    pub time_in_force: Option<TimeInForce>,
}

impl NewOrder {
    pub fn market(symbol: &str, side: Side, quantity: f64) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            quantity,
            price: None,
            time_in_force: None,
        }
    }

    pub fn limit(symbol: &str, side: Side, quantity: f64, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Limit,
            quantity,
            price: Some(price),
            time_in_force: Some(TimeInForce::Gtc),
        }
    }
}

/// Order as acknowledged by the exchange. Quantities and prices stay in the exchange's
/// decimal string form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResult {
    pub order_id: i64,
    pub symbol: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub orig_qty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executed_qty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
    /// Kept verbatim: the exchange adds modes (e.g. `GTE_GTC`) faster than clients learn them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    #[serde(default)]
    pub total_wallet_balance: Option<String>,
    #[serde(default)]
    pub available_balance: Option<String>,
    #[serde(default)]
    pub assets: Vec<AssetBalance>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetBalance {
    pub asset: String,
    pub wallet_balance: String,
    #[serde(default)]
    pub available_balance: Option<String>,
}

impl AssetBalance {
    pub fn is_empty(&self) -> bool {
        self.wallet_balance.parse::<f64>().is_ok_and(|b| b == 0.)
    }
}

/// Trading rules of one symbol, from the exchange info endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub symbol: String,
    pub status: String,
    pub base_asset: String,
    pub quote_asset: String,
    #[serde(default)]
    pub price_precision: u32,
    #[serde(default)]
    pub quantity_precision: u32,
    #[serde(default)]
    pub filters: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_enums() {
        assert_eq!(Side::Buy.to_string(), "BUY");
        assert_eq!("SELL".parse::<Side>().unwrap(), Side::Sell);
        assert!("sell".parse::<Side>().is_err());
        assert_eq!(OrderType::Limit.to_string(), "LIMIT");
        assert_eq!(TimeInForce::Gtc.to_string(), "GTC");
        assert_eq!(OrderStatus::PartiallyFilled.to_string(), "PARTIALLY_FILLED");
    }

    #[test]
    fn test_decode_order_ack() {
        let body = r#"{
            "clientOrderId": "testOrder",
            "cumQty": "0",
            "cumQuote": "0",
            "executedQty": "0",
            "orderId": 22542179,
            "avgPrice": "0.00000",
            "origQty": "10",
            "price": "0",
            "reduceOnly": false,
            "side": "BUY",
            "positionSide": "SHORT",
            "status": "NEW",
            "stopPrice": "9300",
            "symbol": "BTCUSDT",
            "timeInForce": "GTD",
            "type": "MARKET",
            "updateTime": 1566818724722
        }"#;
        let order: OrderResult = serde_json::from_str(body).unwrap();
        assert_eq!(order.order_id, 22542179);
        assert_eq!(order.order_type, OrderType::Market);
        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(order.avg_price.as_deref(), Some("0.00000"));
        assert_eq!(order.time_in_force.as_deref(), Some("GTD"));
        assert_eq!(order.update_time, Some(1566818724722));
    }

    #[test]
    fn test_decode_unfamiliar_values() {
        let body = r#"{"orderId":9,"symbol":"BTCUSDT","side":"BUY","type":"LIMIT","status":"PENDING_NEW","origQty":"1","timeInForce":"GTE_GTC"}"#;
        let order: OrderResult = serde_json::from_str(body).unwrap();
        assert_eq!(order.order_id, 9);
        assert_eq!(order.status, OrderStatus::Unknown);
        assert_eq!(order.time_in_force.as_deref(), Some("GTE_GTC"));
    }

    #[test]
    fn test_decode_minimal_order() {
        let body = r#"{"orderId":1,"symbol":"ETHUSDT","side":"SELL","type":"LIMIT","status":"NEW","origQty":"0.01"}"#;
        let order: OrderResult = serde_json::from_str(body).unwrap();
        assert!(order.executed_qty.is_none());
        assert!(order.price.is_none());
        assert!(order.avg_price.is_none());
    }

    #[test]
    fn test_limit_order_is_gtc() {
        let order = NewOrder::limit("ETHUSDT", Side::Sell, 0.01, 3000.);
        assert_eq!(order.time_in_force, Some(TimeInForce::Gtc));
        assert_eq!(order.price, Some(3000.));
        let order = NewOrder::market("BTCUSDT", Side::Buy, 0.001);
        assert!(order.price.is_none() && order.time_in_force.is_none());
    }

    #[test]
    fn test_empty_balance() {
        let body = r#"{"assets":[
            {"asset":"USDT","walletBalance":"0.00000000"},
            {"asset":"BNB","walletBalance":"0.5","availableBalance":"0.5"}
        ]}"#;
        let info: AccountInfo = serde_json::from_str(body).unwrap();
        assert!(info.assets[0].is_empty());
        assert!(!info.assets[1].is_empty());
        assert!(info.total_wallet_balance.is_none());
    }
}
