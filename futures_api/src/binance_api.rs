pub mod types;

use std::time::Duration;

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;

use crate::{
    Config, Credentials, ExchangeClient,
    error::ExchangeError,
    types::{AccountInfo, NewOrder, OrderResult, SymbolInfo},
    utils::{Query, now_millis, sign},
};
use types::{ExchangeInfo, decode_response};

const ORDER_PATH: &str = "/fapi/v1/order";
const ACCOUNT_PATH: &str = "/fapi/v2/account";
const EXCHANGE_INFO_PATH: &str = "/fapi/v1/exchangeInfo";
const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// USDT-margined futures REST client. Every call is a single request; nothing is retried.
pub struct BinanceClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
    recv_window: u64,
}

impl BinanceClient {
    pub fn new(credentials: Credentials, config: &Config) -> Result<Self, ExchangeError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        tracing::info!("Binance futures client ready: {}", config.base_url);

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            credentials,
            recv_window: config.recv_window,
        })
    }

    fn order_query(order: &NewOrder) -> Query {
        Query::new()
            .push("symbol", &order.symbol)
            .push("side", order.side)
            .push("type", order.order_type)
            .push_opt("timeInForce", order.time_in_force)
            .push("quantity", order.quantity)
            .push_opt("price", order.price)
    }

    async fn send_signed<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Query,
    ) -> Result<T, ExchangeError> {
        let query = query
            .push("recvWindow", self.recv_window)
            .push("timestamp", now_millis())
            .render();
        let signature = sign(&self.credentials.api_secret, &query)?;
        let url = format!("{}{path}?{query}&signature={signature}", self.base_url);

        tracing::debug!("{method} {path}");
        let request = self
            .http
            .request(method, url)
            .header(API_KEY_HEADER, &self.credentials.api_key);
        Self::read(request).await
    }

    async fn send_public<T: DeserializeOwned>(&self, path: &str) -> Result<T, ExchangeError> {
        tracing::debug!("GET {path}");
        let request = self.http.get(format!("{}{path}", self.base_url));
        Self::read(request).await
    }

    async fn read<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> Result<T, ExchangeError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        decode_response(status, &body)
    }
}

impl ExchangeClient for BinanceClient {
    async fn submit_order(&self, order: &NewOrder) -> Result<OrderResult, ExchangeError> {
        self.send_signed(Method::POST, ORDER_PATH, Self::order_query(order))
            .await
    }

    async fn get_account_info(&self) -> Result<AccountInfo, ExchangeError> {
        self.send_signed(Method::GET, ACCOUNT_PATH, Query::new())
            .await
            .inspect_err(|e| tracing::error!("Error getting account info: {e}"))
    }

    async fn get_symbol_info(&self, symbol: &str) -> Result<Option<SymbolInfo>, ExchangeError> {
        let info: ExchangeInfo = self
            .send_public(EXCHANGE_INFO_PATH)
            .await
            .inspect_err(|e| tracing::error!("Error getting symbol info: {e}"))?;
        Ok(info.into_symbol(symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    #[test]
    fn test_market_order_query() {
        let order = NewOrder::market("BTCUSDT", Side::Buy, 0.001);
        assert_eq!(
            BinanceClient::order_query(&order).render(),
            "symbol=BTCUSDT&side=BUY&type=MARKET&quantity=0.001"
        );
    }

    #[test]
    fn test_limit_order_query() {
        let order = NewOrder::limit("ETHUSDT", Side::Sell, 0.01, 3000.);
        assert_eq!(
            BinanceClient::order_query(&order).render(),
            "symbol=ETHUSDT&side=SELL&type=LIMIT&timeInForce=GTC&quantity=0.01&price=3000"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = Config {
            base_url: "https://testnet.binancefuture.com/".into(),
            ..Config::default()
        };
        let credentials = Credentials {
            api_key: "key".into(),
            api_secret: "secret".into(),
        };
        let client = BinanceClient::new(credentials, &config).unwrap();
        assert_eq!(client.base_url, "https://testnet.binancefuture.com");
        assert_eq!(client.recv_window, 5000);
    }
}
