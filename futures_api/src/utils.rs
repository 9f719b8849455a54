use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::form_urlencoded::byte_serialize;

use crate::error::ExchangeError;

type HmacSha256 = Hmac<Sha256>;

/// Hex encoded HMAC-SHA256 of the query string, keyed by the API secret.
pub fn sign(secret: &str, payload: &str) -> Result<String, ExchangeError> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| ExchangeError::InvalidSecret)?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Ordered `key=value` pairs. The signature covers the exact rendered string, so the
/// order of `push` calls is the order on the wire. Values are form-urlencoded on render.
#[derive(Default, Debug, Clone)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: &'static str, value: impl ToString) -> Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    pub fn push_opt(self, key: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    pub fn render(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{k}={}", byte_serialize(v.as_bytes()).collect::<String>()))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Example request from the Binance API documentation.
    const SECRET: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";

    #[test]
    fn test_sign() {
        let query = Query::new()
            .push("symbol", "LTCBTC")
            .push("side", "BUY")
            .push("type", "LIMIT")
            .push("timeInForce", "GTC")
            .push("quantity", 1)
            .push("price", 0.1)
            .push("recvWindow", 5000)
            .push("timestamp", 1499827319559i64)
            .render();
        assert_eq!(
            query,
            "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559"
        );
        assert_eq!(
            sign(SECRET, &query).unwrap(),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_push_opt() {
        let query = Query::new()
            .push("symbol", "BTCUSDT")
            .push_opt("price", None::<f64>)
            .push_opt("timeInForce", Some("GTC"))
            .render();
        assert_eq!(query, "symbol=BTCUSDT&timeInForce=GTC");
        assert_eq!(Query::new().render(), "");
    }

    #[test]
    fn test_render_encodes_values() {
        let query = Query::new()
            .push("symbol", "BTC USDT")
            .push("newClientOrderId", "a&b=c#1")
            .push("quantity", 0.5)
            .render();
        assert_eq!(query, "symbol=BTC+USDT&newClientOrderId=a%26b%3Dc%231&quantity=0.5");

        // the signature is taken over the encoded text that goes on the wire
        let raw = "symbol=BTC USDT&newClientOrderId=a&b=c#1&quantity=0.5";
        assert_ne!(sign(SECRET, &query).unwrap(), sign(SECRET, raw).unwrap());
    }
}
