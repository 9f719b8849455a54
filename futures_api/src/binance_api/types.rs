use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use smartstring::alias::String;

use crate::error::ExchangeError;
use crate::types::SymbolInfo;

/// Body of a rejected request, e.g. `{"code":-1121,"msg":"Invalid symbol."}`
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    pub msg: String,
}

#[derive(Debug, Deserialize)]
pub struct ExchangeInfo {
    #[serde(default)]
    pub symbols: Vec<SymbolInfo>,
}

impl ExchangeInfo {
    pub fn into_symbol(self, symbol: &str) -> Option<SymbolInfo> {
        self.symbols.into_iter().find(|s| s.symbol.as_str() == symbol)
    }
}

pub fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<T, ExchangeError> {
    if status.is_success() {
        return Ok(serde_json::from_str(body)?);
    }
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(err) => Err(ExchangeError::Api {
            code: err.code,
            msg: err.msg.into(),
        }),
        Err(_) => Err(ExchangeError::Http {
            status,
            body: body.into(),
        }),
    }
}
