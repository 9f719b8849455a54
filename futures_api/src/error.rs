use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The exchange rejected the request. `msg` is the exchange's own wording.
    #[error("{msg}")]
    Api { code: i64, msg: String },

    /// The request URL is stripped before storing: it carries the signature.
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Unexpected HTTP status {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("Failed to decode exchange response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API secret is not a valid HMAC key")]
    InvalidSecret,
}

impl From<reqwest::Error> for ExchangeError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.without_url())
    }
}

impl ExchangeError {
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}
