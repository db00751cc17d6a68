use reqwest::StatusCode;
use shared::error::FormError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("server url must use http or https: {0}")]
    UnsupportedScheme(String),
    #[error("{method} {path} failed: {source}")]
    Transport {
        method: &'static str,
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} {path} returned {status}")]
    Status {
        method: &'static str,
        path: String,
        status: StatusCode,
    },
    #[error("failed to decode {path} response: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Form(#[from] FormError),
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
