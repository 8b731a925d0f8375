use thiserror::Error;

/// Errors surfaced by the client.
///
/// Parameter problems are reported before any request is sent; everything
/// else maps directly onto the transport, decode, or config layer that
/// produced it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("HTTP {status} from {url}: {body}")]
    Http {
        status: u16,
        url: String,
        body: String,
    },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("could not decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("tabular conversion failed: {0}")]
    Table(String),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("could not write config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
