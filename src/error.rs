use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] rquest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Forbidden - Access denied")]
    Forbidden,

    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("API error {code}: {message} ({description})")]
    Api {
        code: u16,
        message: String,
        description: String,
    },

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The response payload does not have the shape of the expected resource.
    #[error("Payload does not match {resource}: {source}")]
    DecodeMismatch {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub fn decode(resource: &'static str, source: serde_json::Error) -> Self {
        Error::DecodeMismatch { resource, source }
    }
}
