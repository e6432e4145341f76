//! Error types for the HTTP transport layer.

use bcapi::classify::BlockchainError;
use http::StatusCode;

/// Errors that can occur while calling the blockchain API over HTTP.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The request could not be sent or the middleware chain failed.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// The underlying reqwest client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// A configured header name or value is not valid HTTP.
    #[error("Invalid header: {name}")]
    InvalidHeader {
        /// The configured header name.
        name: String,
    },

    /// An endpoint URL could not be derived from the base URL.
    #[error("URL parse error: {path}: {source}")]
    UrlParse {
        /// The relative endpoint path.
        path: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The response body could not be read.
    #[error("Failed to read response body as text: {status}: {source}")]
    ResponseBodyRead {
        /// The HTTP status code.
        status: StatusCode,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// A success body is not the expected JSON contract.
    #[error("Failed to deserialize JSON: {status}: {source}")]
    Json {
        /// The HTTP status code.
        status: StatusCode,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// A non-success response without a recognizable error body.
    #[error("Unexpected HTTP status {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: StatusCode,
        /// The response body.
        body: String,
    },

    /// A non-success response carrying a business error.
    #[error("Blockchain API error {status}: {error}")]
    Blockchain {
        /// The HTTP status code.
        status: StatusCode,
        /// The classified business error.
        error: BlockchainError,
    },

    /// The response violated a domain invariant.
    #[error(transparent)]
    Client(#[from] bcapi::Error),
}

impl HttpError {
    /// Returns the classified business error, if the server reported one.
    #[must_use]
    pub const fn blockchain_error(&self) -> Option<&BlockchainError> {
        match self {
            Self::Blockchain { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Returns `true` if the server asked for the transaction to be rebuilt
    /// and resubmitted.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.blockchain_error()
            .is_some_and(BlockchainError::is_retryable)
    }
}
