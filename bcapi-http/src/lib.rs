#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP transport instrumentation for blockchain-service API clients.
//!
//! Adds a diagnostic layer to `reqwest` clients and decodes service
//! responses into validated domain models.
//!
//! When a call comes back with a non-success status, [`HttpErrorLogging`]
//! writes the request and the response to the log as two `WARN` entries
//! sharing a correlation id. The caller still receives the full response.
//!
//! ```no_run
//! use bcapi_http::{BlockchainApiConfig, HttpError};
//!
//! # async fn run() -> Result<(), HttpError> {
//! let config = BlockchainApiConfig::new("http://stellar-api.svc".parse().unwrap());
//! let http_client = config.build_client()?;
//! let response = http_client.get(config.endpoint("api/isalive")?).send().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`config`] - Connection settings
//! - [`constants`] - Log entry texts and textual content type markers
//! - [`error`] - Transport error types
//! - [`headers`] - Default request headers applied as middleware
//! - [`logging`] - The logging middleware
//! - [`response`] - Response decoding

pub mod config;
pub mod constants;
pub mod error;
pub mod headers;
pub mod logging;
pub mod response;

#[cfg(test)]
mod test_support;

pub use config::BlockchainApiConfig;
pub use error::HttpError;
pub use headers::DefaultHeaders;
pub use logging::HttpErrorLogging;
pub use response::{read_contract, read_model};
