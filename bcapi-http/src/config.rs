//! Connection settings for a blockchain API service.

use std::collections::HashMap;
use std::time::Duration;

use http::{HeaderMap, HeaderName, HeaderValue};
use reqwest_middleware as rqm;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::HttpError;
use crate::headers::DefaultHeaders;
use crate::logging::HttpErrorLogging;

/// Connection settings for a blockchain API service.
///
/// # Example
///
/// ```rust
/// use bcapi_http::BlockchainApiConfig;
///
/// let config: BlockchainApiConfig = serde_json::from_str(
///     r#"{ "url": "http://stellar-api.svc/", "timeoutSecs": 30 }"#,
/// )
/// .unwrap();
/// assert!(config.log_failed_requests);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockchainApiConfig {
    /// Base URL of the service.
    pub url: Url,

    /// Per-request timeout in seconds. No timeout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Installs [`HttpErrorLogging`] on built clients. Defaults to `true`.
    #[serde(default = "default_log_failed_requests")]
    pub log_failed_requests: bool,

    /// Headers sent with every request.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

const fn default_log_failed_requests() -> bool {
    true
}

impl BlockchainApiConfig {
    /// Creates settings for `url` with logging enabled and no timeout.
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            url,
            timeout_secs: None,
            log_failed_requests: true,
            headers: HashMap::new(),
        }
    }

    /// Returns the configured per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Resolves `path` against the base URL.
    ///
    /// The base is treated as a directory, so `http://host/prefix` and
    /// `http://host/prefix/` both resolve `api/isalive` to
    /// `http://host/prefix/api/isalive`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::UrlParse`] if the path cannot be joined.
    pub fn endpoint(&self, path: &str) -> Result<Url, HttpError> {
        let mut base = self.url.clone();
        if !base.path().ends_with('/') {
            let directory = format!("{}/", base.path());
            base.set_path(&directory);
        }
        base.join(path.trim_start_matches('/'))
            .map_err(|source| HttpError::UrlParse {
                path: path.to_owned(),
                source,
            })
    }

    /// Builds an HTTP client honouring these settings.
    ///
    /// Configured headers are added by [`DefaultHeaders`] ahead of
    /// [`HttpErrorLogging`], so failed-call entries list them.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidHeader`] for a header that is not valid
    /// HTTP, or [`HttpError::Build`] if reqwest rejects the configuration.
    pub fn build_client(&self) -> Result<rqm::ClientWithMiddleware, HttpError> {
        let mut default_headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let invalid = || HttpError::InvalidHeader { name: name.clone() };
            let header_name = HeaderName::try_from(name.as_str()).map_err(|_| invalid())?;
            let header_value = HeaderValue::try_from(value.as_str()).map_err(|_| invalid())?;
            default_headers.insert(header_name, header_value);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(HttpError::Build)?;

        let mut middleware = rqm::ClientBuilder::new(client);
        let default_headers = DefaultHeaders::new(default_headers);
        if !default_headers.is_empty() {
            middleware = middleware.with(default_headers);
        }
        if self.log_failed_requests {
            middleware = middleware.with(HttpErrorLogging);
        }
        Ok(middleware.build())
    }
}
