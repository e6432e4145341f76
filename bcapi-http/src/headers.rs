//! Per-client default request headers.
//!
//! reqwest merges `ClientBuilder::default_headers` only after the middleware
//! chain has run, so middleware never observes them. [`DefaultHeaders`]
//! inserts them as the outermost layer instead, where every later layer
//! sees the request as it will be sent.

use http::{Extensions, HeaderMap};
use reqwest::{Request, Response};
use reqwest_middleware as rqm;

/// Middleware adding headers the request does not already carry.
#[derive(Debug, Clone, Default)]
pub struct DefaultHeaders {
    headers: HeaderMap,
}

impl DefaultHeaders {
    /// Creates the middleware from a header map.
    #[must_use]
    pub const fn new(headers: HeaderMap) -> Self {
        Self { headers }
    }

    /// Returns `true` if there is nothing to add.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    fn apply(&self, target: &mut HeaderMap) {
        for name in self.headers.keys() {
            if target.contains_key(name) {
                continue;
            }
            for value in self.headers.get_all(name) {
                target.append(name.clone(), value.clone());
            }
        }
    }
}

#[async_trait::async_trait]
impl rqm::Middleware for DefaultHeaders {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: rqm::Next<'_>,
    ) -> rqm::Result<Response> {
        self.apply(req.headers_mut());
        next.run(req, extensions).await
    }
}
