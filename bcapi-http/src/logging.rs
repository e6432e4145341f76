//! Diagnostic logging of failed HTTP calls.
//!
//! [`HttpErrorLogging`] is a [`reqwest_middleware::Middleware`] that passes
//! every call through unchanged. When the response status is not a success,
//! it logs the request and the response as two `WARN` entries sharing a
//! fresh correlation id. Bodies are included only for textual content types.
//!
//! A textual response body has to be read to be logged, so the middleware
//! buffers it and hands the caller an equivalent response built from the
//! buffer: same status, version, headers, URL, extensions and body bytes.
//! Other responses are returned untouched.

use std::fmt::Write as _;

use http::header::CONTENT_TYPE;
use http::{Extensions, HeaderMap, Method, StatusCode, Version};
use reqwest::{Request, Response, ResponseBuilderExt};
use reqwest_middleware as rqm;
use tracing::warn;
use url::Url;
use uuid::Uuid;

use crate::constants::{
    NON_SUCCESS_SUFFIX, REQUEST_LOG_PREFIX, RESPONSE_LOG_PREFIX, TEXT_CONTENT_TYPE_MARKERS,
};

/// Middleware that logs the request and response of every non-success call.
///
/// # Example
///
/// ```no_run
/// use bcapi_http::HttpErrorLogging;
/// use reqwest_middleware::ClientBuilder;
///
/// let http_client = ClientBuilder::new(reqwest::Client::new())
///     .with(HttpErrorLogging)
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpErrorLogging;

#[async_trait::async_trait]
impl rqm::Middleware for HttpErrorLogging {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: rqm::Next<'_>,
    ) -> rqm::Result<Response> {
        // The request is moved into the chain, so it is described up front.
        let request = RequestDiagnostic::capture(&req);
        let response = next.run(req, extensions).await?;

        if response.status().is_success() {
            return Ok(response);
        }

        let correlation_id = Uuid::new_v4();
        warn!(
            %correlation_id,
            "{REQUEST_LOG_PREFIX} {}, {NON_SUCCESS_SUFFIX}",
            request.render(correlation_id)
        );

        let (response, diagnostic) = ResponseDiagnostic::capture(response).await;
        warn!(
            %correlation_id,
            "{RESPONSE_LOG_PREFIX} {}, {NON_SUCCESS_SUFFIX}",
            diagnostic.render(correlation_id)
        );

        Ok(response)
    }
}

/// What is known about a request before it is sent.
#[derive(Debug, Clone)]
struct RequestDiagnostic {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<String>,
}

impl RequestDiagnostic {
    fn capture(req: &Request) -> Self {
        // Streaming bodies have no bytes to show without consuming them.
        let body = is_text_based(req.headers())
            .then(|| req.body().and_then(reqwest::Body::as_bytes))
            .flatten()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned());

        Self {
            method: req.method().clone(),
            url: req.url().clone(),
            headers: req.headers().clone(),
            body,
        }
    }

    fn render(&self, correlation_id: Uuid) -> String {
        let mut message = format!("Request {correlation_id}: {} {}\n", self.method, self.url);
        write_headers(&mut message, &self.headers);
        if let Some(body) = &self.body {
            message.push_str(body);
            message.push('\n');
        }
        message
    }
}

/// What is known about a received response.
#[derive(Debug, Clone)]
struct ResponseDiagnostic {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<String>,
}

impl ResponseDiagnostic {
    /// Describes the response, buffering its body only when it is textual.
    ///
    /// The returned response is what the caller receives. If the body cannot
    /// be read, the entry omits it and the caller gets an empty body.
    async fn capture(mut response: Response) -> (Response, Self) {
        let status = response.status();
        let headers = response.headers().clone();

        if !is_text_based(&headers) {
            let diagnostic = Self {
                status,
                headers,
                body: None,
            };
            return (response, diagnostic);
        }

        let version: Version = response.version();
        let url = response.url().clone();
        let extensions = std::mem::take(response.extensions_mut());
        let (bytes, body) = match response.bytes().await {
            Ok(bytes) => {
                let body = String::from_utf8_lossy(&bytes).into_owned();
                (bytes, Some(body))
            }
            Err(_) => (Default::default(), None),
        };

        let mut rebuilt = http::Response::new(bytes);
        *rebuilt.status_mut() = status;
        *rebuilt.version_mut() = version;
        rebuilt.headers_mut().clone_from(&headers);
        *rebuilt.extensions_mut() = extensions;
        rebuilt.extensions_mut().extend(response_url(url));

        let diagnostic = Self {
            status,
            headers,
            body,
        };
        (Response::from(rebuilt), diagnostic)
    }

    fn render(&self, correlation_id: Uuid) -> String {
        let mut message = format!("Response {correlation_id}: {}\n", self.status);
        write_headers(&mut message, &self.headers);
        if let Some(body) = &self.body {
            message.push_str(body);
            message.push('\n');
        }
        message
    }
}

/// Extensions carrying `url` in the form reqwest reads back into
/// [`Response::url`].
fn response_url(url: Url) -> Extensions {
    let mut builder = http::Response::builder().url(url);
    builder.extensions_mut().map(std::mem::take).unwrap_or_default()
}

/// Appends one `Key: value, value` line per header name.
fn write_headers(message: &mut String, headers: &HeaderMap) {
    for name in headers.keys() {
        let values = headers
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(message, "{name}: {values}");
    }
}

/// Returns `true` if the `Content-Type` header names a textual media type.
#[must_use]
pub fn is_text_based(headers: &HeaderMap) -> bool {
    let content_type = headers
        .get_all(CONTENT_TYPE)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()).to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    TEXT_CONTENT_TYPE_MARKERS
        .iter()
        .any(|marker| content_type.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_logs;
    use http::HeaderValue;
    use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> ClientWithMiddleware {
        ClientBuilder::new(reqwest::Client::new())
            .with(HttpErrorLogging)
            .build()
    }

    fn id_after<'a>(entry: &'a str, label: &str) -> &'a str {
        let start = entry.find(label).unwrap() + label.len();
        &entry[start..start + 36]
    }

    #[tokio::test]
    async fn test_failed_call_is_logged_and_response_preserved() {
        let mock_server = MockServer::start().await;
        let body = r#"{"errorCode":"notEnoughBalance","errorMessage":"nope"}"#;
        Mock::given(method("GET"))
            .and(path("/api/balances"))
            .respond_with(
                ResponseTemplate::new(500)
                    .insert_header("x-request-source", "node-1")
                    .set_body_raw(body, "application/json"),
            )
            .mount(&mock_server)
            .await;

        let (logs, _guard) = capture_logs();
        let url = format!("{}/api/balances", mock_server.uri());
        let response = client()
            .get(&url)
            .header("x-api-key", "secret")
            .send()
            .await
            .unwrap();

        let direct = reqwest::get(&url).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.url().as_str(), url);
        assert!(response.remote_addr().is_some());
        assert_eq!(response.remote_addr(), direct.remote_addr());
        assert_eq!(response.version(), direct.version());
        assert_eq!(
            response.headers().get("x-request-source"),
            Some(&HeaderValue::from_static("node-1"))
        );
        assert_eq!(response.text().await.unwrap(), body);

        let warnings = logs.warnings();
        assert_eq!(warnings.len(), 2);

        let request = &warnings[0];
        assert!(request.contains(REQUEST_LOG_PREFIX));
        assert!(request.contains(&format!("GET {url}")));
        assert!(request.contains("x-api-key: secret"));
        assert!(request.contains(NON_SUCCESS_SUFFIX));

        let response_entry = &warnings[1];
        assert!(response_entry.contains(RESPONSE_LOG_PREFIX));
        assert!(response_entry.contains("500 Internal Server Error"));
        assert!(response_entry.contains("x-request-source: node-1"));
        assert!(response_entry.contains(body));
        assert!(response_entry.contains(NON_SUCCESS_SUFFIX));

        let request_id = id_after(request, "Request ");
        let response_id = id_after(response_entry, "Response ");
        assert_eq!(request_id, response_id);
        assert!(Uuid::parse_str(request_id).is_ok());
        assert!(response_entry.contains(&format!("correlation_id={request_id}")));
    }

    #[tokio::test]
    async fn test_successful_call_is_not_logged() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/isalive"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
            .mount(&mock_server)
            .await;

        let (logs, _guard) = capture_logs();
        let response = client()
            .get(format!("{}/api/isalive", mock_server.uri()))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), "{}");
        assert!(logs.crate_entries().is_empty());
    }

    #[tokio::test]
    async fn test_binary_body_is_omitted() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/blob"))
            .respond_with(
                ResponseTemplate::new(502)
                    .set_body_raw(b"BINARYDATA".to_vec(), "application/octet-stream"),
            )
            .mount(&mock_server)
            .await;

        let (logs, _guard) = capture_logs();
        let response = client()
            .get(format!("{}/api/blob", mock_server.uri()))
            .send()
            .await
            .unwrap();

        assert!(response.remote_addr().is_some());
        assert_eq!(response.bytes().await.unwrap().as_ref(), b"BINARYDATA");

        let warnings = logs.warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[1].contains("502 Bad Gateway"));
        assert!(warnings[1].contains("content-type: application/octet-stream"));
        assert!(!warnings[1].contains("BINARYDATA"));
    }

    #[tokio::test]
    async fn test_textual_request_body_is_logged() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/transactions/broadcast"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .mount(&mock_server)
            .await;

        let (logs, _guard) = capture_logs();
        let response = client()
            .post(format!("{}/api/transactions/broadcast", mock_server.uri()))
            .header(CONTENT_TYPE, "application/json")
            .body(r#"{"signedTransaction":"abc"}"#)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let warnings = logs.warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("POST "));
        assert!(warnings[0].contains(r#"{"signedTransaction":"abc"}"#));
        assert!(warnings[1].contains("bad request"));
    }

    #[tokio::test]
    async fn test_concurrent_failures_get_distinct_ids() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
            .mount(&mock_server)
            .await;

        let (logs, _guard) = capture_logs();
        let client = client();
        let first = format!("{}/api/first", mock_server.uri());
        let second = format!("{}/api/second", mock_server.uri());
        let (a, b) = tokio::join!(client.get(&first).send(), client.get(&second).send());
        assert_eq!(a.unwrap().status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(b.unwrap().status(), StatusCode::SERVICE_UNAVAILABLE);

        let warnings = logs.warnings();
        assert_eq!(warnings.len(), 4);
        let mut request_ids: Vec<_> = warnings
            .iter()
            .filter(|entry| entry.contains(REQUEST_LOG_PREFIX))
            .map(|entry| id_after(entry, "Request "))
            .collect();
        let mut response_ids: Vec<_> = warnings
            .iter()
            .filter(|entry| entry.contains(RESPONSE_LOG_PREFIX))
            .map(|entry| id_after(entry, "Response "))
            .collect();
        request_ids.sort_unstable();
        response_ids.sort_unstable();
        assert_eq!(request_ids.len(), 2);
        assert_ne!(request_ids[0], request_ids[1]);
        assert_eq!(request_ids, response_ids);
    }

    #[tokio::test]
    async fn test_truncated_body_still_returns_response() {
        use std::io::{Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        let server = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0_u8; 1024];
            let _ = stream.read(&mut request).unwrap();
            stream
                .write_all(
                    b"HTTP/1.1 500 Internal Server Error\r\n\
                      content-type: text/plain\r\n\
                      content-length: 100\r\n\r\npartial",
                )
                .unwrap();
        });

        let (logs, _guard) = capture_logs();
        let response = client()
            .get(format!("http://{address}/api/isalive"))
            .send()
            .await
            .unwrap();
        server.join().unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.text().await.unwrap(), "");

        let warnings = logs.warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[1].contains("500 Internal Server Error"));
        assert!(warnings[1].contains("content-type: text/plain"));
        assert!(!warnings[1].contains("partial"));
        assert_eq!(
            id_after(&warnings[0], "Request "),
            id_after(&warnings[1], "Response ")
        );
    }

    #[tokio::test]
    async fn test_transport_error_propagates_without_logs() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let (logs, _guard) = capture_logs();
        let result = client().get(format!("http://{address}/api/isalive")).send().await;

        assert!(matches!(result, Err(rqm::Error::Reqwest(_))));
        assert!(logs.crate_entries().is_empty());
    }

    #[test]
    fn test_is_text_based() {
        let mut headers = HeaderMap::new();
        assert!(!is_text_based(&headers));

        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("Application/JSON; charset=utf-8"),
        );
        assert!(is_text_based(&headers));

        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        assert!(is_text_based(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("image/png"));
        assert!(!is_text_based(&headers));
    }
}
