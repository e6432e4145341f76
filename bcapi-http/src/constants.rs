//! HTTP-specific constants for the diagnostic layer.

/// Content-Type fragments whose bodies are logged as text.
///
/// Matched case-insensitively as substrings of the `Content-Type` header.
pub const TEXT_CONTENT_TYPE_MARKERS: [&str; 6] =
    ["html", "text", "xml", "json", "txt", "x-www-form-urlencoded"];

/// Prefix of the warning entry describing a failed call's request.
pub const REQUEST_LOG_PREFIX: &str = "HTTP API request ->";

/// Prefix of the warning entry describing a failed call's response.
pub const RESPONSE_LOG_PREFIX: &str = "HTTP API response <-";

/// Suffix shared by both warning entries.
pub const NON_SUCCESS_SUFFIX: &str = "Response status is non success";
