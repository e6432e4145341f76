//! Fault types for turning untrusted wire data into domain values.
//!
//! Three kinds of local fault exist, gathered in [`Error`]:
//!
//! - [`AmountConversionError`] — malformed or out-of-range numeric wire data
//! - [`ResultValidationError`] — a domain invariant violated by a server response
//! - [`ArgumentError`] — an error response constructed from invalid arguments
//!
//! None of them is ever sent over the wire.

use bcapi_proto::ArgumentError;
use serde_json::Value;

use crate::amount::AmountConversionError;

/// Closed set of local faults raised by this crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Numeric wire data could not be converted.
    #[error(transparent)]
    Conversion(#[from] AmountConversionError),

    /// A server response violated a domain invariant.
    #[error(transparent)]
    Validation(#[from] ResultValidationError),

    /// An error response was constructed from invalid arguments.
    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

/// The server returned something that cannot be trusted.
///
/// Raised by every domain model builder, regardless of field or endpoint,
/// so callers can handle untrustworthy responses in one place. Carries the
/// offending raw value and, when a numeric conversion failed, the
/// [`AmountConversionError`] that caused it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}{}", value_suffix(.raw_value))]
pub struct ResultValidationError {
    message: String,
    raw_value: Value,
    #[source]
    source: Option<AmountConversionError>,
}

impl ResultValidationError {
    /// Creates a fault without an offending value, e.g. for a missing contract.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            raw_value: Value::Null,
            source: None,
        }
    }

    /// Creates a fault for the given raw value.
    ///
    /// `None` and other absent values are recorded as [`Value::Null`].
    #[must_use]
    pub fn with_value(message: impl Into<String>, raw_value: impl Into<Value>) -> Self {
        Self {
            message: message.into(),
            raw_value: raw_value.into(),
            source: None,
        }
    }

    /// Attaches the conversion fault that caused this one.
    #[must_use]
    pub fn caused_by(mut self, source: AmountConversionError) -> Self {
        self.source = Some(source);
        self
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending raw value.
    #[must_use]
    pub const fn raw_value(&self) -> &Value {
        &self.raw_value
    }

    /// Returns the conversion fault that caused this one, if any.
    #[must_use]
    pub const fn conversion_error(&self) -> Option<&AmountConversionError> {
        self.source.as_ref()
    }
}

/// Renders ` (value: ...)` for a present raw value, nothing for `null`.
fn value_suffix(raw_value: &Value) -> String {
    if raw_value.is_null() {
        String::new()
    } else {
        format!(" (value: {raw_value})")
    }
}
