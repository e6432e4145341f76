//! Error codes and the generic error response of the blockchain API.
//!
//! A failed call is described by a [`BlockchainErrorResponse`]. Its
//! [`BlockchainErrorCode`] is either one of the well-known transaction
//! execution failures, each with exactly one canonical message, or
//! [`BlockchainErrorCode::Unknown`] carrying caller-supplied free text.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Per-field validation messages keyed by field name.
pub type ModelErrors = HashMap<String, Vec<String>>;

/// Errors raised when an error response is constructed from invalid arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    /// The free-text message of an unknown error is empty.
    #[error("Message can't be empty")]
    EmptyMessage,

    /// A code-derived response was requested for a code without a canonical message.
    #[error("Error code should be well-known: {0}")]
    NotWellKnownCode(BlockchainErrorCode),

    /// The raw value does not name any member of the enumeration.
    #[error("Error code is out of range: {0}")]
    CodeOutOfRange(String),
}

/// Closed set of business error codes reported by the blockchain API.
///
/// # Serialization
///
/// Serialized as the camelCase name (`"notEnoughBalance"`). Input goes
/// through [`FromStr`], so any ASCII case is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum BlockchainErrorCode {
    /// Any failure outside the well-known set.
    #[default]
    Unknown,
    /// The amount is too small to execute the transaction.
    AmountIsTooSmall,
    /// The source address does not hold enough balance.
    NotEnoughBalance,
    /// The transaction must be rebuilt, signed and broadcasted again.
    BuildingShouldBeRepeated,
}

impl BlockchainErrorCode {
    /// All members of the enumeration, in numeric order.
    pub const ALL: [Self; 4] = [
        Self::Unknown,
        Self::AmountIsTooSmall,
        Self::NotEnoughBalance,
        Self::BuildingShouldBeRepeated,
    ];

    /// Returns the camelCase string used on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::AmountIsTooSmall => "amountIsTooSmall",
            Self::NotEnoughBalance => "notEnoughBalance",
            Self::BuildingShouldBeRepeated => "buildingShouldBeRepeated",
        }
    }

    /// Returns the canonical message for a well-known code.
    ///
    /// `Unknown` has no canonical message. The texts are kept byte-for-byte
    /// as existing consumers expect them, spelling included.
    #[must_use]
    pub const fn canonical_message(&self) -> Option<&'static str> {
        match self {
            Self::Unknown => None,
            Self::AmountIsTooSmall => Some("Amount is to small to execute transaction"),
            Self::NotEnoughBalance => {
                Some("Not enought balance on the source address to execute transaction")
            }
            Self::BuildingShouldBeRepeated => {
                Some("Transaction should be built, signed and broadcasted again")
            }
        }
    }

    /// Returns `true` for every code except [`BlockchainErrorCode::Unknown`].
    #[must_use]
    pub const fn is_well_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for BlockchainErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockchainErrorCode {
    type Err = ArgumentError;

    /// Parses the code name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ArgumentError::CodeOutOfRange(s.to_owned()))
    }
}

impl TryFrom<String> for BlockchainErrorCode {
    type Error = ArgumentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<i64> for BlockchainErrorCode {
    type Error = ArgumentError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or_else(|| ArgumentError::CodeOutOfRange(value.to_string()))
    }
}

/// Generic error response of the blockchain API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockchainErrorResponse {
    /// Business error code.
    #[serde(default)]
    pub error_code: BlockchainErrorCode,

    /// Human-readable message.
    #[serde(default)]
    pub error_message: String,

    /// Per-field validation messages.
    #[serde(default)]
    pub model_errors: ModelErrors,
}

impl BlockchainErrorResponse {
    /// Creates an error response with the [`BlockchainErrorCode::Unknown`] code.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::EmptyMessage`] if `message` is empty or
    /// whitespace-only.
    pub fn from_unknown_error(message: impl Into<String>) -> Result<Self, ArgumentError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ArgumentError::EmptyMessage);
        }

        Ok(Self {
            error_code: BlockchainErrorCode::Unknown,
            error_message: message,
            model_errors: ModelErrors::new(),
        })
    }

    /// Creates an error response with a well-known transaction execution code
    /// and its canonical message.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::NotWellKnownCode`] for
    /// [`BlockchainErrorCode::Unknown`], which is only reachable through
    /// [`BlockchainErrorResponse::from_unknown_error`].
    pub fn from_known_error(code: BlockchainErrorCode) -> Result<Self, ArgumentError> {
        let message = code
            .canonical_message()
            .ok_or(ArgumentError::NotWellKnownCode(code))?;

        Ok(Self {
            error_code: code,
            error_message: message.to_owned(),
            model_errors: ModelErrors::new(),
        })
    }

    /// Appends a validation message for the given field.
    #[must_use]
    pub fn add_model_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.model_errors
            .entry(field.into())
            .or_default()
            .push(message.into());
        self
    }
}
