//! Classification of server-reported business errors.
//!
//! A [`BlockchainErrorResponse`] is turned into a [`BlockchainError`] that
//! says what the caller should do next. Well-known codes are identified by
//! code alone and always carry their canonical message; everything else is
//! an [`BlockchainError::Unknown`] holding the server's free text.

use bcapi_proto::{ArgumentError, BlockchainErrorCode, BlockchainErrorResponse};

/// A server-reported failure, classified for retry decisions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}: {}", self.code(), self.message())]
pub enum BlockchainError {
    /// The amount is too small to execute the transaction. Terminal.
    AmountIsTooSmall,
    /// The source address does not hold enough balance. Terminal.
    NotEnoughBalance,
    /// The transaction must be rebuilt, signed and broadcasted again.
    BuildingShouldBeRepeated,
    /// A failure outside the well-known set, with the server's message.
    Unknown(String),
}

impl BlockchainError {
    /// Returns the wire error code.
    #[must_use]
    pub const fn code(&self) -> BlockchainErrorCode {
        match self {
            Self::AmountIsTooSmall => BlockchainErrorCode::AmountIsTooSmall,
            Self::NotEnoughBalance => BlockchainErrorCode::NotEnoughBalance,
            Self::BuildingShouldBeRepeated => BlockchainErrorCode::BuildingShouldBeRepeated,
            Self::Unknown(_) => BlockchainErrorCode::Unknown,
        }
    }

    /// Returns the canonical message of a well-known error, or the free text
    /// of an unknown one.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Unknown(message) => message.as_str(),
            known => known.code().canonical_message().unwrap_or_default(),
        }
    }

    /// Returns `true` if the error belongs to the well-known set.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Returns `true` if rebuilding and resubmitting the transaction may
    /// succeed. Unknown errors are never retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::BuildingShouldBeRepeated)
    }

    /// Converts the error back into its wire response.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::EmptyMessage`] for an unknown error whose
    /// message is blank.
    pub fn into_response(self) -> Result<BlockchainErrorResponse, ArgumentError> {
        match self {
            Self::Unknown(message) => BlockchainErrorResponse::from_unknown_error(message),
            known => BlockchainErrorResponse::from_known_error(known.code()),
        }
    }
}

impl From<BlockchainErrorResponse> for BlockchainError {
    fn from(response: BlockchainErrorResponse) -> Self {
        match response.error_code {
            BlockchainErrorCode::AmountIsTooSmall => Self::AmountIsTooSmall,
            BlockchainErrorCode::NotEnoughBalance => Self::NotEnoughBalance,
            BlockchainErrorCode::BuildingShouldBeRepeated => Self::BuildingShouldBeRepeated,
            BlockchainErrorCode::Unknown => Self::Unknown(response.error_message),
        }
    }
}
