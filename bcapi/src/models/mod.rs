//! Validated domain models built from wire contracts.
//!
//! Every builder follows the same order: missing contract, required text
//! fields, required sequence fields, then amounts. The first violation is
//! returned as a [`ResultValidationError`]; no partially built model ever
//! escapes. Built models own their data and keep no reference to the
//! contract they came from.
//!
//! - [`WalletBalance`] — balance of one asset on one address
//! - [`BaseObservedTransaction`] / [`CompletedTransaction`] — broadcasted transactions
//! - [`BasePendingEvent`] / [`PendingCashoutCompletedEvent`] — pending events

mod balance;
mod event;
mod transaction;

pub use balance::WalletBalance;
pub use event::{BasePendingEvent, PendingCashoutCompletedEvent};
pub use transaction::{BaseObservedTransaction, CompletedTransaction};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::amount;
use crate::error::ResultValidationError;

/// Unwraps a contract, failing with `message` when it is absent.
fn require_contract<T>(contract: Option<T>, message: &str) -> Result<T, ResultValidationError> {
    contract.ok_or_else(|| ResultValidationError::new(message))
}

/// Accepts text that is present and not whitespace-only.
fn require_text(value: Option<String>, message: &str) -> Result<String, ResultValidationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        other => Err(ResultValidationError::with_value(message, other)),
    }
}

/// Accepts a block number other than the unset sentinel `0`.
fn require_block(block: i64, message: &str) -> Result<i64, ResultValidationError> {
    if block == 0 {
        return Err(ResultValidationError::with_value(message, block));
    }
    Ok(block)
}

fn require_operation_id(operation_id: Uuid) -> Result<Uuid, ResultValidationError> {
    if operation_id.is_nil() {
        return Err(ResultValidationError::with_value(
            "Operation ID is required",
            operation_id.to_string(),
        ));
    }
    Ok(operation_id)
}

fn require_timestamp(
    timestamp: Option<DateTime<Utc>>,
) -> Result<DateTime<Utc>, ResultValidationError> {
    timestamp.ok_or_else(|| ResultValidationError::new("Timestamp is required"))
}

/// Converts a wire amount, wrapping any conversion fault under `message`.
fn parse_amount(
    raw: Option<&str>,
    accuracy: u32,
    message: &str,
) -> Result<Decimal, ResultValidationError> {
    let raw = raw.ok_or_else(|| ResultValidationError::new(message))?;
    amount::to_decimal(raw, accuracy)
        .map_err(|err| ResultValidationError::with_value(message, raw).caused_by(err))
}

/// Converts a wire amount that must be strictly positive.
///
/// Zero is rejected too: a zero amount is a distinct "nothing" case that the
/// caller has to handle explicitly.
fn parse_positive_amount(
    raw: Option<&str>,
    accuracy: u32,
    parse_message: &str,
    range_message: &str,
) -> Result<Decimal, ResultValidationError> {
    let value = parse_amount(raw, accuracy, parse_message)?;
    if value <= Decimal::ZERO {
        return Err(ResultValidationError::with_value(range_message, raw));
    }
    Ok(value)
}
