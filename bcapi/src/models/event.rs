use bcapi_proto::{BasePendingEventContract, PendingCashoutCompletedEventContract};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{
    parse_positive_amount, require_contract, require_operation_id, require_text,
    require_timestamp,
};
use crate::error::ResultValidationError;

/// Fields shared by every pending event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePendingEvent {
    operation_id: Uuid,
    timestamp: DateTime<Utc>,
    from_address: String,
    asset_id: String,
    amount: Decimal,
}

impl BasePendingEvent {
    /// Builds the shared event fields from their wire contract.
    ///
    /// # Errors
    ///
    /// Returns [`ResultValidationError`] if the contract is missing, the
    /// operation ID is nil, the timestamp is absent, the source address or
    /// asset ID is blank, or the amount is malformed or not strictly positive.
    pub fn from_contract(
        contract: Option<BasePendingEventContract>,
        asset_accuracy: u32,
    ) -> Result<Self, ResultValidationError> {
        let contract = require_contract(contract, "Event not found")?;
        let operation_id = require_operation_id(contract.operation_id)?;
        let timestamp = require_timestamp(contract.timestamp)?;
        let from_address = require_text(contract.from_address, "Source address is required")?;
        let asset_id = require_text(contract.asset_id, "Asset ID is required")?;
        let amount = parse_positive_amount(
            contract.amount.as_deref(),
            asset_accuracy,
            "Failed to parse amount",
            "Amount should be positive number",
        )?;

        Ok(Self {
            operation_id,
            timestamp,
            from_address,
            asset_id,
            amount,
        })
    }

    /// Operation ID the event belongs to.
    #[must_use]
    pub const fn operation_id(&self) -> Uuid {
        self.operation_id
    }

    /// Moment the event was raised.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Source address.
    #[must_use]
    pub fn from_address(&self) -> &str {
        &self.from_address
    }

    /// Asset ID.
    #[must_use]
    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    /// Amount, always strictly positive.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Cashout that has been completed on the blockchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCashoutCompletedEvent {
    base: BasePendingEvent,
    to_address: String,
    transaction_hash: String,
}

impl PendingCashoutCompletedEvent {
    /// Builds a cashout-completed event from its wire contract.
    ///
    /// # Errors
    ///
    /// Returns [`ResultValidationError`] if any shared field is invalid, or
    /// the destination address or transaction hash is blank.
    pub fn from_contract(
        contract: Option<PendingCashoutCompletedEventContract>,
        asset_accuracy: u32,
    ) -> Result<Self, ResultValidationError> {
        let contract = require_contract(contract, "Event not found")?;
        let base = BasePendingEvent::from_contract(Some(contract.base), asset_accuracy)?;
        let to_address = require_text(contract.to_address, "Destination address is required")?;
        let transaction_hash =
            require_text(contract.transaction_hash, "Transaction hash is required")?;

        Ok(Self {
            base,
            to_address,
            transaction_hash,
        })
    }

    /// Shared pending event fields.
    #[must_use]
    pub const fn base(&self) -> &BasePendingEvent {
        &self.base
    }

    /// Destination address.
    #[must_use]
    pub fn to_address(&self) -> &str {
        &self.to_address
    }

    /// Hash of the cashout transaction.
    #[must_use]
    pub fn transaction_hash(&self) -> &str {
        &self.transaction_hash
    }
}
