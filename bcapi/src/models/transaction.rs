use bcapi_proto::{BaseObservedTransactionContract, CompletedTransactionContract};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{
    parse_amount, parse_positive_amount, require_block, require_contract, require_operation_id,
    require_text, require_timestamp,
};
use crate::error::ResultValidationError;

/// Fields shared by every observed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseObservedTransaction {
    operation_id: Uuid,
    timestamp: DateTime<Utc>,
    amount: Decimal,
    fee: Decimal,
    block: i64,
}

impl BaseObservedTransaction {
    /// Builds the shared transaction fields from their wire contract.
    ///
    /// # Errors
    ///
    /// Returns [`ResultValidationError`] if the contract is missing, the
    /// operation ID is nil, the timestamp is absent, the amount is malformed
    /// or not strictly positive, the fee is malformed, or the block is unset.
    pub fn from_contract(
        contract: Option<BaseObservedTransactionContract>,
        asset_accuracy: u32,
    ) -> Result<Self, ResultValidationError> {
        let contract = require_contract(contract, "Transaction not found")?;
        let operation_id = require_operation_id(contract.operation_id)?;
        let timestamp = require_timestamp(contract.timestamp)?;
        let block = require_block(contract.block, "Block is required")?;
        let amount = parse_positive_amount(
            contract.amount.as_deref(),
            asset_accuracy,
            "Failed to parse amount",
            "Amount should be positive number",
        )?;
        let fee = parse_amount(contract.fee.as_deref(), asset_accuracy, "Failed to parse fee")?;

        Ok(Self {
            operation_id,
            timestamp,
            amount,
            fee,
            block,
        })
    }

    /// Operation ID assigned when the transaction was built.
    #[must_use]
    pub const fn operation_id(&self) -> Uuid {
        self.operation_id
    }

    /// Moment the transaction reached its current state.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Transferred amount, always strictly positive.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Fee paid for the transaction.
    #[must_use]
    pub const fn fee(&self) -> Decimal {
        self.fee
    }

    /// Block in which the state was observed.
    #[must_use]
    pub const fn block(&self) -> i64 {
        self.block
    }
}

/// Observed transaction in the completed state.
///
/// A completed transaction always has a hash; a missing hash is a contract
/// violation, not a pending state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedTransaction {
    base: BaseObservedTransaction,
    hash: String,
}

impl CompletedTransaction {
    /// Builds a completed transaction from its wire contract.
    ///
    /// The shared fields are validated first, then the hash.
    ///
    /// # Errors
    ///
    /// Returns [`ResultValidationError`] if any shared field is invalid or
    /// the hash is null or blank.
    pub fn from_contract(
        contract: Option<CompletedTransactionContract>,
        asset_accuracy: u32,
    ) -> Result<Self, ResultValidationError> {
        let contract = require_contract(contract, "Transaction not found")?;
        let base = BaseObservedTransaction::from_contract(Some(contract.base), asset_accuracy)?;
        let hash = require_text(contract.hash, "Hash is required")?;

        Ok(Self { base, hash })
    }

    /// Shared observed transaction fields.
    #[must_use]
    pub const fn base(&self) -> &BaseObservedTransaction {
        &self.base
    }

    /// Transaction hash.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }
}
