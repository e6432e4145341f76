use bcapi_proto::WalletBalanceContract;
use rust_decimal::Decimal;

use super::{parse_positive_amount, require_block, require_contract, require_text};
use crate::error::ResultValidationError;

/// Balance of a single asset on an observed wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletBalance {
    address: String,
    asset_id: String,
    balance: Decimal,
    block: i64,
    is_address_compromised: bool,
}

impl WalletBalance {
    /// Builds a wallet balance from its wire contract.
    ///
    /// `asset_accuracy` is the number of fractional digits of the asset.
    /// A missing compromised flag defaults to `false`.
    ///
    /// # Errors
    ///
    /// Returns [`ResultValidationError`] if the contract is missing, the
    /// address or asset ID is blank, the block is unset, or the balance is
    /// malformed or not strictly positive.
    pub fn from_contract(
        contract: Option<WalletBalanceContract>,
        asset_accuracy: u32,
    ) -> Result<Self, ResultValidationError> {
        let contract = require_contract(contract, "Wallet not found")?;
        let address = require_text(contract.address, "Address is required")?;
        let asset_id = require_text(contract.asset_id, "Asset ID is required")?;
        let block = require_block(contract.block, "Block is required")?;
        let balance = parse_positive_amount(
            contract.balance.as_deref(),
            asset_accuracy,
            "Failed to parse balance",
            "Balance should be positive number",
        )?;

        Ok(Self {
            address,
            asset_id,
            balance,
            block,
            is_address_compromised: contract.is_address_compromised.unwrap_or(false),
        })
    }

    /// Wallet address. For blockchains with address mapping this is the
    /// virtual address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Asset ID.
    #[must_use]
    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    /// Balance, always strictly positive.
    #[must_use]
    pub const fn balance(&self) -> Decimal {
        self.balance
    }

    /// Incremental ID of the moment the balance was updated. Same sequence as
    /// the block of observed transactions.
    #[must_use]
    pub const fn block(&self) -> i64 {
        self.block
    }

    /// Whether the address is compromised and must not be used for further
    /// input transactions.
    #[must_use]
    pub const fn is_address_compromised(&self) -> bool {
        self.is_address_compromised
    }
}
