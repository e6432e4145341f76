//! Wallet balance contracts.

use serde::{Deserialize, Serialize};

/// Balance of a single asset on an observed wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalanceContract {
    /// Wallet address. For blockchains with address mapping this is the
    /// virtual address.
    #[serde(default)]
    pub address: Option<String>,

    /// Asset ID.
    #[serde(default)]
    pub asset_id: Option<String>,

    /// Balance as a scaled integer magnitude.
    #[serde(default)]
    pub balance: Option<String>,

    /// Incremental ID of the moment the balance was updated, usually the
    /// block height. `0` means unset.
    #[serde(default)]
    pub block: i64,

    /// Whether the address is compromised and must not receive further
    /// input transactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_address_compromised: Option<bool>,
}
