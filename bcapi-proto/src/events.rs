//! Pending event contracts.
//!
//! The service queues events about operations it executed on the caller's
//! behalf until the caller acknowledges them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fields shared by every pending event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasePendingEventContract {
    /// Operation ID the event belongs to.
    #[serde(default)]
    pub operation_id: Uuid,

    /// Moment the event was raised.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,

    /// Source address.
    #[serde(default)]
    pub from_address: Option<String>,

    /// Asset ID.
    #[serde(default)]
    pub asset_id: Option<String>,

    /// Amount as a scaled integer magnitude.
    #[serde(default)]
    pub amount: Option<String>,
}

/// Cashout that has been completed on the blockchain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCashoutCompletedEventContract {
    /// Shared pending event fields.
    #[serde(flatten)]
    pub base: BasePendingEventContract,

    /// Destination address.
    #[serde(default)]
    pub to_address: Option<String>,

    /// Hash of the cashout transaction.
    #[serde(default)]
    pub transaction_hash: Option<String>,
}
