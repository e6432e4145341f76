//! Observed transaction contracts.
//!
//! A transaction that the service has broadcasted is observed until it
//! reaches a terminal state. The shared fields live in
//! [`BaseObservedTransactionContract`], which state-specific contracts flatten.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fields shared by every observed transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseObservedTransactionContract {
    /// Operation ID assigned by the caller when the transaction was built.
    #[serde(default)]
    pub operation_id: Uuid,

    /// Moment the transaction reached its current state.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,

    /// Transferred amount as a scaled integer magnitude.
    #[serde(default)]
    pub amount: Option<String>,

    /// Fee as a scaled integer magnitude.
    #[serde(default)]
    pub fee: Option<String>,

    /// Block in which the state was observed. `0` means unset.
    #[serde(default)]
    pub block: i64,
}

/// Observed transaction in the completed state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTransactionContract {
    /// Shared observed transaction fields.
    #[serde(flatten)]
    pub base: BaseObservedTransactionContract,

    /// Transaction hash.
    #[serde(default)]
    pub hash: Option<String>,
}
