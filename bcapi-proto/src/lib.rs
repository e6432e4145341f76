//! Wire contracts for remote blockchain-service HTTP APIs.
//!
//! This crate defines the serialization-level data structures exchanged with
//! a blockchain integration service. Amounts travel as strings holding a
//! scaled integer magnitude; the asset accuracy needed to interpret them is
//! supplied by the caller, never by the contract itself.
//!
//! Contracts are deliberately permissive: required fields are modelled as
//! `Option` so that a malformed server response still deserializes and can be
//! rejected with a precise validation fault by the `bcapi` builders.
//!
//! # Modules
//!
//! - [`balances`] — Wallet balance contracts
//! - [`transactions`] — Observed transaction contracts
//! - [`events`] — Pending event contracts
//! - [`errors`] — Error codes and the generic error response

pub mod balances;
pub mod errors;
pub mod events;
pub mod transactions;

pub use balances::WalletBalanceContract;
pub use errors::{ArgumentError, BlockchainErrorCode, BlockchainErrorResponse, ModelErrors};
pub use events::{BasePendingEventContract, PendingCashoutCompletedEventContract};
pub use transactions::{BaseObservedTransactionContract, CompletedTransactionContract};
