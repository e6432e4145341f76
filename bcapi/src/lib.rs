#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Validated domain models and fault classification for blockchain-service APIs.
//!
//! The remote service speaks in wire contracts (see [`bcapi_proto`]): strings
//! that may be null, block numbers that may be unset, and amounts encoded as
//! scaled integers. This crate turns those contracts into domain values whose
//! invariants hold, or reports precisely why it could not.
//!
//! # Overview
//!
//! ```text
//! contract ──► builder ──► amount conversion ──► domain model
//!                 │                │
//!                 └──── ResultValidationError ◄──┘
//! ```
//!
//! Server-reported business errors take a separate path: a
//! [`BlockchainErrorResponse`](bcapi_proto::BlockchainErrorResponse) is
//! classified into a [`BlockchainError`](classify::BlockchainError) that tells
//! the caller whether rebuilding the transaction may help.
//!
//! Everything here is synchronous and free of shared state.
//!
//! # Modules
//!
//! - [`amount`] - Scaled integer ↔ exact decimal conversion
//! - [`classify`] - Business error classification
//! - [`error`] - Local fault types
//! - [`models`] - Domain model builders

pub mod amount;
pub mod classify;
pub mod error;
pub mod models;

pub use bcapi_proto as proto;
pub use error::{Error, ResultValidationError};
