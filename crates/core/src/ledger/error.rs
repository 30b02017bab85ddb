//! Ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::ledger::types::{BalanceKey, ReleaseSource};

/// Errors that can occur during balance operations.
///
/// A failed operation never modifies the balance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Day quantities must be strictly positive.
    #[error("Day quantity must be positive, got {0}")]
    InvalidQuantity(Decimal),

    /// Not enough remaining days.
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        /// Days requested.
        requested: Decimal,
        /// Days remaining.
        available: Decimal,
    },

    /// Attempted to commit or release more than the bucket holds.
    #[error("Cannot take {requested} days from {bucket}: only {held} held")]
    ExceedsHeld {
        /// Days requested.
        requested: Decimal,
        /// Days in the bucket.
        held: Decimal,
        /// The bucket.
        bucket: ReleaseSource,
    },

    /// Adjustment without a reason or with a non-positive delta.
    #[error("Invalid adjustment: {0}")]
    InvalidAdjustment(String),

    /// No balance exists for the key.
    #[error("Balance {0} not found")]
    BalanceNotFound(BalanceKey),
}

impl LedgerError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidQuantity(_) | Self::InvalidAdjustment(_) => 400,
            Self::BalanceNotFound(_) => 404,
            Self::ExceedsHeld { .. } => 409,
            Self::InsufficientBalance { .. } => 422,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidQuantity(_) => "INVALID_QUANTITY",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::ExceedsHeld { .. } => "EXCEEDS_HELD",
            Self::InvalidAdjustment(_) => "INVALID_ADJUSTMENT",
            Self::BalanceNotFound(_) => "BALANCE_NOT_FOUND",
        }
    }
}
