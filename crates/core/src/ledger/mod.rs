//! Leave balance arithmetic.
//!
//! This module implements the balance rules enforced by the ledger:
//! - Reservations (pending days) gated on remaining balance
//! - Commit of reserved days on final approval
//! - Release of pending or used days on rejection, cancellation and recall
//! - Administrative adjustments with a mandatory reason
//! - Carry-over and expiry bookkeeping
//!
//! Storage and per-key atomicity live in the engine crate; everything here
//! operates on a single owned balance.

pub mod balance;
pub mod error;
pub mod types;

#[cfg(test)]
mod balance_props;

pub use balance::{ExpiryOutcome, LeaveBalance};
pub use error::LedgerError;
pub use types::{AdjustmentDirection, BalanceKey, ReleaseSource};
