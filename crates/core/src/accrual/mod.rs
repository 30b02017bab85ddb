//! Entitlement and accrual calculations.
//!
//! - `service` - Tenure, entitlement and accrued-to-date arithmetic
//! - `carry_over` - Fiscal-year rollover and carry-over expiry
//! - `error` - Accrual error types

pub mod carry_over;
pub mod error;
pub mod service;

#[cfg(test)]
mod service_props;

pub use carry_over::{CarryOverOutcome, CarryOverService};
pub use error::AccrualError;
pub use service::{AccrualResult, AccrualService};
