//! Leave encashment.
//!
//! - `types` - Cash-out requests, statuses and eligibility
//! - `service` - Eligibility, valuation and status transitions
//! - `error` - Cash-out error types

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::CashOutError;
pub use service::CashOutService;
pub use types::{CashOutEligibility, CashOutRequest, CashOutStatus, IneligibleReason};
