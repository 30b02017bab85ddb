//! Core business logic for Leavebook.
//!
//! This crate contains pure business logic with ZERO storage or runtime dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `calendar` - Working-day, holiday and fiscal-year calculus
//! - `policy` - Leave types, leave settings and employee facts
//! - `accrual` - Entitlement, accrual, carry-over and expiry arithmetic
//! - `ledger` - Per-balance reserve/commit/release/adjust arithmetic
//! - `workflow` - Leave application state machine and approval chains
//! - `cashout` - Encashment eligibility and valuation
//! - `recall` - Recall from leave and refund computation
//! - `notification` - Notification templates and payloads

pub mod accrual;
pub mod calendar;
pub mod cashout;
pub mod ledger;
pub mod notification;
pub mod policy;
pub mod recall;
pub mod workflow;
