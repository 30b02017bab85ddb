//! Recall from active leave.
//!
//! - `types` - Recall records and statuses
//! - `service` - Recall validation, responses and refund computation
//! - `error` - Recall error types

pub mod error;
pub mod service;
pub mod types;

pub use error::RecallError;
pub use service::RecallService;
pub use types::{LeaveRecall, RecallDecision, RecallStatus};
