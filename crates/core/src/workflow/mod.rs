//! Leave application workflow.
//!
//! This module implements the leave application state machine, the
//! approval chains, and submission validation.
//!
//! # Modules
//!
//! - `types` - Workflow domain types (LeaveStatus, ApprovalLog, LeaveApplication)
//! - `approval` - Approval chain selection and stage order
//! - `error` - Workflow-specific error types
//! - `service` - State transition logic
//! - `validation` - Submission rules

pub mod approval;
pub mod error;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod service_props;

pub use approval::ApprovalChain;
pub use error::WorkflowError;
pub use service::WorkflowService;
pub use types::{
    ApprovalAction, ApprovalLog, ApprovalLogEntry, LeaveApplication, LeaveRequest, LeaveStatus,
    LedgerEffect, Transition,
};
pub use validation::{ensure_leave_days, find_overlap, validate_request};
