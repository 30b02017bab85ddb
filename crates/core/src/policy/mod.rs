//! Leave policy definitions.
//!
//! - `leave_type` - Leave type catalog entries and gender applicability
//! - `settings` - Versioned, immutable leave settings snapshots
//! - `employee` - Read-only employee data from the identity provider
//! - `error` - Policy validation errors

pub mod employee;
pub mod error;
pub mod leave_type;
pub mod settings;

pub use employee::{EmployeeProfile, Gender};
pub use error::PolicyError;
pub use leave_type::{ApplicableGender, LeaveType};
pub use settings::{AccrualBasis, AccrualFrequency, LeaveSettings, PolicySnapshot};
