//! Common types used across the application.

pub mod id;
pub mod rounding;

pub use id::*;
pub use rounding::{MONEY_SCALE, RoundingMode};
