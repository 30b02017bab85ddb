//! Shared types, errors, and configuration for Leavebook.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Rounding modes for day and money quantities
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, LogConfig, SweeperConfig};
pub use error::{AppError, AppResult};
