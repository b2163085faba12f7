//! Shared types, errors, and configuration for Sitebook.
//!
//! This crate provides common types used across all other crates:
//! - Money type with fixed decimal precision
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DatabaseConfig, ReportingConfig};
pub use error::{AppError, AppResult};
pub use types::{Currency, Money};
