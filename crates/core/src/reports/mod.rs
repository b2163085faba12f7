//! Financial report generation.
//!
//! This module provides the month-bucketed and grouped reports built on top of
//! the ledger event sources:
//! - Project statement with title information
//! - Monthly expenses by category
//! - Cash flow with a recent-months summary
//! - Subcontractor billing and payment summary
//! - Financial charges with their filtered total

pub mod month;
pub mod service;
pub mod summary;
pub mod types;


pub use month::{MonthBucket, MonthBuckets, MonthKey, MonthOrder, MonthlyAggregator};
pub use service::ReportService;
pub use summary::ReportBuilder;
pub use types::*;
