//! Core business logic for Sitebook.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Storage is reached only through the event source traits in [`ledger`].
//!
//! # Modules
//!
//! - `ledger` - Running-balance statements over cash received and spent
//! - `reports` - Month bucketing and grouped reports
//! - `budget` - Category breakdown and budget utilization
//! - `dashboard` - Headline figures and trend charts
//! - `export` - Tabular, printable and JSON renderings of statements and reports

pub mod budget;
pub mod dashboard;
pub mod export;
pub mod ledger;
pub mod reports;
