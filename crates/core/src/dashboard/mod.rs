//! Dashboard figures: headline stats, trend charts, budget panel and recent
//! activity, all computed for an explicit `as_of` date.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::DashboardService;
pub use types::*;
