//! Category breakdown and budget utilization.

pub mod category;
pub mod utilization;


pub use category::{CategoryTotal, breakdown_by_category, humanize_category};
pub use utilization::{
    BudgetUtilization, PERCENT_SCALE, UtilizationLevel, UtilizationThresholds,
    budget_utilization, display_percentage,
};
