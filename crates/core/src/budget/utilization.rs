//! Budget utilization percentages.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use sitebook_shared::ReportingConfig;
use sitebook_shared::types::Money;

/// Decimal places kept on utilization percentages.
pub const PERCENT_SCALE: u32 = 1;

/// `round(spent / budget * 100, 1)`; zero when the budget is not positive.
///
/// The result is not clamped, so overspending shows up as more than 100.
#[must_use]
pub fn budget_utilization(spent: Money, budget: Money) -> Decimal {
    let mut percent = spent
        .percent_of(budget)
        .round_dp_with_strategy(PERCENT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    percent.rescale(PERCENT_SCALE);
    percent
}

/// Clamps a percentage to `[0, 100]` for progress indicators.
#[must_use]
pub fn display_percentage(percent: Decimal) -> Decimal {
    percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Severity band for a utilization percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilizationLevel {
    /// At or below the warning threshold.
    Normal,
    /// Above the warning threshold.
    Warning,
    /// Above the critical threshold.
    Critical,
}

/// Warning and critical cut-offs, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilizationThresholds {
    /// Above this the level is `Warning`.
    pub warning: Decimal,
    /// Above this the level is `Critical`.
    pub critical: Decimal,
}

impl UtilizationThresholds {
    /// Classifies a raw percentage.
    #[must_use]
    pub fn level(&self, percent: Decimal) -> UtilizationLevel {
        if percent > self.critical {
            UtilizationLevel::Critical
        } else if percent > self.warning {
            UtilizationLevel::Warning
        } else {
            UtilizationLevel::Normal
        }
    }
}

impl Default for UtilizationThresholds {
    fn default() -> Self {
        Self::from(&ReportingConfig::default())
    }
}

impl From<&ReportingConfig> for UtilizationThresholds {
    fn from(config: &ReportingConfig) -> Self {
        Self {
            warning: config.utilization_warning_percent,
            critical: config.utilization_critical_percent,
        }
    }
}

/// Spent versus budget, with both the raw and the clamped percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetUtilization {
    /// Allocated budget.
    pub budget: Money,
    /// Amount spent.
    pub spent: Money,
    /// Raw percentage, may exceed 100.
    #[serde(with = "rust_decimal::serde::str")]
    pub percentage: Decimal,
    /// Percentage clamped to `[0, 100]`.
    #[serde(with = "rust_decimal::serde::str")]
    pub display_percentage: Decimal,
    /// Severity band of the raw percentage.
    pub level: UtilizationLevel,
}

impl BudgetUtilization {
    /// Computes utilization of `budget` by `spent`.
    #[must_use]
    pub fn compute(spent: Money, budget: Money, thresholds: &UtilizationThresholds) -> Self {
        let percentage = budget_utilization(spent, budget);
        Self {
            budget,
            spent,
            percentage,
            display_percentage: display_percentage(percentage),
            level: thresholds.level(percentage),
        }
    }

    /// Amount left before the budget is exhausted; negative when overspent.
    #[must_use]
    pub fn remaining(&self) -> Money {
        self.budget - self.spent
    }
}
