//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Reporting and dashboard configuration.
    #[serde(default)]
    pub reporting: ReportingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Reporting configuration shared by reports and the dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// Currency printed on report titles.
    #[serde(default)]
    pub currency: Currency,
    /// Number of past months shown on dashboard trend charts.
    #[serde(default = "default_dashboard_trend_months")]
    pub dashboard_trend_months: u32,
    /// Number of months kept in the cash-flow monthly summary.
    #[serde(default = "default_cash_flow_summary_months")]
    pub cash_flow_summary_months: usize,
    /// Number of projects listed in the dashboard budget panel.
    #[serde(default = "default_project_budget_limit")]
    pub project_budget_limit: usize,
    /// Number of expenses listed in the dashboard recent panel.
    #[serde(default = "default_recent_expense_limit")]
    pub recent_expense_limit: usize,
    /// Utilization above this percentage is flagged as a warning.
    #[serde(default = "default_utilization_warning_percent")]
    pub utilization_warning_percent: Decimal,
    /// Utilization above this percentage is flagged as critical.
    #[serde(default = "default_utilization_critical_percent")]
    pub utilization_critical_percent: Decimal,
}

fn default_dashboard_trend_months() -> u32 {
    6
}

fn default_cash_flow_summary_months() -> usize {
    12
}

fn default_project_budget_limit() -> usize {
    6
}

fn default_recent_expense_limit() -> usize {
    10
}

fn default_utilization_warning_percent() -> Decimal {
    Decimal::from(70)
}

fn default_utilization_critical_percent() -> Decimal {
    Decimal::from(90)
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            dashboard_trend_months: default_dashboard_trend_months(),
            cash_flow_summary_months: default_cash_flow_summary_months(),
            project_budget_limit: default_project_budget_limit(),
            recent_expense_limit: default_recent_expense_limit(),
            utilization_warning_percent: default_utilization_warning_percent(),
            utilization_critical_percent: default_utilization_critical_percent(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SITEBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
