//! Dashboard data types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sitebook_shared::types::{Currency, Money, ProjectId, SubcontractorId};

use crate::budget::{BudgetUtilization, CategoryTotal};
use crate::ledger::{DebitEvent, ProjectStatus};
use crate::reports::{MonthBucket, MonthKey};

/// Dashboard response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Date the dashboard was computed for.
    pub as_of: NaiveDate,
    /// Currency of every amount.
    pub currency: Currency,
    /// Headline figures.
    pub stats: DashboardStats,
    /// Spending per month, oldest first.
    pub monthly_spending: Vec<MonthlyTotal>,
    /// `cash_in`/`cash_out` per month, oldest first.
    pub monthly_cash_flow: Vec<MonthBucket>,
    /// Spending per category, largest first.
    pub spending_by_category: Vec<CategoryTotal>,
    /// Largest project budgets with their utilization.
    pub project_budgets: Vec<ProjectBudget>,
    /// Subcontractors with anything billed or paid.
    pub subcontractor_balances: Vec<SubcontractorBalance>,
    /// Latest expenses, newest first.
    pub recent_expenses: Vec<RecentExpense>,
}

/// Headline figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Spent in the calendar month of `as_of`.
    pub spent_this_month: Money,
    /// Spent overall.
    pub total_spent: Money,
    /// Received overall.
    pub total_received: Money,
    /// `total_received - total_spent`.
    pub cash_balance: Money,
    /// Projects with status `active`.
    pub active_projects: usize,
    /// All projects.
    pub total_projects: usize,
    /// All subcontractors, with or without contracts.
    pub total_subcontractors: usize,
}

/// An expense line with the project it was booked to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentExpense {
    /// Project ID.
    pub project_id: ProjectId,
    /// Project name.
    pub project_name: String,
    /// The expense itself.
    #[serde(flatten)]
    pub expense: DebitEvent,
}

/// One point of the spending trend chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// Month key.
    pub month: MonthKey,
    /// Chart label, e.g. `Jan 2025`.
    pub label: String,
    /// Amount for the month.
    pub total: Money,
}

/// A project budget panel entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectBudget {
    /// Project ID.
    pub project_id: ProjectId,
    /// Project name.
    pub name: String,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Spent against budget.
    pub utilization: BudgetUtilization,
}

/// Outstanding position with one subcontractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcontractorBalance {
    /// Subcontractor ID.
    pub subcontractor_id: SubcontractorId,
    /// Display name.
    pub name: String,
    /// Total billed.
    pub total_billed: Money,
    /// Total paid.
    pub total_paid: Money,
    /// `total_billed - total_paid`.
    pub balance: Money,
}
