//! Report data types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sitebook_shared::types::{ContractId, Money, ProjectId, SubcontractorId};

use super::month::MonthBucket;
use crate::ledger::{
    ChargeEvent, ChargeFilter, ContractStatus, CreditEvent, DateWindow, LedgerStatement,
    ProjectFilter,
};

/// Stream name for cash received in month buckets.
pub const CASH_IN_STREAM: &str = "cash_in";
/// Stream name for money spent in month buckets.
pub const CASH_OUT_STREAM: &str = "cash_out";

/// Request for a project statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRequest {
    /// Project scope.
    pub project: ProjectFilter,
    /// First day included.
    pub from: Option<NaiveDate>,
    /// Last day included.
    pub to: Option<NaiveDate>,
}

impl StatementRequest {
    /// Creates a request.
    #[must_use]
    pub const fn new(project: ProjectFilter, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { project, from, to }
    }

    /// A request covering the first of `today`'s month through `today`.
    #[must_use]
    pub fn current_month(project: ProjectFilter, today: NaiveDate) -> Self {
        let window = DateWindow::current_month(today);
        Self::new(project, window.from, window.to)
    }

    /// Window to report on. With neither bound supplied this is the current
    /// month up to `today`; a single bound is kept as given.
    #[must_use]
    pub fn window(&self, today: NaiveDate) -> DateWindow {
        match (self.from, self.to) {
            (None, None) => DateWindow::current_month(today),
            (from, to) => DateWindow::new(from, to),
        }
    }
}

/// A ledger statement with its title information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStatement {
    /// Project the statement is scoped to, if any.
    pub project_id: ProjectFilter,
    /// Project display name; `None` without a project or for an unknown one.
    pub project_name: Option<String>,
    /// Window actually used.
    pub window: DateWindow,
    /// Statement body.
    pub statement: LedgerStatement,
}

/// Expenses per month, split by category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyExpenseReport {
    /// Window reported on.
    pub window: DateWindow,
    /// Categories present in the window, sorted by key.
    pub categories: Vec<String>,
    /// One bucket per month, oldest first; values keyed by category.
    pub months: Vec<MonthBucket>,
    /// Sum of every expense in the window.
    pub grand_total: Money,
}

/// Cash received against cash spent for a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowReport {
    /// Window reported on.
    pub window: DateWindow,
    /// Cash received, oldest first.
    pub inflows: Vec<CreditEvent>,
    /// Total received.
    pub total_in: Money,
    /// Total spent.
    pub total_out: Money,
    /// `total_in - total_out`.
    pub balance: Money,
    /// `cash_in`/`cash_out` per month, newest first.
    pub monthly_summary: Vec<MonthBucket>,
}

/// Billing and payment position of one contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSummary {
    /// Contract ID.
    pub contract_id: ContractId,
    /// Project the work belongs to.
    pub project_id: ProjectId,
    /// Scope of work.
    pub description: String,
    /// Amount billed.
    pub billed: Money,
    /// Payments inside the window.
    pub paid: Money,
    /// `billed - paid`.
    pub balance: Money,
    /// Contract status.
    pub status: ContractStatus,
}

/// Contracts of one subcontractor with totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcontractorSummary {
    /// Subcontractor ID.
    pub subcontractor_id: SubcontractorId,
    /// Display name.
    pub name: String,
    /// Contracts, in source order.
    pub contracts: Vec<ContractSummary>,
    /// Sum of billed amounts.
    pub total_billed: Money,
    /// Sum of payments.
    pub total_paid: Money,
    /// `total_billed - total_paid`.
    pub balance: Money,
}

impl SubcontractorSummary {
    /// Returns true if anything was billed or paid.
    #[must_use]
    pub fn has_activity(&self) -> bool {
        !self.total_billed.is_zero() || !self.total_paid.is_zero()
    }
}

/// Subcontractor summary report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcontractorReport {
    /// Window the payments were taken from.
    pub window: DateWindow,
    /// One entry per subcontractor, ordered by name.
    pub subcontractors: Vec<SubcontractorSummary>,
    /// Sum of billed amounts.
    pub total_billed: Money,
    /// Sum of payments.
    pub total_paid: Money,
    /// `total_billed - total_paid`.
    pub balance: Money,
}

/// Financial charges matching a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeReport {
    /// Filters applied.
    pub filter: ChargeFilter,
    /// Matching charges, newest first.
    pub charges: Vec<ChargeEvent>,
    /// Sum of every matching charge.
    pub total: Money,
}
