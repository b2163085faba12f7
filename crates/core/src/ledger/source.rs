//! Read-only seams onto the data store.
//!
//! The engine never persists anything. Implementations must return a
//! consistent snapshot for the duration of one request; no cross-request
//! consistency is assumed.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sitebook_shared::types::{ContractId, Money, ProjectId, SubcontractorId};

use super::error::SourceError;
use super::types::{
    ChargeEvent, ChargeFilter, CreditEvent, DateWindow, DebitEvent, EventQuery, ProjectFilter,
};

/// Lists dated money movements.
///
/// Rows must come back ordered by date, then by a key that is stable for the
/// source (insertion order, creation time, id). The statement builder relies
/// on that order to break ties between same-day events.
#[async_trait]
pub trait LedgerEventSource: Send + Sync {
    /// Cash received matching the query.
    async fn list_credits(&self, query: &EventQuery) -> Result<Vec<CreditEvent>, SourceError>;

    /// Money spent matching the query.
    async fn list_debits(&self, query: &EventQuery) -> Result<Vec<DebitEvent>, SourceError>;
}

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Work in progress.
    #[default]
    Active,
    /// Handed over.
    Completed,
    /// Paused.
    OnHold,
}

/// A project as seen by the reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Project ID.
    pub id: ProjectId,
    /// Display name.
    pub name: String,
    /// Allocated budget.
    pub budget: Money,
    /// Lifecycle status.
    pub status: ProjectStatus,
}

/// Resolves projects for report titles and the dashboard.
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    /// Display name of a project; `None` when it does not exist.
    async fn project_name(&self, id: ProjectId) -> Result<Option<String>, SourceError>;

    /// All projects.
    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, SourceError>;
}

/// Subcontract status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    /// Not started.
    #[default]
    Pending,
    /// Under way.
    InProgress,
    /// Finished.
    Completed,
    /// Cancelled.
    Cancelled,
}

impl ContractStatus {
    /// Stored name, e.g. `in_progress`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// A subcontractor, whether or not they hold any contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcontractorRecord {
    /// Subcontractor ID.
    pub id: SubcontractorId,
    /// Display name.
    pub name: String,
}

/// A payment made against a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Payment date.
    pub date: NaiveDate,
    /// Amount paid.
    pub amount: Money,
}

/// A subcontract with the payments that fall inside the requested window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRecord {
    /// Contract ID.
    pub id: ContractId,
    /// Project the work belongs to.
    pub project_id: ProjectId,
    /// Subcontractor ID.
    pub subcontractor_id: SubcontractorId,
    /// Subcontractor display name.
    pub subcontractor_name: String,
    /// Scope of work.
    pub description: String,
    /// Amount billed by the subcontractor.
    pub billed_amount: Money,
    /// Contract status.
    pub status: ContractStatus,
    /// Payments inside the window.
    pub payments: Vec<PaymentRecord>,
}

/// Lists subcontractors, their subcontracts and the payments made.
#[async_trait]
pub trait ContractSource: Send + Sync {
    /// Every subcontractor, including those without contracts.
    async fn list_subcontractors(&self) -> Result<Vec<SubcontractorRecord>, SourceError>;

    /// Contracts scoped to `project` (all when `None`), each carrying only the
    /// payments dated inside `window`.
    async fn list_contracts(
        &self,
        project: ProjectFilter,
        window: DateWindow,
    ) -> Result<Vec<ContractRecord>, SourceError>;
}

/// Lists miscellaneous project charges.
#[async_trait]
pub trait ChargeSource: Send + Sync {
    /// Charges matching `filter`, newest first.
    async fn list_charges(&self, filter: &ChargeFilter) -> Result<Vec<ChargeEvent>, SourceError>;
}
