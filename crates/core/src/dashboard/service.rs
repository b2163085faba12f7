//! Dashboard assembly.

use chrono::NaiveDate;
use sitebook_shared::ReportingConfig;
use sitebook_shared::types::Money;
use tracing::debug;

use super::types::{
    Dashboard, DashboardStats, MonthlyTotal, ProjectBudget, RecentExpense, SubcontractorBalance,
};
use crate::budget::{BudgetUtilization, UtilizationThresholds, breakdown_by_category};
use crate::ledger::{
    ContractSource, DateWindow, DebitEvent, EventQuery, LedgerError, LedgerEventSource,
    ProjectDirectory, ProjectRecord, ProjectStatus, ReportFilter,
};
use crate::reports::{
    CASH_IN_STREAM, CASH_OUT_STREAM, MonthKey, MonthOrder, MonthlyAggregator, ReportBuilder,
    SubcontractorSummary,
};

/// Builds the dashboard.
pub struct DashboardService;

impl DashboardService {
    /// Builds the dashboard as seen on `as_of`.
    ///
    /// Totals cover all recorded history. Trend charts start on the first day
    /// of the month `dashboard_trend_months` months before `as_of`'s month and
    /// are open at the end.
    #[tracing::instrument(skip(source, config))]
    pub async fn build<S>(
        source: &S,
        as_of: NaiveDate,
        config: &ReportingConfig,
    ) -> Result<Dashboard, LedgerError>
    where
        S: LedgerEventSource + ProjectDirectory + ContractSource + ?Sized,
    {
        let everything = EventQuery::within(None, DateWindow::unbounded());
        let credits = source.list_credits(&everything).await?;
        let debits = source.list_debits(&everything).await?;
        let projects = source.list_projects().await?;
        let listing = source.list_subcontractors().await?;

        let this_month = MonthKey::of(as_of);
        let total_spent: Money = debits.iter().map(|event| event.amount).sum();
        let total_received: Money = credits.iter().map(|event| event.amount).sum();
        let stats = DashboardStats {
            spent_this_month: debits
                .iter()
                .filter(|event| MonthKey::of(event.date) == this_month)
                .map(|event| event.amount)
                .sum(),
            total_spent,
            total_received,
            cash_balance: total_received - total_spent,
            active_projects: projects
                .iter()
                .filter(|project| project.status == ProjectStatus::Active)
                .count(),
            total_projects: projects.len(),
            total_subcontractors: listing.len(),
        };

        let trend = this_month
            .months_back(config.dashboard_trend_months)
            .first_day()
            .map_or_else(DateWindow::unbounded, DateWindow::since);
        let monthly_spending = MonthlyAggregator::new(trend)
            .add_stream(CASH_OUT_STREAM, &debits)
            .bucket(MonthOrder::Ascending, None)
            .into_iter()
            .map(|bucket| MonthlyTotal {
                month: bucket.month,
                label: bucket.month.label(),
                total: bucket.value(CASH_OUT_STREAM),
            })
            .collect();
        let monthly_cash_flow = MonthlyAggregator::new(trend)
            .add_stream(CASH_IN_STREAM, &credits)
            .add_stream(CASH_OUT_STREAM, &debits)
            .bucket(MonthOrder::Ascending, None);

        let mut by_project = Vec::with_capacity(projects.len());
        for project in projects {
            let booked = source
                .list_debits(&EventQuery::within(Some(project.id), DateWindow::unbounded()))
                .await?;
            by_project.push((project, booked));
        }

        let thresholds = UtilizationThresholds::from(config);
        let project_budgets = top_budgets(&by_project, config.project_budget_limit)
            .into_iter()
            .map(|(project, debits)| ProjectBudget {
                project_id: project.id,
                name: project.name.clone(),
                status: project.status,
                utilization: BudgetUtilization::compute(
                    debits.iter().map(|event| event.amount).sum(),
                    project.budget,
                    &thresholds,
                ),
            })
            .collect();

        let subcontractor_balances = ReportBuilder::subcontractors(
            ReportFilter::default(),
            listing,
            source.list_contracts(None, DateWindow::unbounded()).await?,
        )
        .subcontractors
        .into_iter()
        .filter(SubcontractorSummary::has_activity)
        .map(|summary| SubcontractorBalance {
            subcontractor_id: summary.subcontractor_id,
            name: summary.name,
            total_billed: summary.total_billed,
            total_paid: summary.total_paid,
            balance: summary.balance,
        })
        .collect();

        let spending_by_category = breakdown_by_category(&debits);
        let recent_expenses = recent(by_project, config.recent_expense_limit);

        debug!(
            cash_balance = %stats.cash_balance,
            projects = stats.total_projects,
            subcontractors = stats.total_subcontractors,
            "Built dashboard"
        );

        Ok(Dashboard {
            as_of,
            currency: config.currency,
            stats,
            monthly_spending,
            monthly_cash_flow,
            spending_by_category,
            project_budgets,
            subcontractor_balances,
            recent_expenses,
        })
    }
}

/// Projects with the largest budgets, ties broken by name.
fn top_budgets(
    by_project: &[(ProjectRecord, Vec<DebitEvent>)],
    limit: usize,
) -> Vec<&(ProjectRecord, Vec<DebitEvent>)> {
    let mut ranked: Vec<_> = by_project.iter().collect();
    ranked.sort_by(|(a, _), (b, _)| b.budget.cmp(&a.budget).then_with(|| a.name.cmp(&b.name)));
    ranked.truncate(limit);
    ranked
}

/// Newest expenses first with the project they were booked to. Same-day rows
/// keep project order, then source order.
fn recent(by_project: Vec<(ProjectRecord, Vec<DebitEvent>)>, limit: usize) -> Vec<RecentExpense> {
    let mut expenses: Vec<RecentExpense> = by_project
        .into_iter()
        .flat_map(|(project, debits)| {
            debits.into_iter().map(move |expense| RecentExpense {
                project_id: project.id,
                project_name: project.name.clone(),
                expense,
            })
        })
        .collect();
    expenses.sort_by(|a, b| b.expense.date.cmp(&a.expense.date));
    expenses.truncate(limit);
    expenses
}
