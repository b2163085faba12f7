//! Report generation service.

use chrono::NaiveDate;
use tracing::debug;

use super::summary::ReportBuilder;
use super::types::{
    CashFlowReport, ChargeReport, MonthlyExpenseReport, ProjectStatement, StatementRequest,
    SubcontractorReport,
};
use crate::ledger::{
    ChargeFilter, ChargeSource, ContractSource, EventQuery, LedgerError, LedgerEventSource,
    LedgerService, ProjectDirectory, ReportFilter,
};

/// Service for generating financial reports.
pub struct ReportService;

impl ReportService {
    /// Ledger statement for a project, titled with the project's name.
    ///
    /// With no bounds in `request` the window is the current month up to
    /// `today`.
    #[tracing::instrument(skip(source))]
    pub async fn project_statement<S>(
        source: &S,
        request: StatementRequest,
        today: NaiveDate,
    ) -> Result<ProjectStatement, LedgerError>
    where
        S: LedgerEventSource + ProjectDirectory + ?Sized,
    {
        let window = request.window(today);
        let statement = LedgerService::build_statement(source, window, request.project).await?;
        let project_name = match request.project {
            Some(id) => source.project_name(id).await?,
            None => None,
        };

        Ok(ProjectStatement {
            project_id: request.project,
            project_name,
            window,
            statement,
        })
    }

    /// Expenses per month and category.
    #[tracing::instrument(skip(source))]
    pub async fn monthly_expenses<S>(
        source: &S,
        filter: ReportFilter,
    ) -> Result<MonthlyExpenseReport, LedgerError>
    where
        S: LedgerEventSource + ?Sized,
    {
        filter.window.validate()?;
        let debits = source
            .list_debits(&EventQuery::within(filter.project, filter.window))
            .await?;

        let report = ReportBuilder::monthly_expenses(filter.window, &debits);
        debug!(
            months = report.months.len(),
            grand_total = %report.grand_total,
            "Built monthly expense report"
        );
        Ok(report)
    }

    /// Cash received against cash spent, with a per-month summary limited to
    /// the most recent `summary_months` months.
    #[tracing::instrument(skip(source))]
    pub async fn cash_flow<S>(
        source: &S,
        filter: ReportFilter,
        summary_months: usize,
    ) -> Result<CashFlowReport, LedgerError>
    where
        S: LedgerEventSource + ?Sized,
    {
        filter.window.validate()?;
        let query = EventQuery::within(filter.project, filter.window);
        let credits = source.list_credits(&query).await?;
        let debits = source.list_debits(&query).await?;

        let report = ReportBuilder::cash_flow(filter.window, credits, &debits, summary_months);
        debug!(
            total_in = %report.total_in,
            total_out = %report.total_out,
            balance = %report.balance,
            "Built cash flow report"
        );
        Ok(report)
    }

    /// Billed, paid and outstanding amounts per subcontractor.
    ///
    /// Payments are restricted to the window; billed amounts are not.
    /// Subcontractors without contracts are listed unless a project filter is
    /// set.
    #[tracing::instrument(skip(source))]
    pub async fn subcontractor_summary<S>(
        source: &S,
        filter: ReportFilter,
    ) -> Result<SubcontractorReport, LedgerError>
    where
        S: ContractSource + ?Sized,
    {
        filter.window.validate()?;
        let listing = source.list_subcontractors().await?;
        let contracts = source.list_contracts(filter.project, filter.window).await?;

        let report = ReportBuilder::subcontractors(filter, listing, contracts);
        debug!(
            subcontractors = report.subcontractors.len(),
            balance = %report.balance,
            "Built subcontractor summary"
        );
        Ok(report)
    }

    /// Financial charges matching `filter`, newest first, with their total.
    #[tracing::instrument(skip(source))]
    pub async fn financial_charges<S>(
        source: &S,
        filter: ChargeFilter,
    ) -> Result<ChargeReport, LedgerError>
    where
        S: ChargeSource + ?Sized,
    {
        filter.window.validate()?;
        let charges = source.list_charges(&filter).await?;

        let report = ReportBuilder::charges(filter, charges);
        debug!(
            charges = report.charges.len(),
            total = %report.total,
            "Built financial charge report"
        );
        Ok(report)
    }
}
