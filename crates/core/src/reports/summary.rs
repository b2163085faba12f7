//! Report assembly from already-fetched rows.

use std::collections::BTreeMap;

use sitebook_shared::types::{Money, SubcontractorId};

use super::month::{MonthBucket, MonthOrder, MonthlyAggregator};
use super::types::{
    CASH_IN_STREAM, CASH_OUT_STREAM, CashFlowReport, ChargeReport, ContractSummary,
    MonthlyExpenseReport, SubcontractorReport, SubcontractorSummary,
};
use crate::ledger::{
    ChargeEvent, ChargeFilter, ContractRecord, CreditEvent, DateWindow, DebitEvent, ReportFilter,
    SubcontractorRecord,
};

/// Builds reports from event lists.
pub struct ReportBuilder;

impl ReportBuilder {
    /// Expenses per month with one stream per category.
    #[must_use]
    pub fn monthly_expenses(window: DateWindow, debits: &[DebitEvent]) -> MonthlyExpenseReport {
        let mut by_category: BTreeMap<&str, Vec<DebitEvent>> = BTreeMap::new();
        for event in debits.iter().filter(|event| window.contains(event.date)) {
            by_category
                .entry(event.category.as_str())
                .or_default()
                .push(event.clone());
        }

        let categories: Vec<String> = by_category.keys().map(ToString::to_string).collect();
        let months = by_category
            .iter()
            .fold(MonthlyAggregator::new(window), |aggregator, (category, events)| {
                aggregator.add_stream(*category, events)
            })
            .bucket(MonthOrder::Ascending, None);
        let grand_total = months.iter().map(MonthBucket::total).sum();

        MonthlyExpenseReport {
            window,
            categories,
            months,
            grand_total,
        }
    }

    /// Cash in against cash out, with the most recent `summary_months` months.
    #[must_use]
    pub fn cash_flow(
        window: DateWindow,
        credits: Vec<CreditEvent>,
        debits: &[DebitEvent],
        summary_months: usize,
    ) -> CashFlowReport {
        let total_in: Money = credits.iter().map(|event| event.amount).sum();
        let total_out: Money = debits.iter().map(|event| event.amount).sum();

        let monthly_summary = MonthlyAggregator::new(window)
            .add_stream(CASH_IN_STREAM, &credits)
            .add_stream(CASH_OUT_STREAM, debits)
            .bucket(MonthOrder::Descending, Some(summary_months));

        CashFlowReport {
            window,
            inflows: credits,
            total_in,
            total_out,
            balance: total_in - total_out,
            monthly_summary,
        }
    }

    /// Groups contracts under every listed subcontractor, ordered by name then
    /// ID. With a project filter, subcontractors left without a contract in
    /// that project are dropped; without one, everybody is listed.
    #[must_use]
    pub fn subcontractors(
        filter: ReportFilter,
        listing: Vec<SubcontractorRecord>,
        contracts: Vec<ContractRecord>,
    ) -> SubcontractorReport {
        let mut grouped: BTreeMap<SubcontractorId, (String, Vec<ContractSummary>)> = listing
            .into_iter()
            .map(|subcontractor| (subcontractor.id, (subcontractor.name, Vec::new())))
            .collect();
        for contract in contracts {
            let paid: Money = contract.payments.iter().map(|payment| payment.amount).sum();
            grouped
                .entry(contract.subcontractor_id)
                .or_insert_with(|| (contract.subcontractor_name, Vec::new()))
                .1
                .push(ContractSummary {
                    contract_id: contract.id,
                    project_id: contract.project_id,
                    description: contract.description,
                    billed: contract.billed_amount,
                    paid,
                    balance: contract.billed_amount - paid,
                    status: contract.status,
                });
        }

        let mut subcontractors: Vec<SubcontractorSummary> = grouped
            .into_iter()
            .filter(|(_, (_, contracts))| filter.project.is_none() || !contracts.is_empty())
            .map(|(subcontractor_id, (name, contracts))| {
                let total_billed: Money = contracts.iter().map(|c| c.billed).sum();
                let total_paid: Money = contracts.iter().map(|c| c.paid).sum();
                SubcontractorSummary {
                    subcontractor_id,
                    name,
                    contracts,
                    total_billed,
                    total_paid,
                    balance: total_billed - total_paid,
                }
            })
            .collect();
        subcontractors.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.subcontractor_id.cmp(&b.subcontractor_id))
        });

        let total_billed: Money = subcontractors.iter().map(|s| s.total_billed).sum();
        let total_paid: Money = subcontractors.iter().map(|s| s.total_paid).sum();
        SubcontractorReport {
            window: filter.window,
            subcontractors,
            total_billed,
            total_paid,
            balance: total_billed - total_paid,
        }
    }

    /// Charge listing with its filtered total.
    #[must_use]
    pub fn charges(filter: ChargeFilter, charges: Vec<ChargeEvent>) -> ChargeReport {
        let total = charges.iter().map(|charge| charge.amount).sum();
        ChargeReport {
            filter,
            charges,
            total,
        }
    }
}
