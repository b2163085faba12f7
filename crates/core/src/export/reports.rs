//! Renderings of the grouped reports.
//!
//! Each export writes a tabular file, a [`PrintableTable`] and a JSON view of
//! one report value, so every rendering reads the same totals.

use csv::Writer;
use sitebook_shared::types::{Currency, Money};

use super::error::ExportError;
use super::table::{PrintableFigure, PrintableTable, blank_if_zero, columns, finish, period, whole};
use crate::budget::humanize_category;
use crate::reports::{CashFlowReport, MonthlyExpenseReport, SubcontractorReport};

/// Monthly expense CSV header.
pub const EXPENSES_CSV_HEADER: [&str; 3] = ["Month", "Category", "Amount"];
/// Cash flow CSV header.
pub const CASH_FLOW_CSV_HEADER: [&str; 3] = ["Date", "Source", "Amount"];
/// Subcontractor CSV header.
pub const SUBCONTRACTORS_CSV_HEADER: [&str; 6] =
    ["Subcontractor", "Contract", "Billed", "Paid", "Balance", "Status"];

/// Label of the grand total.
pub const GRAND_TOTAL_LABEL: &str = "Grand Total";
/// Label of cash received.
pub const TOTAL_IN_LABEL: &str = "Total In";
/// Label of cash spent.
pub const TOTAL_OUT_LABEL: &str = "Total Out";
/// Label of a net balance.
pub const BALANCE_LABEL: &str = "Balance";
/// Label of billed amounts.
pub const TOTAL_BILLED_LABEL: &str = "Total Billed";
/// Label of paid amounts.
pub const TOTAL_PAID_LABEL: &str = "Total Paid";
/// First cell of a totals row.
pub const TOTAL_LABEL: &str = "Total";

/// Renders a [`MonthlyExpenseReport`].
#[derive(Debug, Clone, Copy)]
pub struct MonthlyExpenseExport<'a> {
    report: &'a MonthlyExpenseReport,
    currency: Currency,
}

impl<'a> MonthlyExpenseExport<'a> {
    /// Wraps a report for export.
    #[must_use]
    pub const fn new(report: &'a MonthlyExpenseReport, currency: Currency) -> Self {
        Self { report, currency }
    }

    /// One row per month and category with spending, oldest month first,
    /// then the grand total.
    pub fn csv(&self) -> Result<String, ExportError> {
        let mut wtr = Writer::from_writer(Vec::new());
        wtr.write_record(EXPENSES_CSV_HEADER)?;
        for bucket in &self.report.months {
            for (category, amount) in bucket.values.iter().filter(|(_, amount)| !amount.is_zero()) {
                wtr.write_record([bucket.month.to_string(), category.clone(), whole(*amount)])?;
            }
        }
        wtr.write_record(["", GRAND_TOTAL_LABEL, whole(self.report.grand_total).as_str()])?;
        finish(wtr)
    }

    /// Month by category grid with a total column and a totals row.
    #[must_use]
    pub fn printable(&self) -> PrintableTable {
        let report = self.report;

        let mut headings = vec!["Month".to_string()];
        headings.extend(report.categories.iter().map(|key| humanize_category(key)));
        headings.push(TOTAL_LABEL.to_string());

        let rows = report
            .months
            .iter()
            .map(|bucket| {
                let mut row = vec![bucket.month.label()];
                row.extend(report.categories.iter().map(|key| blank_if_zero(bucket.value(key))));
                row.push(bucket.total().format_whole());
                row
            })
            .collect();

        let mut totals = vec![TOTAL_LABEL.to_string()];
        totals.extend(report.categories.iter().map(|key| {
            let total: Money = report.months.iter().map(|bucket| bucket.value(key)).sum();
            total.format_whole()
        }));
        totals.push(report.grand_total.format_whole());

        PrintableTable {
            title: "Monthly Expenses".to_string(),
            period: period(report.window),
            currency: self.currency.code().to_string(),
            columns: headings,
            rows,
            totals,
            figures: vec![PrintableFigure::new(GRAND_TOTAL_LABEL, report.grand_total)],
        }
    }

    /// Interactive view: the report serialized as JSON.
    pub fn json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string(self.report)?)
    }
}

/// Renders a [`CashFlowReport`].
#[derive(Debug, Clone, Copy)]
pub struct CashFlowExport<'a> {
    report: &'a CashFlowReport,
    currency: Currency,
}

impl<'a> CashFlowExport<'a> {
    /// Wraps a report for export.
    #[must_use]
    pub const fn new(report: &'a CashFlowReport, currency: Currency) -> Self {
        Self { report, currency }
    }

    /// Inflow rows followed by total in, total out and balance rows.
    pub fn csv(&self) -> Result<String, ExportError> {
        let report = self.report;
        let mut wtr = Writer::from_writer(Vec::new());
        wtr.write_record(CASH_FLOW_CSV_HEADER)?;
        for inflow in &report.inflows {
            wtr.write_record([inflow.date.to_string(), inflow.label.clone(), whole(inflow.amount)])?;
        }
        for (label, amount) in self.figures() {
            wtr.write_record(["", label, whole(amount).as_str()])?;
        }
        finish(wtr)
    }

    /// Inflow table with the cash position underneath.
    #[must_use]
    pub fn printable(&self) -> PrintableTable {
        let report = self.report;
        PrintableTable {
            title: "Cash Flow Statement".to_string(),
            period: period(report.window),
            currency: self.currency.code().to_string(),
            columns: columns(&CASH_FLOW_CSV_HEADER),
            rows: report
                .inflows
                .iter()
                .map(|inflow| {
                    vec![
                        inflow.date.to_string(),
                        inflow.label.clone(),
                        inflow.amount.format_whole(),
                    ]
                })
                .collect(),
            totals: vec![
                String::new(),
                TOTAL_IN_LABEL.to_string(),
                report.total_in.format_whole(),
            ],
            figures: self
                .figures()
                .into_iter()
                .map(|(label, amount)| PrintableFigure::new(label, amount))
                .collect(),
        }
    }

    /// Interactive view: the report serialized as JSON.
    pub fn json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string(self.report)?)
    }

    fn figures(&self) -> [(&'static str, Money); 3] {
        [
            (TOTAL_IN_LABEL, self.report.total_in),
            (TOTAL_OUT_LABEL, self.report.total_out),
            (BALANCE_LABEL, self.report.balance),
        ]
    }
}

/// Renders a [`SubcontractorReport`].
#[derive(Debug, Clone, Copy)]
pub struct SubcontractorExport<'a> {
    report: &'a SubcontractorReport,
    currency: Currency,
}

impl<'a> SubcontractorExport<'a> {
    /// Wraps a report for export.
    #[must_use]
    pub const fn new(report: &'a SubcontractorReport, currency: Currency) -> Self {
        Self { report, currency }
    }

    /// One row per contract, then a totals row. Subcontractors without
    /// contracts have no rows.
    pub fn csv(&self) -> Result<String, ExportError> {
        let report = self.report;
        let mut wtr = Writer::from_writer(Vec::new());
        wtr.write_record(SUBCONTRACTORS_CSV_HEADER)?;
        for subcontractor in &report.subcontractors {
            for contract in &subcontractor.contracts {
                wtr.write_record([
                    subcontractor.name.clone(),
                    contract.description.clone(),
                    whole(contract.billed),
                    whole(contract.paid),
                    whole(contract.balance),
                    contract.status.as_str().to_string(),
                ])?;
            }
        }
        wtr.write_record([
            TOTAL_LABEL.to_string(),
            String::new(),
            whole(report.total_billed),
            whole(report.total_paid),
            whole(report.balance),
            String::new(),
        ])?;
        finish(wtr)
    }

    /// Contract table with billed, paid and outstanding totals.
    #[must_use]
    pub fn printable(&self) -> PrintableTable {
        let report = self.report;
        let rows = report
            .subcontractors
            .iter()
            .flat_map(|subcontractor| {
                subcontractor.contracts.iter().map(|contract| {
                    vec![
                        subcontractor.name.clone(),
                        contract.description.clone(),
                        contract.billed.format_whole(),
                        contract.paid.format_whole(),
                        contract.balance.format_whole(),
                        humanize_category(contract.status.as_str()),
                    ]
                })
            })
            .collect();

        PrintableTable {
            title: "Subcontractor Summary".to_string(),
            period: period(report.window),
            currency: self.currency.code().to_string(),
            columns: columns(&SUBCONTRACTORS_CSV_HEADER),
            rows,
            totals: vec![
                TOTAL_LABEL.to_string(),
                String::new(),
                report.total_billed.format_whole(),
                report.total_paid.format_whole(),
                report.balance.format_whole(),
                String::new(),
            ],
            figures: vec![
                PrintableFigure::new(TOTAL_BILLED_LABEL, report.total_billed),
                PrintableFigure::new(TOTAL_PAID_LABEL, report.total_paid),
                PrintableFigure::new(BALANCE_LABEL, report.balance),
            ],
        }
    }

    /// Interactive view: the report serialized as JSON.
    pub fn json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string(self.report)?)
    }
}
