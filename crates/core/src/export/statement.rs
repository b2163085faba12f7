//! Statement renderings: tabular file, printable document and JSON view.
//!
//! All three read their totals from the same [`LedgerStatement`]; none of them
//! recomputes a balance.

use csv::Writer;
use serde::{Deserialize, Serialize};
use sitebook_shared::types::Currency;

use super::error::ExportError;
use super::table::{blank_if_zero, finish, period, whole};
use crate::ledger::LedgerStatement;
use crate::reports::ProjectStatement;

/// CSV header row.
pub const CSV_HEADER: [&str; 5] = ["Date", "Description", "Debit", "Credit", "Balance"];
/// Description of the opening row.
pub const OPENING_LABEL: &str = "Opening Balance";
/// Description of the closing row.
pub const CLOSING_LABEL: &str = "Closing Balance";

/// One row of the printable statement, pre-formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintableRow {
    /// `YYYY-MM-DD`.
    pub date: String,
    /// Row description.
    pub description: String,
    /// Money in; blank when zero.
    pub debit: String,
    /// Money out; blank when zero.
    pub credit: String,
    /// Running balance.
    pub balance: String,
}

/// Document model handed to a print renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintableStatement {
    /// Heading, e.g. `Project Statement - Mbezi House`.
    pub title: String,
    /// Period line, e.g. `2025-01-10 to 2025-01-31`.
    pub period: String,
    /// Currency code shown next to amounts.
    pub currency: String,
    /// Opening balance.
    pub opening_balance: String,
    /// Transaction rows.
    pub rows: Vec<PrintableRow>,
    /// Sum of the debit column.
    pub total_debit: String,
    /// Sum of the credit column.
    pub total_credit: String,
    /// Closing balance.
    pub closing_balance: String,
}

/// Renders a [`ProjectStatement`] in the export formats.
#[derive(Debug, Clone, Copy)]
pub struct StatementExport<'a> {
    report: &'a ProjectStatement,
    currency: Currency,
}

impl<'a> StatementExport<'a> {
    /// Wraps a statement for export.
    #[must_use]
    pub const fn new(report: &'a ProjectStatement, currency: Currency) -> Self {
        Self { report, currency }
    }

    fn statement(&self) -> &'a LedgerStatement {
        &self.report.statement
    }

    /// Tabular file: header, opening row, one row per transaction and a
    /// closing row with the column totals. Amounts are whole currency units.
    pub fn csv(&self) -> Result<String, ExportError> {
        let statement = self.statement();
        let mut wtr = Writer::from_writer(Vec::new());

        let opening = whole(statement.opening_balance);
        wtr.write_record(CSV_HEADER)?;
        wtr.write_record(["", OPENING_LABEL, "", "", opening.as_str()])?;
        for row in &statement.transactions {
            wtr.write_record([
                row.date.to_string(),
                row.description.clone(),
                whole(row.debit),
                whole(row.credit),
                whole(row.balance),
            ])?;
        }
        wtr.write_record([
            String::new(),
            CLOSING_LABEL.to_string(),
            whole(statement.total_debit),
            whole(statement.total_credit),
            whole(statement.closing_balance),
        ])?;

        finish(wtr)
    }

    /// Printable document with thousands separators.
    #[must_use]
    pub fn printable(&self) -> PrintableStatement {
        let statement = self.statement();
        let title = match &self.report.project_name {
            Some(name) => format!("Project Statement - {name}"),
            None => "Project Statement - All Projects".to_string(),
        };

        PrintableStatement {
            title,
            period: period(self.report.window),
            currency: self.currency.code().to_string(),
            opening_balance: statement.opening_balance.format_whole(),
            rows: statement
                .transactions
                .iter()
                .map(|row| PrintableRow {
                    date: row.date.to_string(),
                    description: row.description.clone(),
                    debit: blank_if_zero(row.debit),
                    credit: blank_if_zero(row.credit),
                    balance: row.balance.format_whole(),
                })
                .collect(),
            total_debit: statement.total_debit.format_whole(),
            total_credit: statement.total_credit.format_whole(),
            closing_balance: statement.closing_balance.format_whole(),
        }
    }

    /// Interactive view: the statement serialized as JSON.
    pub fn json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string(self.statement())?)
    }
}
