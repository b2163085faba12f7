//! Printable table model and formatting shared by the export renderings.

use chrono::NaiveDate;
use csv::Writer;
use serde::{Deserialize, Serialize};
use sitebook_shared::types::Money;

use super::error::ExportError;
use crate::ledger::DateWindow;

/// A labelled headline figure printed under a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintableFigure {
    /// e.g. `Total In`.
    pub label: String,
    /// Formatted amount.
    pub value: String,
}

impl PrintableFigure {
    pub(super) fn new(label: &str, amount: Money) -> Self {
        Self {
            label: label.to_string(),
            value: amount.format_whole(),
        }
    }
}

/// Document model for a tabular report, handed to a print renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintableTable {
    /// Heading.
    pub title: String,
    /// Period line.
    pub period: String,
    /// Currency code shown next to amounts.
    pub currency: String,
    /// Column headings.
    pub columns: Vec<String>,
    /// Body rows, one cell per column.
    pub rows: Vec<Vec<String>>,
    /// Totals row, one cell per column.
    pub totals: Vec<String>,
    /// Headline figures.
    pub figures: Vec<PrintableFigure>,
}

impl PrintableTable {
    /// Headline figure by label.
    #[must_use]
    pub fn figure(&self, label: &str) -> Option<&str> {
        self.figures
            .iter()
            .find(|figure| figure.label == label)
            .map(|figure| figure.value.as_str())
    }
}

pub(super) fn columns(headings: &[&str]) -> Vec<String> {
    headings.iter().map(ToString::to_string).collect()
}

/// Amount in whole currency units, no separators.
pub(super) fn whole(amount: Money) -> String {
    amount.whole().to_string()
}

pub(super) fn blank_if_zero(amount: Money) -> String {
    if amount.is_zero() {
        String::new()
    } else {
        amount.format_whole()
    }
}

pub(super) fn period(window: DateWindow) -> String {
    let bound = |date: Option<NaiveDate>, open: &str| {
        date.map_or_else(|| open.to_string(), |date| date.to_string())
    };
    format!(
        "{} to {}",
        bound(window.from, "Beginning"),
        bound(window.to, "Present")
    )
}

pub(super) fn finish(wtr: Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = wtr.into_inner().map_err(csv::IntoInnerError::into_error)?;
    Ok(String::from_utf8(bytes)?)
}
