//! Ledger domain types: input events, query shapes and statement output.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sitebook_shared::types::{Money, ProjectId};

use super::error::LedgerError;

/// Optional project scope applied to every source query.
pub type ProjectFilter = Option<ProjectId>;

/// Anything with a date and an amount that can be bucketed or summed.
pub trait DatedAmount {
    /// Calendar date of the movement.
    fn date(&self) -> NaiveDate;
    /// Amount moved.
    fn amount(&self) -> Money;
}

/// Cash received, e.g. a client payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditEvent {
    /// Date the cash was received.
    pub date: NaiveDate,
    /// Source of the cash.
    pub label: String,
    /// Amount received.
    pub amount: Money,
}

impl CreditEvent {
    /// Creates a credit event.
    #[must_use]
    pub fn new(date: NaiveDate, label: impl Into<String>, amount: Money) -> Self {
        Self {
            date,
            label: label.into(),
            amount,
        }
    }
}

/// Money spent on an expense line.
///
/// `amount` is the subtotal computed upstream (`quantity * unit_price`); the
/// engine never recomputes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebitEvent {
    /// Date of the expense.
    pub date: NaiveDate,
    /// Expense description.
    pub label: String,
    /// Expense subtotal.
    pub amount: Money,
    /// Expense category key, e.g. `cement` or `sand_aggregate`.
    pub category: String,
}

impl DebitEvent {
    /// Creates a debit event.
    #[must_use]
    pub fn new(
        date: NaiveDate,
        label: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            date,
            label: label.into(),
            amount,
            category: category.into(),
        }
    }
}

/// A miscellaneous charge booked against a project, e.g. a permit fee or
/// bank charge. Charges are reported on their own and never enter the cash
/// ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeEvent {
    /// Project charged.
    pub project_id: ProjectId,
    /// Date of the charge.
    pub date: NaiveDate,
    /// Charge description.
    pub label: String,
    /// Amount charged.
    pub amount: Money,
    /// Charge category name, e.g. `Permits`.
    pub category: String,
}

impl ChargeEvent {
    /// Creates a charge.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        date: NaiveDate,
        label: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            project_id,
            date,
            label: label.into(),
            amount,
            category: category.into(),
        }
    }
}

impl DatedAmount for ChargeEvent {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn amount(&self) -> Money {
        self.amount
    }
}

impl DatedAmount for CreditEvent {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn amount(&self) -> Money {
        self.amount
    }
}

impl DatedAmount for DebitEvent {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn amount(&self) -> Money {
        self.amount
    }
}

/// Inclusive date window; either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// First day included, if bounded.
    pub from: Option<NaiveDate>,
    /// Last day included, if bounded.
    pub to: Option<NaiveDate>,
}

impl DateWindow {
    /// Creates a window from optional bounds.
    #[must_use]
    pub const fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// A window with no bounds.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self::new(None, None)
    }

    /// A window bounded on both sides.
    #[must_use]
    pub const fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self::new(Some(from), Some(to))
    }

    /// A window open at the end.
    #[must_use]
    pub const fn since(from: NaiveDate) -> Self {
        Self::new(Some(from), None)
    }

    /// First day of `today`'s month through `today`.
    #[must_use]
    pub fn current_month(today: NaiveDate) -> Self {
        Self::between(today.with_day(1).unwrap_or(today), today)
    }

    /// Rejects windows whose start is after their end.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidWindow` if `from > to`.
    pub fn validate(&self) -> Result<(), LedgerError> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from > to => Err(LedgerError::InvalidWindow { from, to }),
            _ => Ok(()),
        }
    }

    /// Returns true if `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    /// Returns true if neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Date restriction carried by an [`EventQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    /// Events inside the window, bounds inclusive.
    Within(DateWindow),
    /// Events strictly before the date, used for opening balances.
    Before(NaiveDate),
}

impl DateRange {
    /// Returns true if `date` matches the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            Self::Within(window) => window.contains(date),
            Self::Before(cutoff) => date < *cutoff,
        }
    }
}

/// A request to an event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventQuery {
    /// Project scope; `None` means all projects.
    pub project: ProjectFilter,
    /// Date restriction.
    pub range: DateRange,
}

impl EventQuery {
    /// Events for `project` inside `window`.
    #[must_use]
    pub const fn within(project: ProjectFilter, window: DateWindow) -> Self {
        Self {
            project,
            range: DateRange::Within(window),
        }
    }

    /// Events for `project` strictly before `cutoff`.
    #[must_use]
    pub const fn before(project: ProjectFilter, cutoff: NaiveDate) -> Self {
        Self {
            project,
            range: DateRange::Before(cutoff),
        }
    }
}

/// Filters carried by a report request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilter {
    /// Project scope.
    pub project: ProjectFilter,
    /// Date window.
    pub window: DateWindow,
}

impl ReportFilter {
    /// Creates a filter.
    #[must_use]
    pub const fn new(project: ProjectFilter, window: DateWindow) -> Self {
        Self { project, window }
    }
}

/// Filters for the financial charge listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeFilter {
    /// Project scope.
    pub project: ProjectFilter,
    /// Charge category name; `None` means every category.
    pub category: Option<String>,
    /// Date window.
    pub window: DateWindow,
}

impl ChargeFilter {
    /// Creates a filter.
    #[must_use]
    pub const fn new(project: ProjectFilter, category: Option<String>, window: DateWindow) -> Self {
        Self {
            project,
            category,
            window,
        }
    }

    /// Returns true if `charge` matches every filter.
    #[must_use]
    pub fn matches(&self, charge: &ChargeEvent) -> bool {
        self.project.is_none_or(|id| id == charge.project_id)
            && self
                .category
                .as_deref()
                .is_none_or(|category| category == charge.category)
            && self.window.contains(charge.date)
    }
}

/// One row of a ledger statement.
///
/// Column naming follows the cash-book convention used on site: `debit` is
/// money in and raises the balance, `credit` is money out and lowers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTransaction {
    /// Event date.
    pub date: NaiveDate,
    /// `Cash In: ...` or `Expense: ...`.
    pub description: String,
    /// Money in.
    pub debit: Money,
    /// Money out.
    pub credit: Money,
    /// Running balance after this row.
    pub balance: Money,
}

/// Running-balance statement for one project/window selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStatement {
    /// Net position from all history strictly before the window.
    pub opening_balance: Money,
    /// Rows in chronological order.
    pub transactions: Vec<LedgerTransaction>,
    /// Sum of the debit column.
    pub total_debit: Money,
    /// Sum of the credit column.
    pub total_credit: Money,
    /// Balance after the last row.
    pub closing_balance: Money,
}

impl LedgerStatement {
    /// A statement with no rows.
    #[must_use]
    pub fn empty(opening_balance: Money) -> Self {
        Self {
            opening_balance,
            transactions: Vec::new(),
            total_debit: Money::zero(),
            total_credit: Money::zero(),
            closing_balance: opening_balance,
        }
    }

    /// Checks `closing = opening + total_debit - total_credit`.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.closing_balance == self.opening_balance + self.total_debit - self.total_credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_rejects_inverted_bounds() {
        let window = DateWindow::between(date(2025, 2, 1), date(2025, 1, 1));
        let err = window.validate().unwrap_err();
        assert!(matches!(err, LedgerError::InvalidWindow { .. }));
    }

    #[test]
    fn test_window_accepts_open_and_single_day_bounds() {
        assert!(DateWindow::unbounded().validate().is_ok());
        assert!(DateWindow::since(date(2025, 1, 1)).validate().is_ok());
        assert!(
            DateWindow::between(date(2025, 1, 1), date(2025, 1, 1))
                .validate()
                .is_ok()
        );
    }

    #[rstest]
    #[case(date(2025, 1, 9), false)]
    #[case(date(2025, 1, 10), true)]
    #[case(date(2025, 1, 31), true)]
    #[case(date(2025, 2, 1), false)]
    fn test_window_bounds_are_inclusive(#[case] day: NaiveDate, #[case] expected: bool) {
        let window = DateWindow::between(date(2025, 1, 10), date(2025, 1, 31));
        assert_eq!(window.contains(day), expected);
    }

    #[test]
    fn test_before_range_is_strict() {
        let range = DateRange::Before(date(2025, 1, 10));
        assert!(range.contains(date(2025, 1, 9)));
        assert!(!range.contains(date(2025, 1, 10)));
    }

    #[test]
    fn test_current_month_window() {
        let window = DateWindow::current_month(date(2025, 3, 17));
        assert_eq!(window.from, Some(date(2025, 3, 1)));
        assert_eq!(window.to, Some(date(2025, 3, 17)));
    }

    #[test]
    fn test_empty_statement_is_balanced() {
        let statement = LedgerStatement::empty(Money::from_minor(12_345));
        assert!(statement.is_balanced());
        assert_eq!(statement.closing_balance, statement.opening_balance);
    }
}
