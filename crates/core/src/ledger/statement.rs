//! Running-balance statement construction.
//!
//! Rows are ordered by date. Same-day ties put cash received before money
//! spent, and keep source order within each stream.

use chrono::NaiveDate;
use sitebook_shared::types::Money;

use super::types::{CreditEvent, DebitEvent, LedgerStatement, LedgerTransaction};

/// Description prefix for cash received.
pub const CASH_IN_PREFIX: &str = "Cash In: ";
/// Description prefix for expenses.
pub const EXPENSE_PREFIX: &str = "Expense: ";

/// Stream a row came from; declaration order is the same-day tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stream {
    Credit,
    Debit,
}

/// Builds statements from already-fetched events.
pub struct StatementBuilder;

impl StatementBuilder {
    /// Net position of the given history: credits minus debits.
    #[must_use]
    pub fn opening_balance(credits: &[CreditEvent], debits: &[DebitEvent]) -> Money {
        let received: Money = credits.iter().map(|event| event.amount).sum();
        let spent: Money = debits.iter().map(|event| event.amount).sum();
        received - spent
    }

    /// Merges both streams into a running-balance statement starting at
    /// `opening_balance`.
    #[must_use]
    pub fn build(
        opening_balance: Money,
        credits: &[CreditEvent],
        debits: &[DebitEvent],
    ) -> LedgerStatement {
        let mut rows: Vec<((NaiveDate, Stream, usize), LedgerTransaction)> =
            Vec::with_capacity(credits.len() + debits.len());

        for (seq, event) in credits.iter().enumerate() {
            rows.push((
                (event.date, Stream::Credit, seq),
                LedgerTransaction {
                    date: event.date,
                    description: format!("{CASH_IN_PREFIX}{}", event.label),
                    debit: event.amount,
                    credit: Money::zero(),
                    balance: Money::zero(),
                },
            ));
        }
        for (seq, event) in debits.iter().enumerate() {
            rows.push((
                (event.date, Stream::Debit, seq),
                LedgerTransaction {
                    date: event.date,
                    description: format!("{EXPENSE_PREFIX}{}", event.label),
                    debit: Money::zero(),
                    credit: event.amount,
                    balance: Money::zero(),
                },
            ));
        }

        rows.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut running = opening_balance;
        let mut total_debit = Money::zero();
        let mut total_credit = Money::zero();
        let transactions: Vec<LedgerTransaction> = rows
            .into_iter()
            .map(|(_, mut row)| {
                running += row.debit - row.credit;
                total_debit += row.debit;
                total_credit += row.credit;
                row.balance = running;
                row
            })
            .collect();

        LedgerStatement {
            opening_balance,
            transactions,
            total_debit,
            total_credit,
            closing_balance: running,
        }
    }
}
