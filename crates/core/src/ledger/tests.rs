//! Property-based tests for the ledger statement.

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use futures::executor::block_on;
use proptest::prelude::*;
use rust_decimal_macros::dec;
use sitebook_shared::types::{Money, ProjectId};

use super::error::{LedgerError, SourceError};
use super::memory::MemoryStore;
use super::service::LedgerService;
use super::source::LedgerEventSource;
use super::types::{CreditEvent, DateWindow, DebitEvent, EventQuery};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn base_date() -> NaiveDate {
    date(2025, 1, 1)
}

fn day(offset: u64) -> NaiveDate {
    base_date().checked_add_days(Days::new(offset)).unwrap()
}

/// (day offset, amount in cents, is credit, belongs to the filtered project)
type RawEvent = (u64, i64, bool, bool);

fn event_strategy() -> impl Strategy<Value = RawEvent> {
    (0u64..120, 1i64..1_000_000_000, any::<bool>(), prop::bool::weighted(0.8))
}

fn store_from(project: ProjectId, events: &[RawEvent]) -> MemoryStore {
    let other = ProjectId::new();
    let mut store = MemoryStore::new();
    for (i, &(offset, cents, is_credit, ours)) in events.iter().enumerate() {
        let owner = if ours { project } else { other };
        let amount = Money::from_minor(cents);
        if is_credit {
            store.record_credit(owner, CreditEvent::new(day(offset), format!("Draw {i}"), amount));
        } else {
            store.record_debit(
                owner,
                DebitEvent::new(day(offset), format!("Item {i}"), amount, "other"),
            );
        }
    }
    store
}

#[derive(Debug, thiserror::Error)]
#[error("connection reset")]
struct StoreDown;

struct FailingSource;

#[async_trait]
impl LedgerEventSource for FailingSource {
    async fn list_credits(&self, _query: &EventQuery) -> Result<Vec<CreditEvent>, SourceError> {
        Err(Box::new(StoreDown))
    }

    async fn list_debits(&self, _query: &EventQuery) -> Result<Vec<DebitEvent>, SourceError> {
        Err(Box::new(StoreDown))
    }
}

#[test]
fn test_reference_scenario() {
    let project = ProjectId::new();
    let mut store = MemoryStore::new();
    store
        .record_credit(
            project,
            CreditEvent::new(date(2025, 1, 5), "Advance", Money::new(dec!(1000000))),
        )
        .record_debit(
            project,
            DebitEvent::new(date(2025, 1, 15), "Cement", Money::new(dec!(400000)), "cement"),
        )
        .record_credit(
            project,
            CreditEvent::new(date(2025, 1, 20), "Second draw", Money::new(dec!(200000))),
        );

    let window = DateWindow::between(date(2025, 1, 10), date(2025, 1, 31));
    let statement = block_on(LedgerService::build_statement(&store, window, Some(project))).unwrap();

    assert_eq!(statement.opening_balance, Money::new(dec!(1000000)));
    assert_eq!(statement.transactions.len(), 2);

    let first = &statement.transactions[0];
    assert_eq!(first.date, date(2025, 1, 15));
    assert_eq!(first.debit, Money::zero());
    assert_eq!(first.credit, Money::new(dec!(400000)));
    assert_eq!(first.balance, Money::new(dec!(600000)));

    let second = &statement.transactions[1];
    assert_eq!(second.date, date(2025, 1, 20));
    assert_eq!(second.debit, Money::new(dec!(200000)));
    assert_eq!(second.credit, Money::zero());
    assert_eq!(second.balance, Money::new(dec!(800000)));

    assert_eq!(statement.total_debit, Money::new(dec!(200000)));
    assert_eq!(statement.total_credit, Money::new(dec!(400000)));
    assert_eq!(statement.closing_balance, Money::new(dec!(800000)));
}

#[test]
fn test_open_start_has_zero_opening_balance() {
    let project = ProjectId::new();
    let mut store = MemoryStore::new();
    store.record_credit(
        project,
        CreditEvent::new(date(2024, 6, 1), "Old draw", Money::new(dec!(5000))),
    );

    let window = DateWindow::new(None, Some(date(2025, 1, 31)));
    let statement = block_on(LedgerService::build_statement(&store, window, Some(project))).unwrap();

    assert_eq!(statement.opening_balance, Money::zero());
    assert_eq!(statement.closing_balance, Money::new(dec!(5000)));
}

#[test]
fn test_empty_window_returns_empty_statement() {
    let project = ProjectId::new();
    let mut store = MemoryStore::new();
    store.record_credit(
        project,
        CreditEvent::new(date(2025, 1, 5), "Advance", Money::new(dec!(300))),
    );

    let window = DateWindow::between(date(2025, 2, 1), date(2025, 2, 28));
    let statement = block_on(LedgerService::build_statement(&store, window, Some(project))).unwrap();

    assert!(statement.transactions.is_empty());
    assert_eq!(statement.opening_balance, Money::new(dec!(300)));
    assert_eq!(statement.closing_balance, statement.opening_balance);
}

#[test]
fn test_inverted_window_is_rejected_before_querying() {
    let window = DateWindow::between(date(2025, 2, 1), date(2025, 1, 1));
    let err = block_on(LedgerService::build_statement(&FailingSource, window, None)).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidWindow { .. }));
}

#[test]
fn test_source_failure_propagates_unchanged() {
    let err = block_on(LedgerService::build_statement(
        &FailingSource,
        DateWindow::unbounded(),
        None,
    ))
    .unwrap_err();

    let LedgerError::Source(inner) = err else {
        panic!("expected source error");
    };
    assert!(inner.downcast_ref::<StoreDown>().is_some());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Balance identity: closing = opening + total debit - total credit.
    #[test]
    fn prop_balance_identity(
        events in prop::collection::vec(event_strategy(), 0..40),
        from in 0u64..120,
        len in 0u64..60,
    ) {
        let project = ProjectId::new();
        let store = store_from(project, &events);
        let window = DateWindow::between(day(from), day(from + len));

        let statement = block_on(LedgerService::build_statement(&store, window, Some(project))).unwrap();

        prop_assert!(statement.is_balanced());
        let debit_sum: Money = statement.transactions.iter().map(|row| row.debit).sum();
        let credit_sum: Money = statement.transactions.iter().map(|row| row.credit).sum();
        prop_assert_eq!(debit_sum, statement.total_debit);
        prop_assert_eq!(credit_sum, statement.total_credit);
    }

    /// Each row's balance is the previous balance adjusted by that row only.
    #[test]
    fn prop_running_balance_is_cumulative(
        events in prop::collection::vec(event_strategy(), 0..40),
    ) {
        let project = ProjectId::new();
        let store = store_from(project, &events);
        let window = DateWindow::since(day(30));

        let statement = block_on(LedgerService::build_statement(&store, window, Some(project))).unwrap();

        let mut previous = statement.opening_balance;
        for row in &statement.transactions {
            prop_assert_eq!(row.balance, previous + row.debit - row.credit);
            previous = row.balance;
        }
        prop_assert!(statement.transactions.windows(2).all(|pair| pair[0].date <= pair[1].date));
    }

    /// Continuity: splitting a window at `d` carries the closing balance over.
    #[test]
    fn prop_split_windows_are_continuous(
        events in prop::collection::vec(event_strategy(), 0..40),
        from in 0u64..40,
        split in 1u64..40,
        tail in 0u64..40,
    ) {
        let project = ProjectId::new();
        let store = store_from(project, &events);
        let split_day = day(from + split);

        let head = DateWindow::between(day(from), split_day.pred_opt().unwrap());
        let rest = DateWindow::between(split_day, day(from + split + tail));

        let first = block_on(LedgerService::build_statement(&store, head, Some(project))).unwrap();
        let second = block_on(LedgerService::build_statement(&store, rest, Some(project))).unwrap();

        prop_assert_eq!(first.closing_balance, second.opening_balance);
    }

    /// Determinism: identical inputs give byte-identical output.
    #[test]
    fn prop_statement_is_deterministic(
        events in prop::collection::vec(event_strategy(), 0..40),
    ) {
        let project = ProjectId::new();
        let store = store_from(project, &events);
        let window = DateWindow::between(day(10), day(90));

        let a = block_on(LedgerService::build_statement(&store, window, Some(project))).unwrap();
        let b = block_on(LedgerService::build_statement(&store, window, Some(project))).unwrap();

        prop_assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }
}
