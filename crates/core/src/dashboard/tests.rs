use chrono::NaiveDate;
use futures::executor::block_on;
use rust_decimal_macros::dec;
use sitebook_shared::ReportingConfig;
use sitebook_shared::types::{ContractId, Money, ProjectId, SubcontractorId};

use super::service::DashboardService;
use crate::budget::UtilizationLevel;
use crate::ledger::{
    ContractRecord, ContractStatus, CreditEvent, DebitEvent, MemoryStore, PaymentRecord,
    ProjectRecord, ProjectStatus, SubcontractorRecord,
};
use crate::reports::CASH_IN_STREAM;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn project(name: &str, budget: rust_decimal::Decimal, status: ProjectStatus) -> ProjectRecord {
    ProjectRecord {
        id: ProjectId::new(),
        name: name.into(),
        budget: Money::new(budget),
        status,
    }
}

fn contract(project_id: ProjectId, name: &str, billed: rust_decimal::Decimal, paid: rust_decimal::Decimal) -> ContractRecord {
    ContractRecord {
        id: ContractId::new(),
        project_id,
        subcontractor_id: SubcontractorId::new(),
        subcontractor_name: name.into(),
        description: "Works".into(),
        billed_amount: Money::new(billed),
        status: ContractStatus::InProgress,
        payments: if paid > dec!(0) {
            vec![PaymentRecord { date: date(2025, 2, 1), amount: Money::new(paid) }]
        } else {
            Vec::new()
        },
    }
}

fn sample_store() -> (MemoryStore, ProjectRecord, ProjectRecord) {
    let house = project("Mbezi House", dec!(1000000), ProjectStatus::Active);
    let shop = project("Kariakoo Shop", dec!(200000), ProjectStatus::Completed);

    let mut store = MemoryStore::new();
    store
        .add_project(house.clone())
        .add_project(shop.clone())
        .record_credit(house.id, CreditEvent::new(date(2024, 6, 1), "Old advance", Money::new(dec!(300000))))
        .record_credit(house.id, CreditEvent::new(date(2025, 3, 2), "Draw", Money::new(dec!(900000))))
        .record_debit(house.id, DebitEvent::new(date(2024, 6, 5), "Foundation", Money::new(dec!(100000)), "cement"))
        .record_debit(house.id, DebitEvent::new(date(2025, 2, 14), "Rebar", Money::new(dec!(650000)), "steel"))
        .record_debit(house.id, DebitEvent::new(date(2025, 3, 4), "Blocks", Money::new(dec!(50000)), "cement"))
        .record_debit(shop.id, DebitEvent::new(date(2025, 3, 10), "Paint", Money::new(dec!(190000)), "paint"))
        .add_contract(contract(house.id, "Zawadi Roofing", dec!(400000), dec!(150000)))
        .add_contract(contract(shop.id, "Idle Fundi", dec!(0), dec!(0)))
        .add_subcontractor(SubcontractorRecord { id: SubcontractorId::new(), name: "Amani Plumbing".into() });
    (store, house, shop)
}

#[test]
fn test_dashboard_stats() {
    let (store, _, _) = sample_store();
    let dashboard = block_on(DashboardService::build(&store, date(2025, 3, 15), &ReportingConfig::default())).unwrap();

    let stats = &dashboard.stats;
    assert_eq!(stats.spent_this_month, Money::new(dec!(240000)));
    assert_eq!(stats.total_spent, Money::new(dec!(990000)));
    assert_eq!(stats.total_received, Money::new(dec!(1200000)));
    assert_eq!(stats.cash_balance, Money::new(dec!(210000)));
    assert_eq!(stats.active_projects, 1);
    assert_eq!(stats.total_projects, 2);
    assert_eq!(stats.total_subcontractors, 3);
}

#[test]
fn test_trend_charts_start_six_months_back() {
    let (store, _, _) = sample_store();
    let dashboard = block_on(DashboardService::build(&store, date(2025, 3, 15), &ReportingConfig::default())).unwrap();

    let labels: Vec<&str> = dashboard.monthly_spending.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, vec!["Feb 2025", "Mar 2025"]);
    assert_eq!(dashboard.monthly_spending[1].total, Money::new(dec!(240000)));

    assert_eq!(dashboard.monthly_cash_flow.len(), 2);
    assert_eq!(dashboard.monthly_cash_flow[0].value(CASH_IN_STREAM), Money::zero());
    assert_eq!(dashboard.monthly_cash_flow[1].value(CASH_IN_STREAM), Money::new(dec!(900000)));
}

#[test]
fn test_project_budgets_sorted_and_classified() {
    let (store, house, shop) = sample_store();
    let dashboard = block_on(DashboardService::build(&store, date(2025, 3, 15), &ReportingConfig::default())).unwrap();

    assert_eq!(dashboard.project_budgets.len(), 2);
    let first = &dashboard.project_budgets[0];
    assert_eq!(first.project_id, house.id);
    assert_eq!(first.utilization.percentage, dec!(80.0));
    assert_eq!(first.utilization.level, UtilizationLevel::Warning);

    let second = &dashboard.project_budgets[1];
    assert_eq!(second.project_id, shop.id);
    assert_eq!(second.utilization.percentage, dec!(95.0));
    assert_eq!(second.utilization.level, UtilizationLevel::Critical);
}

#[test]
fn test_budget_panel_respects_limit() {
    let (store, house, _) = sample_store();
    let config = ReportingConfig {
        project_budget_limit: 1,
        recent_expense_limit: 2,
        ..ReportingConfig::default()
    };
    let dashboard = block_on(DashboardService::build(&store, date(2025, 3, 15), &config)).unwrap();

    assert_eq!(dashboard.project_budgets.len(), 1);
    assert_eq!(dashboard.project_budgets[0].project_id, house.id);

    let recent: Vec<(&str, &str)> = dashboard
        .recent_expenses
        .iter()
        .map(|e| (e.expense.label.as_str(), e.project_name.as_str()))
        .collect();
    assert_eq!(recent, vec![("Paint", "Kariakoo Shop"), ("Blocks", "Mbezi House")]);
}

#[test]
fn test_recent_expense_serializes_with_project() {
    let (store, house, _) = sample_store();
    let dashboard = block_on(DashboardService::build(&store, date(2025, 3, 15), &ReportingConfig::default())).unwrap();

    let blocks = &dashboard.recent_expenses[1];
    assert_eq!(blocks.project_id, house.id);
    let json = serde_json::to_value(blocks).unwrap();
    assert_eq!(json["project_name"], "Mbezi House");
    assert_eq!(json["label"], "Blocks");
    assert_eq!(json["category"], "cement");
}

#[test]
fn test_category_breakdown_and_subcontractor_balances() {
    let (store, _, _) = sample_store();
    let dashboard = block_on(DashboardService::build(&store, date(2025, 3, 15), &ReportingConfig::default())).unwrap();

    let categories: Vec<&str> = dashboard.spending_by_category.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(categories, vec!["Steel", "Paint", "Cement"]);

    assert_eq!(dashboard.subcontractor_balances.len(), 1);
    let roofer = &dashboard.subcontractor_balances[0];
    assert_eq!(roofer.name, "Zawadi Roofing");
    assert_eq!(roofer.balance, Money::new(dec!(250000)));
}

#[test]
fn test_empty_store_gives_zeroed_dashboard() {
    let dashboard = block_on(DashboardService::build(&MemoryStore::new(), date(2025, 1, 1), &ReportingConfig::default())).unwrap();

    assert_eq!(dashboard.stats.cash_balance, Money::zero());
    assert!(dashboard.monthly_spending.is_empty());
    assert!(dashboard.project_budgets.is_empty());
    assert!(dashboard.recent_expenses.is_empty());
    assert_eq!(dashboard.stats.total_subcontractors, 0);
}
