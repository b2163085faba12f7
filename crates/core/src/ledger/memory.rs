//! In-memory implementation of the event source seams.
//!
//! Used by tests and by applications that already hold the records in memory.
//! Rows are returned ordered by date, ties in insertion order.

use async_trait::async_trait;
use sitebook_shared::types::ProjectId;

use super::error::SourceError;
use super::source::{
    ChargeSource, ContractRecord, ContractSource, LedgerEventSource, ProjectDirectory,
    ProjectRecord, SubcontractorRecord,
};
use super::types::{
    ChargeEvent, ChargeFilter, CreditEvent, DateWindow, DatedAmount, DebitEvent, EventQuery,
    ProjectFilter,
};

/// Vector-backed store for projects, cash movements, contracts and charges.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    projects: Vec<ProjectRecord>,
    credits: Vec<(ProjectId, CreditEvent)>,
    debits: Vec<(ProjectId, DebitEvent)>,
    subcontractors: Vec<SubcontractorRecord>,
    contracts: Vec<ContractRecord>,
    charges: Vec<ChargeEvent>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a project.
    pub fn add_project(&mut self, project: ProjectRecord) -> &mut Self {
        self.projects.push(project);
        self
    }

    /// Records cash received for a project.
    pub fn record_credit(&mut self, project: ProjectId, event: CreditEvent) -> &mut Self {
        self.credits.push((project, event));
        self
    }

    /// Records an expense for a project.
    pub fn record_debit(&mut self, project: ProjectId, event: DebitEvent) -> &mut Self {
        self.debits.push((project, event));
        self
    }

    /// Registers a subcontractor. A second record with the same ID is ignored.
    pub fn add_subcontractor(&mut self, subcontractor: SubcontractorRecord) -> &mut Self {
        if !self.subcontractors.iter().any(|known| known.id == subcontractor.id) {
            self.subcontractors.push(subcontractor);
        }
        self
    }

    /// Registers a contract with all of its payments, and its subcontractor
    /// if not yet known.
    pub fn add_contract(&mut self, contract: ContractRecord) -> &mut Self {
        self.add_subcontractor(SubcontractorRecord {
            id: contract.subcontractor_id,
            name: contract.subcontractor_name.clone(),
        });
        self.contracts.push(contract);
        self
    }

    /// Records a financial charge.
    pub fn record_charge(&mut self, charge: ChargeEvent) -> &mut Self {
        self.charges.push(charge);
        self
    }
}

fn select<E: DatedAmount + Clone>(rows: &[(ProjectId, E)], query: &EventQuery) -> Vec<E> {
    let mut selected: Vec<E> = rows
        .iter()
        .filter(|(project, event)| {
            query.project.is_none_or(|id| id == *project) && query.range.contains(event.date())
        })
        .map(|(_, event)| event.clone())
        .collect();
    selected.sort_by_key(|event| event.date());
    selected
}

#[async_trait]
impl LedgerEventSource for MemoryStore {
    async fn list_credits(&self, query: &EventQuery) -> Result<Vec<CreditEvent>, SourceError> {
        Ok(select(&self.credits, query))
    }

    async fn list_debits(&self, query: &EventQuery) -> Result<Vec<DebitEvent>, SourceError> {
        Ok(select(&self.debits, query))
    }
}

#[async_trait]
impl ProjectDirectory for MemoryStore {
    async fn project_name(&self, id: ProjectId) -> Result<Option<String>, SourceError> {
        Ok(self
            .projects
            .iter()
            .find(|project| project.id == id)
            .map(|project| project.name.clone()))
    }

    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, SourceError> {
        Ok(self.projects.clone())
    }
}

#[async_trait]
impl ContractSource for MemoryStore {
    async fn list_subcontractors(&self) -> Result<Vec<SubcontractorRecord>, SourceError> {
        Ok(self.subcontractors.clone())
    }

    async fn list_contracts(
        &self,
        project: ProjectFilter,
        window: DateWindow,
    ) -> Result<Vec<ContractRecord>, SourceError> {
        Ok(self
            .contracts
            .iter()
            .filter(|contract| project.is_none_or(|id| id == contract.project_id))
            .map(|contract| {
                let mut contract = contract.clone();
                contract.payments.retain(|payment| window.contains(payment.date));
                contract.payments.sort_by_key(|payment| payment.date);
                contract
            })
            .collect())
    }
}

#[async_trait]
impl ChargeSource for MemoryStore {
    async fn list_charges(&self, filter: &ChargeFilter) -> Result<Vec<ChargeEvent>, SourceError> {
        let mut charges: Vec<ChargeEvent> = self
            .charges
            .iter()
            .filter(|charge| filter.matches(charge))
            .cloned()
            .collect();
        charges.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(charges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::source::{ContractStatus, PaymentRecord, ProjectStatus};
    use chrono::NaiveDate;
    use futures::executor::block_on;
    use sitebook_shared::types::{ContractId, Money, SubcontractorId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_credits_are_scoped_by_project_and_sorted_by_date() {
        let site_a = ProjectId::new();
        let site_b = ProjectId::new();
        let mut store = MemoryStore::new();
        store
            .record_credit(site_a, CreditEvent::new(date(2025, 1, 20), "Second draw", Money::from_minor(200)))
            .record_credit(site_b, CreditEvent::new(date(2025, 1, 5), "Other site", Money::from_minor(999)))
            .record_credit(site_a, CreditEvent::new(date(2025, 1, 5), "First draw", Money::from_minor(100)));

        let rows = block_on(store.list_credits(&EventQuery::within(Some(site_a), DateWindow::unbounded()))).unwrap();
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["First draw", "Second draw"]);

        let all = block_on(store.list_credits(&EventQuery::within(None, DateWindow::unbounded()))).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_same_day_rows_keep_insertion_order() {
        let site = ProjectId::new();
        let mut store = MemoryStore::new();
        for label in ["a", "b", "c"] {
            store.record_debit(site, DebitEvent::new(date(2025, 1, 5), label, Money::from_minor(1), "other"));
        }

        let rows = block_on(store.list_debits(&EventQuery::within(None, DateWindow::unbounded()))).unwrap();
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unknown_project_yields_empty_rows() {
        let mut store = MemoryStore::new();
        store.record_debit(ProjectId::new(), DebitEvent::new(date(2025, 1, 5), "Cement", Money::from_minor(1), "cement"));

        let rows = block_on(store.list_debits(&EventQuery::within(Some(ProjectId::new()), DateWindow::unbounded()))).unwrap();
        assert!(rows.is_empty());
        assert_eq!(block_on(store.project_name(ProjectId::new())).unwrap(), None);
    }

    #[test]
    fn test_contract_payments_are_filtered_by_window() {
        let site = ProjectId::new();
        let mut store = MemoryStore::new();
        store
            .add_project(ProjectRecord {
                id: site,
                name: "Mbezi House".into(),
                budget: Money::from_minor(0),
                status: ProjectStatus::Active,
            })
            .add_contract(ContractRecord {
                id: ContractId::new(),
                project_id: site,
                subcontractor_id: SubcontractorId::new(),
                subcontractor_name: "Juma Roofing".into(),
                description: "Roof".into(),
                billed_amount: Money::from_minor(100_000),
                status: ContractStatus::InProgress,
                payments: vec![
                    PaymentRecord { date: date(2025, 2, 1), amount: Money::from_minor(30_000) },
                    PaymentRecord { date: date(2025, 1, 1), amount: Money::from_minor(20_000) },
                ],
            });

        let contracts = block_on(store.list_contracts(Some(site), DateWindow::since(date(2025, 1, 15)))).unwrap();
        assert_eq!(contracts.len(), 1);
        assert_eq!(contracts[0].payments.len(), 1);
        assert_eq!(contracts[0].payments[0].amount, Money::from_minor(30_000));
        assert_eq!(block_on(store.project_name(site)).unwrap().as_deref(), Some("Mbezi House"));
    }

    #[test]
    fn test_contracts_register_their_subcontractor_once() {
        let site = ProjectId::new();
        let roofer = SubcontractorId::new();
        let contract = |description: &str| ContractRecord {
            id: ContractId::new(),
            project_id: site,
            subcontractor_id: roofer,
            subcontractor_name: "Juma Roofing".into(),
            description: description.into(),
            billed_amount: Money::from_minor(100_000),
            status: ContractStatus::Pending,
            payments: Vec::new(),
        };
        let mut store = MemoryStore::new();
        store
            .add_subcontractor(SubcontractorRecord { id: SubcontractorId::new(), name: "Idle Fundi".into() })
            .add_contract(contract("Roof"))
            .add_contract(contract("Gutters"));

        let names: Vec<String> = block_on(store.list_subcontractors())
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Idle Fundi", "Juma Roofing"]);
    }

    #[test]
    fn test_charges_filtered_and_newest_first() {
        let site = ProjectId::new();
        let mut store = MemoryStore::new();
        store
            .record_charge(ChargeEvent::new(site, date(2025, 1, 3), "Permit", Money::from_minor(500), "Permits"))
            .record_charge(ChargeEvent::new(site, date(2025, 1, 9), "Bank fee", Money::from_minor(20), "Bank"))
            .record_charge(ChargeEvent::new(site, date(2025, 2, 1), "Renewal", Money::from_minor(300), "Permits"))
            .record_charge(ChargeEvent::new(ProjectId::new(), date(2025, 1, 5), "Other", Money::from_minor(1), "Permits"));

        let filter = ChargeFilter::new(Some(site), Some("Permits".into()), DateWindow::unbounded());
        let labels: Vec<String> = block_on(store.list_charges(&filter))
            .unwrap()
            .into_iter()
            .map(|c| c.label)
            .collect();
        assert_eq!(labels, vec!["Renewal", "Permit"]);

        let january = ChargeFilter::new(None, None, DateWindow::between(date(2025, 1, 1), date(2025, 1, 31)));
        assert_eq!(block_on(store.list_charges(&january)).unwrap().len(), 3);
    }
}
