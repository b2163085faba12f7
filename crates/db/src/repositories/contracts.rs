//! Subcontracts with their payments.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QueryTrait};
use sitebook_core::ledger::{
    ContractRecord, ContractSource, DateRange, DateWindow, PaymentRecord, ProjectFilter,
    SourceError, SubcontractorRecord,
};
use sitebook_shared::types::{ContractId, Money, ProjectId, SubcontractorId};
use tracing::debug;
use uuid::Uuid;

use super::{SeaOrmStore, filter_dates};
use crate::entities::{contracts, payments, subcontractors};

impl From<subcontractors::Model> for SubcontractorRecord {
    fn from(model: subcontractors::Model) -> Self {
        Self {
            id: SubcontractorId::from(model.id),
            name: model.name,
        }
    }
}

#[async_trait]
impl ContractSource for SeaOrmStore {
    async fn list_subcontractors(&self) -> Result<Vec<SubcontractorRecord>, SourceError> {
        let rows = subcontractors::Entity::find()
            .order_by_asc(subcontractors::Column::Name)
            .order_by_asc(subcontractors::Column::Id)
            .all(&self.db)
            .await?;

        debug!(subcontractors = rows.len(), "Listed subcontractors");
        Ok(rows.into_iter().map(SubcontractorRecord::from).collect())
    }

    async fn list_contracts(
        &self,
        project: ProjectFilter,
        window: DateWindow,
    ) -> Result<Vec<ContractRecord>, SourceError> {
        let rows = contracts::Entity::find()
            .find_also_related(subcontractors::Entity)
            .apply_if(project, |select, project| {
                select.filter(contracts::Column::ProjectId.eq(project.into_inner()))
            })
            .order_by_asc(contracts::Column::CreatedAt)
            .order_by_asc(contracts::Column::Id)
            .all(&self.db)
            .await?;

        let ids: Vec<Uuid> = rows.iter().map(|(contract, _)| contract.id).collect();
        let mut paid: HashMap<Uuid, Vec<PaymentRecord>> = HashMap::new();
        if !ids.is_empty() {
            let select = payments::Entity::find().filter(payments::Column::ContractId.is_in(ids));
            let payment_rows = filter_dates(select, payments::Column::Date, DateRange::Within(window))
                .order_by_asc(payments::Column::Date)
                .order_by_asc(payments::Column::CreatedAt)
                .order_by_asc(payments::Column::Id)
                .all(&self.db)
                .await?;
            for payment in payment_rows {
                paid.entry(payment.contract_id).or_default().push(PaymentRecord {
                    date: payment.date,
                    amount: Money::new(payment.amount),
                });
            }
        }

        debug!(contracts = rows.len(), "Listed contracts");
        Ok(rows
            .into_iter()
            .map(|(contract, subcontractor)| ContractRecord {
                id: ContractId::from(contract.id),
                project_id: ProjectId::from(contract.project_id),
                subcontractor_id: SubcontractorId::from(contract.subcontractor_id),
                subcontractor_name: subcontractor.map(|s| s.name).unwrap_or_default(),
                description: contract.description,
                billed_amount: Money::new(contract.billed_amount),
                status: contract.status.into(),
                payments: paid.remove(&contract.id).unwrap_or_default(),
            })
            .collect())
    }
}
