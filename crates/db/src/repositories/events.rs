//! Cash inflows and expense lines as ledger events.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QueryTrait};
use sitebook_core::ledger::{CreditEvent, DebitEvent, EventQuery, LedgerEventSource, SourceError};
use sitebook_shared::types::Money;
use tracing::debug;

use super::{SeaOrmStore, filter_dates};
use crate::entities::{cash_inflows, materials};

impl From<cash_inflows::Model> for CreditEvent {
    fn from(model: cash_inflows::Model) -> Self {
        Self::new(model.date, model.source, Money::new(model.amount))
    }
}

impl From<materials::Model> for DebitEvent {
    fn from(model: materials::Model) -> Self {
        Self::new(
            model.date,
            model.description,
            Money::new(model.subtotal),
            model.category,
        )
    }
}

#[async_trait]
impl LedgerEventSource for SeaOrmStore {
    async fn list_credits(&self, query: &EventQuery) -> Result<Vec<CreditEvent>, SourceError> {
        let select = cash_inflows::Entity::find().apply_if(query.project, |select, project| {
            select.filter(cash_inflows::Column::ProjectId.eq(project.into_inner()))
        });
        let rows = filter_dates(select, cash_inflows::Column::Date, query.range)
            .order_by_asc(cash_inflows::Column::Date)
            .order_by_asc(cash_inflows::Column::CreatedAt)
            .order_by_asc(cash_inflows::Column::Id)
            .all(&self.db)
            .await?;

        debug!(rows = rows.len(), "Listed cash inflows");
        Ok(rows.into_iter().map(CreditEvent::from).collect())
    }

    async fn list_debits(&self, query: &EventQuery) -> Result<Vec<DebitEvent>, SourceError> {
        let select = materials::Entity::find().apply_if(query.project, |select, project| {
            select.filter(materials::Column::ProjectId.eq(project.into_inner()))
        });
        let rows = filter_dates(select, materials::Column::Date, query.range)
            .order_by_asc(materials::Column::Date)
            .order_by_asc(materials::Column::CreatedAt)
            .order_by_asc(materials::Column::Id)
            .all(&self.db)
            .await?;

        debug!(rows = rows.len(), "Listed expense lines");
        Ok(rows.into_iter().map(DebitEvent::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn test_material_row_becomes_debit_with_subtotal() {
        let now = Utc::now().fixed_offset();
        let row = materials::Model {
            id: Uuid::now_v7(),
            project_id: Uuid::now_v7(),
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            description: "Cement 20 bags".into(),
            quantity: dec!(20),
            unit: Some("bag".into()),
            unit_price: dec!(20000),
            subtotal: dec!(400000),
            category: "cement".into(),
            created_at: now,
            updated_at: now,
        };

        let event = DebitEvent::from(row);
        assert_eq!(event.label, "Cement 20 bags");
        assert_eq!(event.amount, Money::new(dec!(400000)));
        assert_eq!(event.category, "cement");
    }

    #[test]
    fn test_inflow_row_becomes_credit_labelled_by_source() {
        let now = Utc::now().fixed_offset();
        let row = cash_inflows::Model {
            id: Uuid::now_v7(),
            project_id: Uuid::now_v7(),
            date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            source: "Client advance".into(),
            amount: dec!(1000000.5),
            notes: None,
            created_at: now,
            updated_at: now,
        };

        let event = CreditEvent::from(row);
        assert_eq!(event.label, "Client advance");
        assert_eq!(event.amount.to_string(), "1000000.50");
    }
}
