//! Financial charges with their category names.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QueryTrait};
use sitebook_core::ledger::{ChargeEvent, ChargeFilter, ChargeSource, DateRange, SourceError};
use sitebook_shared::types::{Money, ProjectId};
use tracing::debug;

use super::{SeaOrmStore, filter_dates};
use crate::entities::{charge_categories, financial_charges};

fn to_event(
    charge: financial_charges::Model,
    category: Option<charge_categories::Model>,
) -> ChargeEvent {
    ChargeEvent::new(
        ProjectId::from(charge.project_id),
        charge.date,
        charge.description,
        Money::new(charge.amount),
        category.map(|category| category.name).unwrap_or_default(),
    )
}

#[async_trait]
impl ChargeSource for SeaOrmStore {
    async fn list_charges(&self, filter: &ChargeFilter) -> Result<Vec<ChargeEvent>, SourceError> {
        let select = financial_charges::Entity::find().apply_if(filter.project, |select, project| {
            select.filter(financial_charges::Column::ProjectId.eq(project.into_inner()))
        });
        let rows = filter_dates(select, financial_charges::Column::Date, DateRange::Within(filter.window))
            .find_also_related(charge_categories::Entity)
            .apply_if(filter.category.clone(), |select, name| {
                select.filter(charge_categories::Column::Name.eq(name))
            })
            .order_by_desc(financial_charges::Column::Date)
            .order_by_desc(financial_charges::Column::CreatedAt)
            .order_by_desc(financial_charges::Column::Id)
            .all(&self.db)
            .await?;

        debug!(rows = rows.len(), "Listed financial charges");
        Ok(rows
            .into_iter()
            .map(|(charge, category)| to_event(charge, category))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn test_charge_row_carries_category_name() {
        let now = Utc::now().fixed_offset();
        let category = charge_categories::Model {
            id: Uuid::now_v7(),
            name: "Permits".into(),
            created_at: now,
            updated_at: now,
        };
        let project_id = Uuid::now_v7();
        let charge = financial_charges::Model {
            id: Uuid::now_v7(),
            project_id,
            charge_category_id: category.id,
            date: NaiveDate::from_ymd_opt(2025, 1, 4).unwrap(),
            amount: dec!(150000),
            description: "Building permit".into(),
            created_at: now,
            updated_at: now,
        };

        let event = to_event(charge, Some(category));
        assert_eq!(event.project_id, ProjectId::from(project_id));
        assert_eq!(event.label, "Building permit");
        assert_eq!(event.amount, Money::new(dec!(150000)));
        assert_eq!(event.category, "Permits");
    }
}
