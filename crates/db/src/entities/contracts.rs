//! `SeaORM` Entity for contracts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ContractStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub subcontractor_id: Uuid,
    pub project_id: Uuid,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub billed_amount: Decimal,
    pub status: ContractStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subcontractors::Entity",
        from = "Column::SubcontractorId",
        to = "super::subcontractors::Column::Id"
    )]
    Subcontractors,
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id"
    )]
    Projects,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::subcontractors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subcontractors.def()
    }
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
