//! `SeaORM` active enums mirroring the PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use sitebook_core::ledger::{ContractStatus as CoreContractStatus, ProjectStatus as CoreProjectStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "project_status")]
pub enum ProjectStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "on_hold")]
    OnHold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "contract_status")]
pub enum ContractStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl From<ProjectStatus> for CoreProjectStatus {
    fn from(status: ProjectStatus) -> Self {
        match status {
            ProjectStatus::Active => Self::Active,
            ProjectStatus::Completed => Self::Completed,
            ProjectStatus::OnHold => Self::OnHold,
        }
    }
}

impl From<ContractStatus> for CoreContractStatus {
    fn from(status: ContractStatus) -> Self {
        match status {
            ContractStatus::Pending => Self::Pending,
            ContractStatus::InProgress => Self::InProgress,
            ContractStatus::Completed => Self::Completed,
            ContractStatus::Cancelled => Self::Cancelled,
        }
    }
}
