//! `SeaORM` entity definitions.

pub mod cash_inflows;
pub mod charge_categories;
pub mod contracts;
pub mod financial_charges;
pub mod materials;
pub mod payments;
pub mod projects;
pub mod sea_orm_active_enums;
pub mod subcontractors;
