//! Cash ledger logic.
//!
//! This module turns two independent streams of dated money movements (cash
//! received, money spent) into a running-balance statement:
//! - Event and window types
//! - Read-only event source seams and an in-memory store
//! - Opening balance and running balance construction
//! - Error types for ledger operations

pub mod error;
pub mod memory;
pub mod service;
pub mod source;
pub mod statement;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{LedgerError, SourceError};
pub use memory::MemoryStore;
pub use service::LedgerService;
pub use source::{
    ChargeSource, ContractRecord, ContractSource, ContractStatus, LedgerEventSource,
    PaymentRecord, ProjectDirectory, ProjectRecord, ProjectStatus, SubcontractorRecord,
};
pub use statement::{CASH_IN_PREFIX, EXPENSE_PREFIX, StatementBuilder};
pub use types::{
    ChargeEvent, ChargeFilter, CreditEvent, DateRange, DateWindow, DatedAmount, DebitEvent,
    EventQuery, LedgerStatement, LedgerTransaction, ProjectFilter, ReportFilter,
};
