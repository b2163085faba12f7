//! Export projections of ledger statements and grouped reports.
//!
//! Every export offers a tabular file, a printable document model and a JSON
//! view of one engine output value.

pub mod error;
pub mod reports;
pub mod statement;
pub mod table;


pub use error::ExportError;
pub use reports::{
    BALANCE_LABEL, CASH_FLOW_CSV_HEADER, CashFlowExport, EXPENSES_CSV_HEADER, GRAND_TOTAL_LABEL,
    MonthlyExpenseExport, SUBCONTRACTORS_CSV_HEADER, SubcontractorExport, TOTAL_BILLED_LABEL,
    TOTAL_IN_LABEL, TOTAL_LABEL, TOTAL_OUT_LABEL, TOTAL_PAID_LABEL,
};
pub use statement::{
    CLOSING_LABEL, CSV_HEADER, OPENING_LABEL, PrintableRow, PrintableStatement, StatementExport,
};
pub use table::{PrintableFigure, PrintableTable};
