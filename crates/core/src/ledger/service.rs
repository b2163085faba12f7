//! Ledger service: fetches events and builds the running-balance statement.

use sitebook_shared::types::Money;
use tracing::debug;

use super::error::LedgerError;
use super::source::LedgerEventSource;
use super::statement::StatementBuilder;
use super::types::{DateWindow, EventQuery, LedgerStatement, ProjectFilter};

/// Ledger service for statement generation.
pub struct LedgerService;

impl LedgerService {
    /// Builds the statement for one project/window selection.
    ///
    /// The window is validated before any source call. With a `from` bound the
    /// opening balance is the net of all events strictly before it; without
    /// one it is zero. An unknown project simply yields no rows.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidWindow` for an inverted window and
    /// `LedgerError::Source` if the event source fails. No partial statement
    /// is returned.
    #[tracing::instrument(skip(source))]
    pub async fn build_statement<S>(
        source: &S,
        window: DateWindow,
        project: ProjectFilter,
    ) -> Result<LedgerStatement, LedgerError>
    where
        S: LedgerEventSource + ?Sized,
    {
        window.validate()?;

        let opening_balance = match window.from {
            Some(from) => {
                let history = EventQuery::before(project, from);
                let credits = source.list_credits(&history).await?;
                let debits = source.list_debits(&history).await?;
                StatementBuilder::opening_balance(&credits, &debits)
            }
            None => Money::zero(),
        };

        let query = EventQuery::within(project, window);
        let credits = source.list_credits(&query).await?;
        let debits = source.list_debits(&query).await?;

        let statement = StatementBuilder::build(opening_balance, &credits, &debits);
        debug!(
            rows = statement.transactions.len(),
            opening = %statement.opening_balance,
            closing = %statement.closing_balance,
            "Built ledger statement"
        );

        Ok(statement)
    }
}
