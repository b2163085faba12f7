//! Event source implementations over the PostgreSQL tables.
//!
//! [`SeaOrmStore`] implements the read-only seams the core engine queries.
//! Event listings are ordered by `(date, created_at, id)` so same-day rows
//! come back in a stable order; charges come back newest first.

mod charges;
mod contracts;
mod events;
mod projects;

use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryTrait, Select};
use sitebook_core::ledger::DateRange;

/// Read-only store backed by a `SeaORM` connection.
#[derive(Debug, Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    /// Creates a new store.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Restricts `select` to rows whose `column` falls in `range`.
pub(crate) fn filter_dates<E, C>(select: Select<E>, column: C, range: DateRange) -> Select<E>
where
    E: EntityTrait,
    C: ColumnTrait,
{
    match range {
        DateRange::Within(window) => select
            .apply_if(window.from, |query, from: NaiveDate| query.filter(column.gte(from)))
            .apply_if(window.to, |query, to: NaiveDate| query.filter(column.lte(to))),
        DateRange::Before(cutoff) => select.filter(column.lt(cutoff)),
    }
}
