//! Rows read through the many-to-many join tables.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use swapi_core::types::DbId;

/// An entity row tagged with the id of the entity it is linked to.
///
/// Queries select the join table's owner column as `owner_id` next to the
/// related entity's columns.
#[derive(Debug, Clone)]
pub struct Related<T> {
    pub owner_id: DbId,
    pub item: T,
}

impl<'r, T> FromRow<'r, PgRow> for Related<T>
where
    T: FromRow<'r, PgRow>,
{
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            owner_id: row.try_get("owner_id")?,
            item: T::from_row(row)?,
        })
    }
}
