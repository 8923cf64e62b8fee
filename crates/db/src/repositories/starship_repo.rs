//! Repository for the `starships` table.

use sqlx::{PgExecutor, PgPool};
use swapi_core::filter::contains_pattern;
use swapi_core::pagination::PageRequest;
use swapi_core::types::DbId;

use crate::models::starship::{CreateStarship, Starship};

pub(crate) const COLUMNS: &str = "id, name, model, manufacturer, cost_in_credits, length, \
     max_atmosphering_speed, crew, passengers, cargo_capacity, consumables, \
     hyperdrive_rating, mglt, starship_class, created, edited, url, created_at, updated_at";

/// Provides insert and read operations for starships.
pub struct StarshipRepo;

impl StarshipRepo {
    /// Insert a starship unless a row with the same id or url exists.
    pub async fn create<'e, E>(executor: E, input: &CreateStarship) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "INSERT INTO starships
                (id, name, model, manufacturer, cost_in_credits, length,
                 max_atmosphering_speed, crew, passengers, cargo_capacity,
                 consumables, hyperdrive_rating, mglt, starship_class,
                 created, edited, url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
             ON CONFLICT DO NOTHING",
        )
        .bind(input.id)
        .bind(&input.name)
        .bind(&input.model)
        .bind(&input.manufacturer)
        .bind(&input.cost_in_credits)
        .bind(&input.length)
        .bind(&input.max_atmosphering_speed)
        .bind(&input.crew)
        .bind(&input.passengers)
        .bind(&input.cargo_capacity)
        .bind(&input.consumables)
        .bind(&input.hyperdrive_rating)
        .bind(&input.mglt)
        .bind(&input.starship_class)
        .bind(input.created)
        .bind(input.edited)
        .bind(&input.url)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Starship>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM starships WHERE id = $1");
        sqlx::query_as::<_, Starship>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List starships ordered by id, optionally filtered by a
    /// case-insensitive substring of the name.
    pub async fn list(
        pool: &PgPool,
        name: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Starship>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM starships
             WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\\')
             ORDER BY id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Starship>(&query)
            .bind(name.map(contains_pattern))
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, name: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM starships
             WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\\')",
        )
        .bind(name.map(contains_pattern))
        .fetch_one(pool)
        .await
    }
}
