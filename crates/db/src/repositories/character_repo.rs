//! Repository for the `characters` table.

use sqlx::{PgExecutor, PgPool};
use swapi_core::filter::contains_pattern;
use swapi_core::pagination::PageRequest;
use swapi_core::types::DbId;

use crate::models::character::{Character, CreateCharacter};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, name, height, mass, hair_color, skin_color, eye_color, \
     birth_year, gender, created, edited, url, created_at, updated_at";

/// Provides insert and read operations for characters.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a character unless a row with the same id or url exists.
    ///
    /// Returns `true` if a row was inserted, `false` if it was skipped.
    pub async fn create<'e, E>(executor: E, input: &CreateCharacter) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "INSERT INTO characters
                (id, name, height, mass, hair_color, skin_color, eye_color,
                 birth_year, gender, created, edited, url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             ON CONFLICT DO NOTHING",
        )
        .bind(input.id)
        .bind(&input.name)
        .bind(&input.height)
        .bind(&input.mass)
        .bind(&input.hair_color)
        .bind(&input.skin_color)
        .bind(&input.eye_color)
        .bind(&input.birth_year)
        .bind(&input.gender)
        .bind(input.created)
        .bind(input.edited)
        .bind(&input.url)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find a character by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List characters ordered by id, optionally filtered by a
    /// case-insensitive substring of the name.
    pub async fn list(
        pool: &PgPool,
        name: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\\')
             ORDER BY id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(name.map(contains_pattern))
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Count characters matching the same filter as [`Self::list`].
    pub async fn count(pool: &PgPool, name: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM characters
             WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\\')",
        )
        .bind(name.map(contains_pattern))
        .fetch_one(pool)
        .await
    }
}
