//! Repository for the `films` table.

use sqlx::{PgExecutor, PgPool};
use swapi_core::filter::contains_pattern;
use swapi_core::pagination::PageRequest;
use swapi_core::types::DbId;

use crate::models::film::{CreateFilm, Film};

pub(crate) const COLUMNS: &str = "id, title, episode_id, opening_crawl, director, producer, \
     release_date, created, edited, url, created_at, updated_at";

/// Provides insert and read operations for films.
pub struct FilmRepo;

impl FilmRepo {
    /// Insert a film unless a row with the same id or url exists.
    ///
    /// Returns `true` if a row was inserted.
    pub async fn create<'e, E>(executor: E, input: &CreateFilm) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "INSERT INTO films
                (id, title, episode_id, opening_crawl, director, producer,
                 release_date, created, edited, url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT DO NOTHING",
        )
        .bind(input.id)
        .bind(&input.title)
        .bind(input.episode_id)
        .bind(&input.opening_crawl)
        .bind(&input.director)
        .bind(&input.producer)
        .bind(input.release_date)
        .bind(input.created)
        .bind(input.edited)
        .bind(&input.url)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Film>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films WHERE id = $1");
        sqlx::query_as::<_, Film>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List films ordered by id, optionally filtered by a case-insensitive
    /// substring of the title.
    pub async fn list(
        pool: &PgPool,
        title: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Film>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM films
             WHERE ($1::text IS NULL OR title ILIKE $1 ESCAPE '\\')
             ORDER BY id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Film>(&query)
            .bind(title.map(contains_pattern))
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, title: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM films
             WHERE ($1::text IS NULL OR title ILIKE $1 ESCAPE '\\')",
        )
        .bind(title.map(contains_pattern))
        .fetch_one(pool)
        .await
    }
}
