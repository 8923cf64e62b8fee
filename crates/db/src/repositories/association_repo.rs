//! Repository for the many-to-many join tables:
//! `character_films`, `film_starships` and `character_starships`.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgExecutor, PgPool};
use swapi_core::types::DbId;

use crate::models::association::Related;
use crate::models::character::Character;
use crate::models::film::Film;
use crate::models::starship::Starship;
use crate::repositories::{character_repo, film_repo, qualify, starship_repo};

/// One side of a join table: the table name, the column holding the owner's
/// id and the column pointing at the related entity.
struct Link {
    table: &'static str,
    owner_column: &'static str,
    related_column: &'static str,
}

const CHARACTER_FILMS: Link = Link {
    table: "character_films",
    owner_column: "character_id",
    related_column: "film_id",
};

const FILM_CHARACTERS: Link = Link {
    table: "character_films",
    owner_column: "film_id",
    related_column: "character_id",
};

const FILM_STARSHIPS: Link = Link {
    table: "film_starships",
    owner_column: "film_id",
    related_column: "starship_id",
};

const STARSHIP_FILMS: Link = Link {
    table: "film_starships",
    owner_column: "starship_id",
    related_column: "film_id",
};

const CHARACTER_STARSHIPS: Link = Link {
    table: "character_starships",
    owner_column: "character_id",
    related_column: "starship_id",
};

const STARSHIP_PILOTS: Link = Link {
    table: "character_starships",
    owner_column: "starship_id",
    related_column: "character_id",
};

/// Provides link writes and batched relation loading.
pub struct AssociationRepo;

impl AssociationRepo {
    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert `(character_id, film_id)` pairs, skipping existing ones.
    ///
    /// Returns the number of newly inserted rows.
    pub async fn link_character_films<'e, E>(
        executor: E,
        pairs: &[(DbId, DbId)],
    ) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        Self::link(executor, &CHARACTER_FILMS, pairs).await
    }

    /// Insert `(film_id, starship_id)` pairs, skipping existing ones.
    pub async fn link_film_starships<'e, E>(
        executor: E,
        pairs: &[(DbId, DbId)],
    ) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        Self::link(executor, &FILM_STARSHIPS, pairs).await
    }

    /// Insert `(character_id, starship_id)` pairs, skipping existing ones.
    pub async fn link_character_starships<'e, E>(
        executor: E,
        pairs: &[(DbId, DbId)],
    ) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        Self::link(executor, &CHARACTER_STARSHIPS, pairs).await
    }

    /// Bulk insert through `UNNEST` so a whole link set costs one round trip.
    async fn link<'e, E>(
        executor: E,
        link: &Link,
        pairs: &[(DbId, DbId)],
    ) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        if pairs.is_empty() {
            return Ok(0);
        }

        let (owners, related): (Vec<DbId>, Vec<DbId>) = pairs.iter().copied().unzip();
        let query = format!(
            "INSERT INTO {table} ({owner}, {related})
             SELECT * FROM UNNEST($1::bigint[], $2::bigint[])
             ON CONFLICT DO NOTHING",
            table = link.table,
            owner = link.owner_column,
            related = link.related_column,
        );
        let result = sqlx::query(&query)
            .bind(owners)
            .bind(related)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Relation loading
    // -----------------------------------------------------------------------

    pub async fn films_for_characters(
        pool: &PgPool,
        character_ids: &[DbId],
    ) -> Result<Vec<Related<Film>>, sqlx::Error> {
        Self::related(pool, &CHARACTER_FILMS, "films", film_repo::COLUMNS, character_ids).await
    }

    pub async fn starships_for_characters(
        pool: &PgPool,
        character_ids: &[DbId],
    ) -> Result<Vec<Related<Starship>>, sqlx::Error> {
        Self::related(
            pool,
            &CHARACTER_STARSHIPS,
            "starships",
            starship_repo::COLUMNS,
            character_ids,
        )
        .await
    }

    pub async fn characters_for_films(
        pool: &PgPool,
        film_ids: &[DbId],
    ) -> Result<Vec<Related<Character>>, sqlx::Error> {
        Self::related(
            pool,
            &FILM_CHARACTERS,
            "characters",
            character_repo::COLUMNS,
            film_ids,
        )
        .await
    }

    pub async fn starships_for_films(
        pool: &PgPool,
        film_ids: &[DbId],
    ) -> Result<Vec<Related<Starship>>, sqlx::Error> {
        Self::related(pool, &FILM_STARSHIPS, "starships", starship_repo::COLUMNS, film_ids).await
    }

    pub async fn pilots_for_starships(
        pool: &PgPool,
        starship_ids: &[DbId],
    ) -> Result<Vec<Related<Character>>, sqlx::Error> {
        Self::related(
            pool,
            &STARSHIP_PILOTS,
            "characters",
            character_repo::COLUMNS,
            starship_ids,
        )
        .await
    }

    pub async fn films_for_starships(
        pool: &PgPool,
        starship_ids: &[DbId],
    ) -> Result<Vec<Related<Film>>, sqlx::Error> {
        Self::related(pool, &STARSHIP_FILMS, "films", film_repo::COLUMNS, starship_ids).await
    }

    /// Load every entity of `entity_table` linked to any of `owner_ids`,
    /// ordered by owner then related id.
    async fn related<T>(
        pool: &PgPool,
        link: &Link,
        entity_table: &str,
        entity_columns: &str,
        owner_ids: &[DbId],
    ) -> Result<Vec<Related<T>>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        if owner_ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT l.{owner} AS owner_id, {columns}
             FROM {table} l
             JOIN {entity_table} e ON e.id = l.{related}
             WHERE l.{owner} = ANY($1)
             ORDER BY l.{owner}, e.id",
            owner = link.owner_column,
            related = link.related_column,
            table = link.table,
            columns = qualify("e", entity_columns),
        );
        sqlx::query_as::<_, Related<T>>(&query)
            .bind(owner_ids)
            .fetch_all(pool)
            .await
    }
}
