//! The population job: fetch every collection, map, persist, link.
//!
//! Fetching happens before any write, so an unreachable upstream leaves the
//! store untouched. All writes share one transaction: a database error rolls
//! back the whole job. Items that fail mapping are counted and skipped.
//! Inserts are insert-or-skip, so running the job again only adds what is
//! missing.

use serde::Serialize;
use sqlx::PgPool;
use swapi_db::repositories::{AssociationRepo, CharacterRepo, FilmRepo, StarshipRepo};

use crate::client::{ClientError, SwapiClient};
use crate::mapping::{self, Links, MappingError};

const FILMS: &str = "films";
const PEOPLE: &str = "people";
const STARSHIPS: &str = "starships";

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Per-entity outcome of a population run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntitySummary {
    /// Items returned by upstream.
    pub fetched: usize,
    /// Rows newly written.
    pub inserted: usize,
    /// Rows already present locally.
    pub skipped: usize,
    /// Items that could not be mapped.
    pub failed: usize,
}

/// Association rows newly written, per join table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssociationSummary {
    pub character_films: u64,
    pub film_starships: u64,
    pub character_starships: u64,
    pub unresolved: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopulateSummary {
    pub message: String,
    pub characters: EntitySummary,
    pub films: EntitySummary,
    pub starships: EntitySummary,
    pub associations: AssociationSummary,
}

impl Default for PopulateSummary {
    fn default() -> Self {
        Self {
            message: "Operation successful".to_string(),
            characters: EntitySummary::default(),
            films: EntitySummary::default(),
            starships: EntitySummary::default(),
            associations: AssociationSummary::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PopulateError {
    /// A collection could not be fetched; nothing was written.
    #[error("Failed to fetch {resource} from upstream: {source}")]
    Upstream {
        resource: &'static str,
        #[source]
        source: ClientError,
    },

    /// A write failed; the transaction was rolled back.
    #[error("Database error during population: {0}")]
    Database(#[from] sqlx::Error),
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Runs the population job against one upstream client.
pub struct PopulateService<'a> {
    client: &'a SwapiClient,
}

impl<'a> PopulateService<'a> {
    pub fn new(client: &'a SwapiClient) -> Self {
        Self { client }
    }

    pub async fn run(&self, pool: &PgPool) -> Result<PopulateSummary, PopulateError> {
        tracing::info!(base_url = %self.client.config().base_url, "Starting database population");

        let (films_raw, people_raw, starships_raw) = tokio::try_join!(
            self.fetch(FILMS),
            self.fetch(PEOPLE),
            self.fetch(STARSHIPS),
        )?;
        tracing::info!(
            films = films_raw.len(),
            people = people_raw.len(),
            starships = starships_raw.len(),
            "Fetched upstream collections"
        );

        let mut summary = PopulateSummary::default();
        let films = map_all(FILMS, films_raw, &mut summary.films, mapping::map_film);
        let characters = map_all(PEOPLE, people_raw, &mut summary.characters, mapping::map_character);
        let starships = map_all(STARSHIPS, starships_raw, &mut summary.starships, mapping::map_starship);

        let links = Links::resolve(&films, &characters, &starships);

        let mut tx = pool.begin().await?;

        for film in &films {
            let inserted = FilmRepo::create(&mut *tx, &film.row).await?;
            record(&mut summary.films, inserted);
        }
        log_persisted(FILMS, &summary.films);
        for character in &characters {
            let inserted = CharacterRepo::create(&mut *tx, &character.row).await?;
            record(&mut summary.characters, inserted);
        }
        log_persisted(PEOPLE, &summary.characters);
        for starship in &starships {
            let inserted = StarshipRepo::create(&mut *tx, &starship.row).await?;
            record(&mut summary.starships, inserted);
        }
        log_persisted(STARSHIPS, &summary.starships);

        let character_films: Vec<_> = links.character_films.iter().copied().collect();
        let film_starships: Vec<_> = links.film_starships.iter().copied().collect();
        let character_starships: Vec<_> = links.character_starships.iter().copied().collect();

        summary.associations = AssociationSummary {
            character_films: AssociationRepo::link_character_films(&mut *tx, &character_films)
                .await?,
            film_starships: AssociationRepo::link_film_starships(&mut *tx, &film_starships)
                .await?,
            character_starships: AssociationRepo::link_character_starships(
                &mut *tx,
                &character_starships,
            )
            .await?,
            unresolved: links.unresolved,
        };

        tx.commit().await?;

        tracing::info!(
            films = ?summary.films,
            characters = ?summary.characters,
            starships = ?summary.starships,
            associations = ?summary.associations,
            "Database population complete"
        );

        Ok(summary)
    }

    async fn fetch(&self, resource: &'static str) -> Result<Vec<serde_json::Value>, PopulateError> {
        self.client
            .fetch_all(resource)
            .await
            .map_err(|source| PopulateError::Upstream { resource, source })
    }
}

/// Map every raw item, counting and logging the ones that fail.
fn map_all<T>(
    resource: &str,
    raw: Vec<serde_json::Value>,
    summary: &mut EntitySummary,
    map: impl Fn(serde_json::Value) -> Result<T, MappingError>,
) -> Vec<T> {
    summary.fetched = raw.len();

    let mut mapped = Vec::with_capacity(raw.len());
    for value in raw {
        let url = value
            .get("url")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("<missing url>")
            .to_string();
        match map(value) {
            Ok(item) => mapped.push(item),
            Err(e) => {
                summary.failed += 1;
                tracing::warn!(resource, url, error = %e, "Skipping upstream item that failed mapping");
            }
        }
    }
    mapped
}

fn log_persisted(resource: &str, summary: &EntitySummary) {
    tracing::info!(
        resource,
        inserted = summary.inserted,
        skipped = summary.skipped,
        failed = summary.failed,
        "Persisted collection"
    );
}

fn record(summary: &mut EntitySummary, inserted: bool) {
    if inserted {
        summary.inserted += 1;
    } else {
        summary.skipped += 1;
    }
}
