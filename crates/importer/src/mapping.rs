//! Mapping from upstream payloads to insert DTOs, and resolution of the
//! cross-references between them.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use swapi_core::types::DbId;
use swapi_core::url::extract_id;
use swapi_db::models::character::CreateCharacter;
use swapi_db::models::film::CreateFilm;
use swapi_db::models::starship::CreateStarship;

use crate::schemas::{CharacterInput, FilmInput, StarshipInput};

/// Upstream placeholders meaning "no value".
const MISSING_VALUES: [&str; 3] = ["", "unknown", "n/a"];

/// Why one upstream item could not be imported.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("Unexpected payload shape: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Cannot extract an id from url {0:?}")]
    InvalidUrl(String),

    #[error("Invalid release date {value:?}: {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// A film ready to insert, plus the raw URLs it links to.
#[derive(Debug, Clone)]
pub struct MappedFilm {
    pub row: CreateFilm,
    pub characters: Vec<String>,
    pub starships: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct MappedCharacter {
    pub row: CreateCharacter,
    pub films: Vec<String>,
    pub starships: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct MappedStarship {
    pub row: CreateStarship,
    pub films: Vec<String>,
    pub pilots: Vec<String>,
}

// ---------------------------------------------------------------------------
// Payload -> DTO
// ---------------------------------------------------------------------------

pub fn map_film(value: serde_json::Value) -> Result<MappedFilm, MappingError> {
    let input: FilmInput = serde_json::from_value(value)?;
    let id = id_from_url(&input.url)?;
    let release_date = NaiveDate::parse_from_str(&input.release_date, "%Y-%m-%d").map_err(
        |source| MappingError::InvalidDate {
            value: input.release_date.clone(),
            source,
        },
    )?;

    Ok(MappedFilm {
        row: CreateFilm {
            id,
            title: input.title,
            episode_id: input.episode_id,
            opening_crawl: non_empty(input.opening_crawl),
            director: non_empty(input.director),
            producer: non_empty(input.producer),
            release_date,
            created: input.created,
            edited: input.edited,
            url: input.url,
        },
        characters: input.characters,
        starships: input.starships,
    })
}

/// Physical attributes reported as `unknown` / `n/a` are stored as NULL.
pub fn map_character(value: serde_json::Value) -> Result<MappedCharacter, MappingError> {
    let input: CharacterInput = serde_json::from_value(value)?;
    let id = id_from_url(&input.url)?;

    Ok(MappedCharacter {
        row: CreateCharacter {
            id,
            name: input.name,
            height: known(input.height),
            mass: known(input.mass),
            hair_color: known(input.hair_color),
            skin_color: known(input.skin_color),
            eye_color: known(input.eye_color),
            birth_year: known(input.birth_year),
            gender: known(input.gender),
            created: input.created,
            edited: input.edited,
            url: input.url,
        },
        films: input.films,
        starships: input.starships,
    })
}

/// Starship attributes are stored verbatim; only empty strings become NULL.
pub fn map_starship(value: serde_json::Value) -> Result<MappedStarship, MappingError> {
    let input: StarshipInput = serde_json::from_value(value)?;
    let id = id_from_url(&input.url)?;

    Ok(MappedStarship {
        row: CreateStarship {
            id,
            name: input.name,
            model: non_empty(input.model),
            manufacturer: non_empty(input.manufacturer),
            cost_in_credits: non_empty(input.cost_in_credits),
            length: non_empty(input.length),
            max_atmosphering_speed: non_empty(input.max_atmosphering_speed),
            crew: non_empty(input.crew),
            passengers: non_empty(input.passengers),
            cargo_capacity: non_empty(input.cargo_capacity),
            consumables: non_empty(input.consumables),
            hyperdrive_rating: non_empty(input.hyperdrive_rating),
            mglt: non_empty(input.mglt),
            starship_class: non_empty(input.starship_class),
            created: input.created,
            edited: input.edited,
            url: input.url,
        },
        films: input.films,
        pilots: input.pilots,
    })
}

fn id_from_url(url: &str) -> Result<DbId, MappingError> {
    extract_id(url).ok_or_else(|| MappingError::InvalidUrl(url.to_string()))
}

fn known(value: String) -> Option<String> {
    let trimmed = value.trim();
    if MISSING_VALUES
        .iter()
        .any(|missing| trimmed.eq_ignore_ascii_case(missing))
    {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

// ---------------------------------------------------------------------------
// Cross-references
// ---------------------------------------------------------------------------

/// Association pairs declared by an import batch.
///
/// Each relation is declared on both sides upstream (a film lists its
/// characters and a character lists its films); both sides are merged, so a
/// link survives if either side declares it.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Links {
    /// `(character_id, film_id)`
    pub character_films: BTreeSet<(DbId, DbId)>,
    /// `(film_id, starship_id)`
    pub film_starships: BTreeSet<(DbId, DbId)>,
    /// `(character_id, starship_id)`
    pub character_starships: BTreeSet<(DbId, DbId)>,
    /// References whose URL is malformed or whose target is not in the batch.
    pub unresolved: usize,
}

impl Links {
    pub fn resolve(
        films: &[MappedFilm],
        characters: &[MappedCharacter],
        starships: &[MappedStarship],
    ) -> Self {
        let film_ids: HashSet<DbId> = films.iter().map(|f| f.row.id).collect();
        let character_ids: HashSet<DbId> = characters.iter().map(|c| c.row.id).collect();
        let starship_ids: HashSet<DbId> = starships.iter().map(|s| s.row.id).collect();

        let mut links = Links::default();

        for film in films {
            let film_id = film.row.id;
            for url in &film.characters {
                if let Some(character_id) = links.lookup(url, &character_ids) {
                    links.character_films.insert((character_id, film_id));
                }
            }
            for url in &film.starships {
                if let Some(starship_id) = links.lookup(url, &starship_ids) {
                    links.film_starships.insert((film_id, starship_id));
                }
            }
        }

        for character in characters {
            let character_id = character.row.id;
            for url in &character.films {
                if let Some(film_id) = links.lookup(url, &film_ids) {
                    links.character_films.insert((character_id, film_id));
                }
            }
            for url in &character.starships {
                if let Some(starship_id) = links.lookup(url, &starship_ids) {
                    links.character_starships.insert((character_id, starship_id));
                }
            }
        }

        for starship in starships {
            let starship_id = starship.row.id;
            for url in &starship.films {
                if let Some(film_id) = links.lookup(url, &film_ids) {
                    links.film_starships.insert((film_id, starship_id));
                }
            }
            for url in &starship.pilots {
                if let Some(character_id) = links.lookup(url, &character_ids) {
                    links.character_starships.insert((character_id, starship_id));
                }
            }
        }

        links
    }

    fn lookup(&mut self, url: &str, known_ids: &HashSet<DbId>) -> Option<DbId> {
        match extract_id(url) {
            Some(id) if known_ids.contains(&id) => Some(id),
            _ => {
                tracing::debug!(url, "Unresolved cross-reference");
                self.unresolved += 1;
                None
            }
        }
    }
}
