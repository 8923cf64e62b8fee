//! Read-side services: load a page or a single entity, then attach its
//! relations with one batched query per relation.

pub mod character;
pub mod film;
pub mod starship;

use std::collections::HashMap;

use swapi_core::text;
use swapi_core::types::DbId;
use swapi_db::models::association::Related;
use swapi_db::models::film::Film;

pub use character::{CharacterResponse, CharacterService};
pub use film::{FilmResponse, FilmService};
pub use starship::{StarshipResponse, StarshipService};

/// Bucket relation rows by owner id, keeping row order within each bucket.
fn group_by_owner<T>(rows: Vec<Related<T>>) -> HashMap<DbId, Vec<T>> {
    let mut grouped: HashMap<DbId, Vec<T>> = HashMap::new();
    for row in rows {
        grouped.entry(row.owner_id).or_default().push(row.item);
    }
    grouped
}

/// A film as shown inside another entity: crawl cleaned and cut short.
fn nested_film(film: Film) -> Film {
    Film {
        opening_crawl: film.opening_crawl.as_deref().map(text::summarize_crawl),
        ..film
    }
}
