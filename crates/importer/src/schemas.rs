//! Upstream JSON payloads.
//!
//! Only the fields that are persisted or linked are declared; everything
//! else in the payload (planets, species, vehicles, ...) is ignored.

use serde::Deserialize;
use swapi_core::types::Timestamp;

/// A film from the `films` collection.
#[derive(Debug, Clone, Deserialize)]
pub struct FilmInput {
    pub title: String,
    pub episode_id: i32,
    #[serde(default)]
    pub opening_crawl: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub producer: String,
    /// `YYYY-MM-DD`.
    pub release_date: String,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub starships: Vec<String>,
    pub created: Timestamp,
    pub edited: Timestamp,
    pub url: String,
}

/// A character from the `people` collection.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterInput {
    pub name: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub mass: String,
    #[serde(default)]
    pub hair_color: String,
    #[serde(default)]
    pub skin_color: String,
    #[serde(default)]
    pub eye_color: String,
    #[serde(default)]
    pub birth_year: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub starships: Vec<String>,
    pub created: Timestamp,
    pub edited: Timestamp,
    pub url: String,
}

/// A starship from the `starships` collection.
#[derive(Debug, Clone, Deserialize)]
pub struct StarshipInput {
    pub name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub cost_in_credits: String,
    #[serde(default)]
    pub length: String,
    #[serde(default)]
    pub max_atmosphering_speed: String,
    #[serde(default)]
    pub crew: String,
    #[serde(default)]
    pub passengers: String,
    #[serde(default)]
    pub cargo_capacity: String,
    #[serde(default)]
    pub consumables: String,
    #[serde(default)]
    pub hyperdrive_rating: String,
    #[serde(rename = "MGLT", default)]
    pub mglt: String,
    #[serde(default)]
    pub starship_class: String,
    #[serde(default)]
    pub pilots: Vec<String>,
    #[serde(default)]
    pub films: Vec<String>,
    pub created: Timestamp,
    pub edited: Timestamp,
    pub url: String,
}
