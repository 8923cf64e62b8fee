//! Starship entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use swapi_core::types::{DbId, Timestamp};

/// A starship row from the `starships` table.
///
/// Numeric-looking upstream fields (`cost_in_credits`, `length`, ...) are kept
/// as text because the dataset mixes numbers with values like `"unknown"`
/// and `"30-165"`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Starship {
    pub id: DbId,
    pub name: String,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub cost_in_credits: Option<String>,
    pub length: Option<String>,
    pub max_atmosphering_speed: Option<String>,
    pub crew: Option<String>,
    pub passengers: Option<String>,
    pub cargo_capacity: Option<String>,
    pub consumables: Option<String>,
    pub hyperdrive_rating: Option<String>,
    pub mglt: Option<String>,
    pub starship_class: Option<String>,
    pub created: Timestamp,
    pub edited: Timestamp,
    pub url: String,
    #[serde(skip_serializing)]
    pub created_at: Timestamp,
    #[serde(skip_serializing)]
    pub updated_at: Timestamp,
}

/// DTO for inserting a starship.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateStarship {
    pub id: DbId,
    pub name: String,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub cost_in_credits: Option<String>,
    pub length: Option<String>,
    pub max_atmosphering_speed: Option<String>,
    pub crew: Option<String>,
    pub passengers: Option<String>,
    pub cargo_capacity: Option<String>,
    pub consumables: Option<String>,
    pub hyperdrive_rating: Option<String>,
    pub mglt: Option<String>,
    pub starship_class: Option<String>,
    pub created: Timestamp,
    pub edited: Timestamp,
    pub url: String,
}
