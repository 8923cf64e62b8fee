//! Character entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use swapi_core::types::{DbId, Timestamp};

/// A character row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub name: String,
    pub height: Option<String>,
    pub mass: Option<String>,
    pub hair_color: Option<String>,
    pub skin_color: Option<String>,
    pub eye_color: Option<String>,
    pub birth_year: Option<String>,
    pub gender: Option<String>,
    /// Upstream creation time.
    pub created: Timestamp,
    /// Upstream last-edit time.
    pub edited: Timestamp,
    pub url: String,
    #[serde(skip_serializing)]
    pub created_at: Timestamp,
    #[serde(skip_serializing)]
    pub updated_at: Timestamp,
}

/// DTO for inserting a character. The id comes from the upstream URL.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCharacter {
    pub id: DbId,
    pub name: String,
    pub height: Option<String>,
    pub mass: Option<String>,
    pub hair_color: Option<String>,
    pub skin_color: Option<String>,
    pub eye_color: Option<String>,
    pub birth_year: Option<String>,
    pub gender: Option<String>,
    pub created: Timestamp,
    pub edited: Timestamp,
    pub url: String,
}
