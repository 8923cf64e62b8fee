//! Film entity model and DTOs.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use swapi_core::types::{DbId, Timestamp};

/// A film row from the `films` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Film {
    pub id: DbId,
    pub title: String,
    pub episode_id: i32,
    pub opening_crawl: Option<String>,
    pub director: Option<String>,
    pub producer: Option<String>,
    pub release_date: NaiveDate,
    pub created: Timestamp,
    pub edited: Timestamp,
    pub url: String,
    #[serde(skip_serializing)]
    pub created_at: Timestamp,
    #[serde(skip_serializing)]
    pub updated_at: Timestamp,
}

/// DTO for inserting a film.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateFilm {
    pub id: DbId,
    pub title: String,
    pub episode_id: i32,
    pub opening_crawl: Option<String>,
    pub director: Option<String>,
    pub producer: Option<String>,
    pub release_date: NaiveDate,
    pub created: Timestamp,
    pub edited: Timestamp,
    pub url: String,
}
