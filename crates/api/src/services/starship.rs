use serde::Serialize;
use sqlx::PgPool;
use swapi_core::error::CoreError;
use swapi_core::pagination::{Page, PageRequest};
use swapi_core::types::DbId;
use swapi_db::models::character::Character;
use swapi_db::models::film::Film;
use swapi_db::models::starship::Starship;
use swapi_db::repositories::{AssociationRepo, StarshipRepo};

use super::{group_by_owner, nested_film};
use crate::error::{AppError, AppResult};

/// A starship with its pilots and the films it appears in.
#[derive(Debug, Serialize)]
pub struct StarshipResponse {
    #[serde(flatten)]
    pub starship: Starship,
    pub pilots: Vec<Character>,
    pub films: Vec<Film>,
}

pub struct StarshipService;

impl StarshipService {
    pub async fn list(
        pool: &PgPool,
        name: Option<&str>,
        page: PageRequest,
    ) -> AppResult<Page<StarshipResponse>> {
        let total = StarshipRepo::count(pool, name).await?;
        let starships = StarshipRepo::list(pool, name, page).await?;
        let items = Self::with_relations(pool, starships).await?;
        Ok(Page::new(items, total, page))
    }

    pub async fn get(pool: &PgPool, id: DbId) -> AppResult<StarshipResponse> {
        let starship = StarshipRepo::find_by_id(pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Starship",
                id,
            }))?;
        let mut items = Self::with_relations(pool, vec![starship]).await?;
        items.pop().ok_or(AppError::Core(CoreError::NotFound {
            entity: "Starship",
            id,
        }))
    }

    async fn with_relations(
        pool: &PgPool,
        starships: Vec<Starship>,
    ) -> AppResult<Vec<StarshipResponse>> {
        let ids: Vec<DbId> = starships.iter().map(|s| s.id).collect();
        let (pilots, films) = tokio::try_join!(
            AssociationRepo::pilots_for_starships(pool, &ids),
            AssociationRepo::films_for_starships(pool, &ids),
        )?;
        let mut pilots = group_by_owner(pilots);
        let mut films = group_by_owner(films);

        Ok(starships
            .into_iter()
            .map(|starship| StarshipResponse {
                pilots: pilots.remove(&starship.id).unwrap_or_default(),
                films: films
                    .remove(&starship.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(nested_film)
                    .collect(),
                starship,
            })
            .collect())
    }
}
