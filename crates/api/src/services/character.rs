use serde::Serialize;
use sqlx::PgPool;
use swapi_core::error::CoreError;
use swapi_core::pagination::{Page, PageRequest};
use swapi_core::types::DbId;
use swapi_db::models::character::Character;
use swapi_db::models::film::Film;
use swapi_db::models::starship::Starship;
use swapi_db::repositories::{AssociationRepo, CharacterRepo};

use super::{group_by_owner, nested_film};
use crate::error::{AppError, AppResult};

/// A character with the films it appears in and the starships it flew.
#[derive(Debug, Serialize)]
pub struct CharacterResponse {
    #[serde(flatten)]
    pub character: Character,
    pub films: Vec<Film>,
    pub starships: Vec<Starship>,
}

pub struct CharacterService;

impl CharacterService {
    pub async fn list(
        pool: &PgPool,
        name: Option<&str>,
        page: PageRequest,
    ) -> AppResult<Page<CharacterResponse>> {
        let total = CharacterRepo::count(pool, name).await?;
        let characters = CharacterRepo::list(pool, name, page).await?;
        let items = Self::with_relations(pool, characters).await?;
        Ok(Page::new(items, total, page))
    }

    pub async fn get(pool: &PgPool, id: DbId) -> AppResult<CharacterResponse> {
        let character = CharacterRepo::find_by_id(pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Character",
                id,
            }))?;
        let mut items = Self::with_relations(pool, vec![character]).await?;
        items.pop().ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))
    }

    async fn with_relations(
        pool: &PgPool,
        characters: Vec<Character>,
    ) -> AppResult<Vec<CharacterResponse>> {
        let ids: Vec<DbId> = characters.iter().map(|c| c.id).collect();
        let (films, starships) = tokio::try_join!(
            AssociationRepo::films_for_characters(pool, &ids),
            AssociationRepo::starships_for_characters(pool, &ids),
        )?;
        let mut films = group_by_owner(films);
        let mut starships = group_by_owner(starships);

        Ok(characters
            .into_iter()
            .map(|character| CharacterResponse {
                films: films
                    .remove(&character.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(nested_film)
                    .collect(),
                starships: starships.remove(&character.id).unwrap_or_default(),
                character,
            })
            .collect())
    }
}
