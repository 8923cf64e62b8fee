use serde::Serialize;
use sqlx::PgPool;
use swapi_core::error::CoreError;
use swapi_core::pagination::{Page, PageRequest};
use swapi_core::text;
use swapi_core::types::DbId;
use swapi_db::models::character::Character;
use swapi_db::models::film::Film;
use swapi_db::models::starship::Starship;
use swapi_db::repositories::{AssociationRepo, FilmRepo};

use super::group_by_owner;
use crate::error::{AppError, AppResult};

/// A film with its cast and the starships seen in it.
///
/// `opening_crawl` is returned in full with line breaks collapsed.
#[derive(Debug, Serialize)]
pub struct FilmResponse {
    #[serde(flatten)]
    pub film: Film,
    pub characters: Vec<Character>,
    pub starships: Vec<Starship>,
}

pub struct FilmService;

impl FilmService {
    pub async fn list(
        pool: &PgPool,
        title: Option<&str>,
        page: PageRequest,
    ) -> AppResult<Page<FilmResponse>> {
        let total = FilmRepo::count(pool, title).await?;
        let films = FilmRepo::list(pool, title, page).await?;
        let items = Self::with_relations(pool, films).await?;
        Ok(Page::new(items, total, page))
    }

    pub async fn get(pool: &PgPool, id: DbId) -> AppResult<FilmResponse> {
        let film = FilmRepo::find_by_id(pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: "Film", id }))?;
        let mut items = Self::with_relations(pool, vec![film]).await?;
        items
            .pop()
            .ok_or(AppError::Core(CoreError::NotFound { entity: "Film", id }))
    }

    async fn with_relations(pool: &PgPool, films: Vec<Film>) -> AppResult<Vec<FilmResponse>> {
        let ids: Vec<DbId> = films.iter().map(|f| f.id).collect();
        let (characters, starships) = tokio::try_join!(
            AssociationRepo::characters_for_films(pool, &ids),
            AssociationRepo::starships_for_films(pool, &ids),
        )?;
        let mut characters = group_by_owner(characters);
        let mut starships = group_by_owner(starships);

        Ok(films
            .into_iter()
            .map(|film| FilmResponse {
                characters: characters.remove(&film.id).unwrap_or_default(),
                starships: starships.remove(&film.id).unwrap_or_default(),
                film: Film {
                    opening_crawl: film.opening_crawl.as_deref().map(text::clean_crawl),
                    ..film
                },
            })
            .collect())
    }
}
