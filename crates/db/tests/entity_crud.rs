//! Integration tests for the repository layer against a real database:
//! - Insert-or-skip semantics
//! - Filtered, paginated listing and counting
//! - Link writes and batched relation loading

use chrono::{NaiveDate, TimeZone, Utc};
use sqlx::PgPool;
use swapi_core::pagination::PageRequest;
use swapi_core::types::Timestamp;
use swapi_db::models::character::CreateCharacter;
use swapi_db::models::film::CreateFilm;
use swapi_db::models::starship::CreateStarship;
use swapi_db::repositories::{AssociationRepo, CharacterRepo, FilmRepo, StarshipRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn upstream_time() -> Timestamp {
    Utc.with_ymd_and_hms(2014, 12, 9, 13, 50, 51).unwrap()
}

fn new_character(id: i64, name: &str) -> CreateCharacter {
    CreateCharacter {
        id,
        name: name.to_string(),
        height: Some("172".to_string()),
        mass: None,
        hair_color: None,
        skin_color: None,
        eye_color: None,
        birth_year: None,
        gender: Some("male".to_string()),
        created: upstream_time(),
        edited: upstream_time(),
        url: format!("https://swapi.info/api/people/{id}"),
    }
}

fn new_film(id: i64, title: &str) -> CreateFilm {
    CreateFilm {
        id,
        title: title.to_string(),
        episode_id: id as i32 + 3,
        opening_crawl: Some("It is a period of civil war.".to_string()),
        director: Some("George Lucas".to_string()),
        producer: None,
        release_date: NaiveDate::from_ymd_opt(1977, 5, 25).unwrap(),
        created: upstream_time(),
        edited: upstream_time(),
        url: format!("https://swapi.info/api/films/{id}"),
    }
}

fn new_starship(id: i64, name: &str) -> CreateStarship {
    CreateStarship {
        id,
        name: name.to_string(),
        model: None,
        manufacturer: None,
        cost_in_credits: Some("unknown".to_string()),
        length: None,
        max_atmosphering_speed: None,
        crew: None,
        passengers: None,
        cargo_capacity: None,
        consumables: None,
        hyperdrive_rating: None,
        mglt: Some("100".to_string()),
        starship_class: None,
        created: upstream_time(),
        edited: upstream_time(),
        url: format!("https://swapi.info/api/starships/{id}"),
    }
}

async fn seed_characters(pool: &PgPool, names: &[(i64, &str)]) {
    for (id, name) in names {
        assert!(CharacterRepo::create(pool, &new_character(*id, name))
            .await
            .unwrap());
    }
}

fn page(offset: i64, limit: i64) -> PageRequest {
    PageRequest { offset, limit }
}

// ---------------------------------------------------------------------------
// Insert-or-skip
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_skips_existing_id(pool: PgPool) {
    let luke = new_character(1, "Luke Skywalker");
    assert!(CharacterRepo::create(&pool, &luke).await.unwrap());

    let renamed = CreateCharacter {
        name: "Someone Else".to_string(),
        ..luke
    };
    assert!(!CharacterRepo::create(&pool, &renamed).await.unwrap());

    let stored = CharacterRepo::find_by_id(&pool, 1).await.unwrap().unwrap();
    assert_eq!(stored.name, "Luke Skywalker");
    assert_eq!(stored.height.as_deref(), Some("172"));
    assert_eq!(stored.created, upstream_time());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_inside_transaction_rolls_back(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    assert!(FilmRepo::create(&mut *tx, &new_film(1, "A New Hope")).await.unwrap());
    tx.rollback().await.unwrap();

    assert!(FilmRepo::find_by_id(&pool, 1).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_id_missing_returns_none(pool: PgPool) {
    assert!(StarshipRepo::find_by_id(&pool, 999).await.unwrap().is_none());

    StarshipRepo::create(&pool, &new_starship(12, "X-wing")).await.unwrap();
    let ship = StarshipRepo::find_by_id(&pool, 12).await.unwrap().unwrap();
    assert_eq!(ship.mglt.as_deref(), Some("100"));
    assert_eq!(ship.cost_in_credits.as_deref(), Some("unknown"));
}

// ---------------------------------------------------------------------------
// Listing and counting
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_orders_by_id_and_pages(pool: PgPool) {
    seed_characters(
        &pool,
        &[(5, "Leia Organa"), (1, "Luke Skywalker"), (3, "R2-D2"), (2, "C-3PO")],
    )
    .await;

    let first = CharacterRepo::list(&pool, None, page(0, 2)).await.unwrap();
    let ids: Vec<i64> = first.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2]);

    let second = CharacterRepo::list(&pool, None, page(2, 2)).await.unwrap();
    let ids: Vec<i64> = second.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![3, 5]);

    let beyond = CharacterRepo::list(&pool, None, page(10, 2)).await.unwrap();
    assert!(beyond.is_empty());
    assert_eq!(CharacterRepo::count(&pool, None).await.unwrap(), 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filter_is_case_insensitive_substring(pool: PgPool) {
    seed_characters(
        &pool,
        &[(1, "Luke Skywalker"), (4, "Darth Vader"), (11, "Anakin Skywalker")],
    )
    .await;

    let found = CharacterRepo::list(&pool, Some("SKYWALKER"), page(0, 10))
        .await
        .unwrap();
    let names: Vec<&str> = found.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Luke Skywalker", "Anakin Skywalker"]);

    let limited = CharacterRepo::list(&pool, Some("skywalker"), page(0, 1))
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(
        CharacterRepo::count(&pool, Some("skywalker")).await.unwrap(),
        2,
        "count ignores paging"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filter_wildcards_match_literally(pool: PgPool) {
    seed_characters(&pool, &[(1, "Luke Skywalker"), (2, "100% Droid"), (3, "R2_D2")]).await;

    assert_eq!(CharacterRepo::count(&pool, Some("%")).await.unwrap(), 1);
    assert_eq!(CharacterRepo::count(&pool, Some("_")).await.unwrap(), 1);
    assert_eq!(CharacterRepo::count(&pool, Some("\\")).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_film_filter_matches_title(pool: PgPool) {
    FilmRepo::create(&pool, &new_film(1, "A New Hope")).await.unwrap();
    FilmRepo::create(&pool, &new_film(2, "The Empire Strikes Back")).await.unwrap();
    FilmRepo::create(&pool, &new_film(3, "Return of the Jedi")).await.unwrap();

    let found = FilmRepo::list(&pool, Some("the"), page(0, 10)).await.unwrap();
    let ids: Vec<i64> = found.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![2, 3]);
    assert_eq!(FilmRepo::count(&pool, Some("hope")).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Associations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_links_are_idempotent(pool: PgPool) {
    seed_characters(&pool, &[(1, "Luke Skywalker"), (2, "C-3PO")]).await;
    FilmRepo::create(&pool, &new_film(1, "A New Hope")).await.unwrap();

    let pairs = [(1, 1), (2, 1)];
    assert_eq!(
        AssociationRepo::link_character_films(&pool, &pairs).await.unwrap(),
        2
    );
    assert_eq!(
        AssociationRepo::link_character_films(&pool, &pairs).await.unwrap(),
        0
    );
    assert_eq!(
        AssociationRepo::link_character_films(&pool, &[]).await.unwrap(),
        0
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_link_to_missing_entity_is_rejected(pool: PgPool) {
    seed_characters(&pool, &[(1, "Luke Skywalker")]).await;

    let result = AssociationRepo::link_character_films(&pool, &[(1, 99)]).await;
    assert!(result.is_err(), "foreign key should reject unknown film");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_relations_load_from_both_sides(pool: PgPool) {
    seed_characters(&pool, &[(1, "Luke Skywalker"), (4, "Darth Vader")]).await;
    FilmRepo::create(&pool, &new_film(1, "A New Hope")).await.unwrap();
    FilmRepo::create(&pool, &new_film(2, "The Empire Strikes Back")).await.unwrap();
    StarshipRepo::create(&pool, &new_starship(12, "X-wing")).await.unwrap();
    StarshipRepo::create(&pool, &new_starship(13, "TIE Advanced x1")).await.unwrap();

    AssociationRepo::link_character_films(&pool, &[(1, 1), (1, 2), (4, 1)])
        .await
        .unwrap();
    AssociationRepo::link_film_starships(&pool, &[(1, 12), (1, 13), (2, 12)])
        .await
        .unwrap();
    AssociationRepo::link_character_starships(&pool, &[(1, 12), (4, 13)])
        .await
        .unwrap();

    let films = AssociationRepo::films_for_characters(&pool, &[1, 4]).await.unwrap();
    let pairs: Vec<(i64, i64)> = films.iter().map(|r| (r.owner_id, r.item.id)).collect();
    assert_eq!(pairs, vec![(1, 1), (1, 2), (4, 1)]);

    let cast = AssociationRepo::characters_for_films(&pool, &[1]).await.unwrap();
    let names: Vec<&str> = cast.iter().map(|r| r.item.name.as_str()).collect();
    assert_eq!(names, vec!["Luke Skywalker", "Darth Vader"]);

    let ships = AssociationRepo::starships_for_films(&pool, &[2]).await.unwrap();
    assert_eq!(ships.len(), 1);
    assert_eq!(ships[0].item.name, "X-wing");

    let pilots = AssociationRepo::pilots_for_starships(&pool, &[12, 13]).await.unwrap();
    let pairs: Vec<(i64, i64)> = pilots.iter().map(|r| (r.owner_id, r.item.id)).collect();
    assert_eq!(pairs, vec![(12, 1), (13, 4)]);

    let flown = AssociationRepo::starships_for_characters(&pool, &[4]).await.unwrap();
    assert_eq!(flown[0].item.id, 13);

    let appearances = AssociationRepo::films_for_starships(&pool, &[12]).await.unwrap();
    assert_eq!(appearances.len(), 2);

    let none = AssociationRepo::films_for_characters(&pool, &[]).await.unwrap();
    assert!(none.is_empty());
}
