#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::{Json, Router};
use chrono::{NaiveDate, TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use swapi_api::config::{Environment, ServerConfig};
use swapi_api::router::build_app_router;
use swapi_api::state::AppState;
use swapi_core::types::Timestamp;
use swapi_db::models::character::CreateCharacter;
use swapi_db::models::film::CreateFilm;
use swapi_db::models::starship::CreateStarship;
use swapi_db::repositories::{AssociationRepo, CharacterRepo, FilmRepo, StarshipRepo};
use swapi_importer::{ClientConfig, SwapiClient};

pub const UPSTREAM: &str = "https://swapi.info/api";

/// A crawl long enough to be truncated when nested.
pub const LONG_CRAWL: &str = "It is a period of civil war.\r\nRebel spaceships, striking\r\nfrom a hidden base, have won\r\ntheir first victory against\r\nthe evil Galactic Empire.\r\n\r\nDuring the battle, Rebel\r\nspies managed to steal secret\r\nplans to the Empire's\r\nultimate weapon.";

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
///
/// The upstream points at a closed port and is not checked by `/health`.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        environment: Environment::Testing,
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        database_url: String::new(),
        db_max_connections: 5,
        swapi: fast_client_config("http://127.0.0.1:1/api".to_string()),
        health_check_upstream: false,
    }
}

pub fn fast_client_config(base_url: String) -> ClientConfig {
    ClientConfig {
        base_url,
        timeout: Duration::from_secs(5),
        max_retries: 1,
        retry_base: Duration::from_millis(10),
    }
}

/// Build the full application router, using the same middleware stack as
/// production.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let swapi = SwapiClient::new(config.swapi.clone()).unwrap();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        swapi,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Database seeding
// ---------------------------------------------------------------------------

fn upstream_time() -> Timestamp {
    Utc.with_ymd_and_hms(2014, 12, 10, 14, 23, 31).unwrap()
}

fn character(id: i64, name: &str) -> CreateCharacter {
    CreateCharacter {
        id,
        name: name.to_string(),
        height: Some("172".to_string()),
        mass: Some("77".to_string()),
        hair_color: None,
        skin_color: None,
        eye_color: None,
        birth_year: Some("19BBY".to_string()),
        gender: Some("male".to_string()),
        created: upstream_time(),
        edited: upstream_time(),
        url: format!("{UPSTREAM}/people/{id}"),
    }
}

fn film(id: i64, title: &str, crawl: &str) -> CreateFilm {
    CreateFilm {
        id,
        title: title.to_string(),
        episode_id: id as i32 + 3,
        opening_crawl: Some(crawl.to_string()),
        director: Some("George Lucas".to_string()),
        producer: Some("Gary Kurtz, Rick McCallum".to_string()),
        release_date: NaiveDate::from_ymd_opt(1977, 5, 25).unwrap(),
        created: upstream_time(),
        edited: upstream_time(),
        url: format!("{UPSTREAM}/films/{id}"),
    }
}

fn starship(id: i64, name: &str) -> CreateStarship {
    CreateStarship {
        id,
        name: name.to_string(),
        model: None,
        manufacturer: None,
        cost_in_credits: Some("149999".to_string()),
        length: None,
        max_atmosphering_speed: None,
        crew: Some("1".to_string()),
        passengers: None,
        cargo_capacity: None,
        consumables: None,
        hyperdrive_rating: None,
        mglt: Some("100".to_string()),
        starship_class: Some("Starfighter".to_string()),
        created: upstream_time(),
        edited: upstream_time(),
        url: format!("{UPSTREAM}/starships/{id}"),
    }
}

/// Seed a small linked dataset.
///
/// Characters: 1 Luke Skywalker, 2 C-3PO, 4 Darth Vader, 11 Anakin Skywalker,
/// 33 Luke Lookalike. Films: 1 A New Hope, 2 The Empire Strikes Back.
/// Starships: 12 X-wing, 13 TIE Advanced x1.
pub async fn seed(pool: &PgPool) {
    for (id, name) in [
        (1, "Luke Skywalker"),
        (2, "C-3PO"),
        (4, "Darth Vader"),
        (11, "Anakin Skywalker"),
        (33, "Luke Lookalike"),
    ] {
        CharacterRepo::create(pool, &character(id, name)).await.unwrap();
    }
    FilmRepo::create(pool, &film(1, "A New Hope", LONG_CRAWL))
        .await
        .unwrap();
    FilmRepo::create(pool, &film(2, "The Empire Strikes Back", "It is a dark time\r\nfor the Rebellion."))
        .await
        .unwrap();
    StarshipRepo::create(pool, &starship(12, "X-wing")).await.unwrap();
    StarshipRepo::create(pool, &starship(13, "TIE Advanced x1"))
        .await
        .unwrap();

    AssociationRepo::link_character_films(pool, &[(1, 1), (1, 2), (2, 1), (2, 2), (4, 1)])
        .await
        .unwrap();
    AssociationRepo::link_film_starships(pool, &[(1, 12), (1, 13), (2, 12)])
        .await
        .unwrap();
    AssociationRepo::link_character_starships(pool, &[(1, 12), (4, 13)])
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Fake upstream
// ---------------------------------------------------------------------------

fn urls(kind: &str, ids: &[i64]) -> Vec<String> {
    ids.iter().map(|id| format!("{UPSTREAM}/{kind}/{id}")).collect()
}

pub fn upstream_films() -> Value {
    json!([{
        "title": "A New Hope",
        "episode_id": 4,
        "opening_crawl": LONG_CRAWL,
        "director": "George Lucas",
        "producer": "Gary Kurtz, Rick McCallum",
        "release_date": "1977-05-25",
        "characters": urls("people", &[1, 4]),
        "starships": urls("starships", &[12]),
        "created": "2014-12-10T14:23:31.880000Z",
        "edited": "2014-12-20T19:49:45.256000Z",
        "url": format!("{UPSTREAM}/films/1")
    }])
}

pub fn upstream_people() -> Value {
    json!([
        {
            "name": "Luke Skywalker",
            "height": "172",
            "mass": "77",
            "hair_color": "blond",
            "skin_color": "fair",
            "eye_color": "blue",
            "birth_year": "19BBY",
            "gender": "male",
            "films": urls("films", &[1]),
            "starships": urls("starships", &[12]),
            "created": "2014-12-09T13:50:51.644000Z",
            "edited": "2014-12-20T21:17:56.891000Z",
            "url": format!("{UPSTREAM}/people/1")
        },
        {
            "name": "Darth Vader",
            "height": "202",
            "mass": "136",
            "hair_color": "none",
            "skin_color": "white",
            "eye_color": "yellow",
            "birth_year": "41.9BBY",
            "gender": "male",
            "films": urls("films", &[1]),
            "starships": [],
            "created": "2014-12-10T15:18:20.704000Z",
            "edited": "2014-12-20T21:17:50.313000Z",
            "url": format!("{UPSTREAM}/people/4")
        }
    ])
}

pub fn upstream_starships() -> Value {
    json!([{
        "name": "X-wing",
        "model": "T-65 X-wing",
        "manufacturer": "Incom Corporation",
        "cost_in_credits": "149999",
        "length": "12.5",
        "max_atmosphering_speed": "1050",
        "crew": "1",
        "passengers": "0",
        "cargo_capacity": "110",
        "consumables": "1 week",
        "hyperdrive_rating": "1.0",
        "MGLT": "100",
        "starship_class": "Starfighter",
        "pilots": urls("people", &[1]),
        "films": urls("films", &[1]),
        "created": "2014-12-12T11:19:05.340000Z",
        "edited": "2014-12-20T21:23:49.886000Z",
        "url": format!("{UPSTREAM}/starships/12")
    }])
}

pub fn upstream_router() -> Router {
    Router::new()
        .route("/api", axum::routing::get(|| async { Json(json!({ "films": format!("{UPSTREAM}/films") })) }))
        .route("/api/films", axum::routing::get(|| async { Json(upstream_films()) }))
        .route("/api/people", axum::routing::get(|| async { Json(upstream_people()) }))
        .route("/api/starships", axum::routing::get(|| async { Json(upstream_starships()) }))
}

/// Bind a fake upstream on an ephemeral port and return its `/api` base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api")
}

/// Test config whose upstream is the given fake server.
pub fn config_with_upstream(base_url: String) -> ServerConfig {
    ServerConfig {
        swapi: fast_client_config(base_url),
        ..test_config()
    }
}
