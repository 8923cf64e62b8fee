//! Shared fixtures: a small slice of the dataset and a fake upstream server.

#![allow(dead_code)]

use std::time::Duration;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use swapi_importer::{ClientConfig, SwapiClient};

pub const UPSTREAM: &str = "https://swapi.info/api";

fn urls(kind: &str, ids: &[i64]) -> Vec<String> {
    ids.iter().map(|id| format!("{UPSTREAM}/{kind}/{id}")).collect()
}

pub fn film(id: i64, title: &str, characters: &[i64], starships: &[i64]) -> Value {
    json!({
        "title": title,
        "episode_id": id + 3,
        "opening_crawl": "It is a period of civil war.\r\nRebel spaceships, striking\r\nfrom a hidden base.",
        "director": "George Lucas",
        "producer": "Gary Kurtz, Rick McCallum",
        "release_date": "1977-05-25",
        "characters": urls("people", characters),
        "planets": urls("planets", &[1]),
        "starships": urls("starships", starships),
        "vehicles": [],
        "species": [],
        "created": "2014-12-10T14:23:31.880000Z",
        "edited": "2014-12-20T19:49:45.256000Z",
        "url": format!("{UPSTREAM}/films/{id}")
    })
}

pub fn character(id: i64, name: &str, films: &[i64], starships: &[i64]) -> Value {
    json!({
        "name": name,
        "height": "172",
        "mass": "77",
        "hair_color": "blond",
        "skin_color": "fair",
        "eye_color": "blue",
        "birth_year": "19BBY",
        "gender": "male",
        "homeworld": format!("{UPSTREAM}/planets/1"),
        "films": urls("films", films),
        "species": [],
        "vehicles": [],
        "starships": urls("starships", starships),
        "created": "2014-12-09T13:50:51.644000Z",
        "edited": "2014-12-20T21:17:56.891000Z",
        "url": format!("{UPSTREAM}/people/{id}")
    })
}

pub fn starship(id: i64, name: &str, films: &[i64], pilots: &[i64]) -> Value {
    json!({
        "name": name,
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
        "pilots": urls("people", pilots),
        "films": urls("films", films),
        "created": "2014-12-12T11:19:05.340000Z",
        "edited": "2014-12-20T21:23:49.886000Z",
        "url": format!("{UPSTREAM}/starships/{id}")
    })
}

pub fn films() -> Value {
    json!([
        film(1, "A New Hope", &[1, 2, 4], &[12, 13]),
        film(2, "The Empire Strikes Back", &[1, 2], &[12]),
    ])
}

pub fn people() -> Value {
    json!([
        character(1, "Luke Skywalker", &[1, 2], &[12]),
        character(2, "C-3PO", &[1, 2], &[]),
        character(4, "Darth Vader", &[1], &[13]),
    ])
}

pub fn starships() -> Value {
    json!([
        starship(12, "X-wing", &[1, 2], &[1]),
        starship(13, "TIE Advanced x1", &[1], &[4]),
    ])
}

/// Router serving the fixture collections as bare arrays under `/api`.
pub fn dataset_router() -> Router {
    Router::new()
        .route("/api/films", get(|| async { Json(films()) }))
        .route("/api/people", get(|| async { Json(people()) }))
        .route("/api/starships", get(|| async { Json(starships()) }))
}

/// Bind a fake upstream on an ephemeral port and return its `/api` base URL.
///
/// The router is built from the base URL so handlers can emit `next` links.
pub async fn spawn_upstream(build: impl FnOnce(String) -> Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}/api");
    let router = build(base_url.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    base_url
}

/// Client with fast retries suitable for tests.
pub fn client(base_url: String) -> SwapiClient {
    SwapiClient::new(ClientConfig {
        base_url,
        timeout: Duration::from_secs(5),
        max_retries: 2,
        retry_base: Duration::from_millis(10),
    })
    .unwrap()
}
