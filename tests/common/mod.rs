//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::MockServer;

use freshcritic::metadata::enrichment::MovieEnricher;
use freshcritic::rotten::RottenTomatoesClient;

pub const API_KEY: &str = "test-key";

/// Client pointed at a mock server.
pub fn client(server: &MockServer) -> RottenTomatoesClient {
    RottenTomatoesClient::with_base_url(API_KEY.into(), server.uri())
}

/// Enricher over a client pointed at a mock server.
pub fn enricher(server: &MockServer) -> MovieEnricher {
    MovieEnricher::new(Arc::new(client(server)))
}

/// A full movie record as the service would return it.
pub fn movie_body(id: &str, title: &str, score: &str, imdb: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "year": 1985,
        "synopsis": "A bureaucrat dreams of escape.",
        "critics_concensus": "A visionary satire.",
        "ratings": { "critics_rating": "Certified Fresh", "critics_score": score },
        "alternate_ids": { "imdb": imdb }
    })
}

/// Alias-lookup miss: the service answers with an empty id.
pub fn miss_body() -> Value {
    json!({ "id": "" })
}

/// A search page.
pub fn search_body(total: u32, movies: Vec<Value>) -> Value {
    json!({ "total": total, "movies": movies })
}

/// A single review entry.
pub fn review_body(critic: &str, date: &str) -> Value {
    json!({
        "critic": critic,
        "date": date,
        "freshness": "fresh",
        "publication": "The Paper",
        "quote": "Great.",
        "links": { "review": format!("http://example.com/{critic}") }
    })
}

/// A review listing.
pub fn reviews_body(reviews: Vec<Value>) -> Value {
    json!({ "total": reviews.len(), "reviews": reviews })
}
