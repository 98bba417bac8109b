//! Rotten Tomatoes catalog access.
//!
//! [`types`] holds the wire shapes of the v1.0 API; [`client`] wraps the
//! three endpoints the enricher needs behind the [`CatalogClient`] trait,
//! with outbound concurrency bounded by a fixed request-slot pool.

pub mod client;
pub mod types;

pub use client::{CatalogClient, RottenTomatoesClient, DEFAULT_BASE_URL};
pub use types::{AlternateIds, MovieResult, Ratings, Review, ReviewLinks, ReviewList, SearchResults};
