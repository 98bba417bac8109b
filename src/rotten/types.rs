//! Wire shapes for the Rotten Tomatoes v1.0 API.
//!
//! Field names mirror the JSON the service emits (lower snake case). These
//! types are transient: the enricher copies what it needs onto the item and
//! drops them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::item::ItemReview;

// ---------------------------------------------------------------------------
// Title search
// ---------------------------------------------------------------------------

/// Response to `GET /movies.json` (paginated title search).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    /// Total hits across all pages; `0` signals an exhausted search.
    #[serde(default)]
    pub total: u32,
    /// Hits on this page, in service ranking order.
    #[serde(default)]
    pub movies: Vec<MovieResult>,
}

/// One movie record, as returned by both search and alias lookup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieResult {
    /// Catalog id; the alias endpoint returns an empty string on a miss.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub runtime: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub mpaa_rating: Option<String>,
    /// One-line critic consensus. The wire name is misspelled upstream.
    #[serde(default, rename = "critics_concensus")]
    pub critics_consensus: Option<String>,
    #[serde(default)]
    pub ratings: Ratings,
    #[serde(default)]
    pub alternate_ids: AlternateIds,
}

impl MovieResult {
    /// Critic score parsed from its string-encoded wire form.
    pub fn critic_score(&self) -> Option<f32> {
        self.ratings
            .critics_score
            .as_deref()
            .and_then(|score| score.parse().ok())
    }
}

/// Rating block of a movie record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ratings {
    #[serde(default)]
    pub critics_rating: Option<String>,
    /// Aggregate score, string-encoded on the wire.
    #[serde(default)]
    pub critics_score: Option<String>,
}

/// Cross-referenced external ids of a movie record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlternateIds {
    /// IMDb id, without the `tt` prefix.
    #[serde(default)]
    pub imdb: Option<String>,
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

/// Response to `GET /movies/{id}/reviews.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewList {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// One top-critic review on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub critic: String,
    /// ISO-ish date; usually `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub freshness: Option<String>,
    #[serde(default)]
    pub publication: String,
    #[serde(default)]
    pub quote: String,
    #[serde(default)]
    pub links: Option<ReviewLinks>,
}

/// Link block of a review.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewLinks {
    /// URL of the full review.
    #[serde(default)]
    pub review: Option<String>,
}

impl Review {
    /// Convert to the item-side review shape, normalizing the date to UTC.
    pub fn into_item_review(self) -> Result<ItemReview> {
        let date = parse_review_date(&self.date)?;
        Ok(ItemReview {
            reviewer_name: self.critic,
            publisher: self.publication,
            date,
            caption: self.quote,
            url: self.links.and_then(|links| links.review),
        })
    }
}

/// Parse the service's date formats: RFC 3339 timestamps, or bare
/// `YYYY-MM-DD` dates interpreted as midnight UTC.
fn parse_review_date(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        // and_hms_opt(0, 0, 0) is always Some for midnight.
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(Error::InvalidReviewDate {
        value: value.to_string(),
    })
}
