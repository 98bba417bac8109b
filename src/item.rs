//! Library-side item shapes the enrichment provider writes into.
//!
//! [`MediaItem`] is owned by the surrounding catalog system; the enricher
//! borrows it mutably for the duration of a single refresh call and copies
//! remote data into these fields.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metadata::fingerprint::Fingerprint;

/// Provider-name key for IMDb ids in [`MediaItem::provider_ids`].
pub const PROVIDER_IMDB: &str = "imdb";

/// Provider-name key for Rotten Tomatoes ids in [`MediaItem::provider_ids`].
pub const PROVIDER_ROTTEN_TOMATOES: &str = "rottentomatoes";

/// A locally known movie.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaItem {
    /// Display title, used for fallback searches.
    pub name: String,

    /// External ids keyed by provider name
    /// (e.g. `{"imdb": "tt0435761", "rottentomatoes": "770672122"}`).
    #[serde(default)]
    pub provider_ids: HashMap<String, String>,

    /// Aggregate critic score (typically 0 - 100).
    #[serde(default)]
    pub critic_rating: Option<f32>,

    /// One-line critic consensus.
    #[serde(default)]
    pub critic_rating_summary: Option<String>,

    /// Critic reviews, in the order the provider returned them.
    #[serde(default)]
    pub critic_reviews: Vec<ItemReview>,

    /// Per-provider refresh bookkeeping, keyed like `provider_ids`.
    #[serde(default)]
    pub refresh_records: HashMap<String, RefreshRecord>,
}

impl MediaItem {
    /// Create an item with just a display title.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// External id stored under `provider`, if any.
    pub fn provider_id(&self, provider: &str) -> Option<&str> {
        self.provider_ids.get(provider).map(String::as_str)
    }

    /// Store an external id under `provider`, replacing any previous value.
    pub fn set_provider_id(&mut self, provider: &str, id: impl Into<String>) {
        self.provider_ids.insert(provider.to_string(), id.into());
    }

    /// Refresh bookkeeping for `provider`, if an attempt ever completed.
    pub fn refresh_record(&self, provider: &str) -> Option<&RefreshRecord> {
        self.refresh_records.get(provider)
    }

    /// Replace the refresh bookkeeping for `provider`.
    pub fn set_refresh_record(&mut self, provider: &str, record: RefreshRecord) {
        self.refresh_records.insert(provider.to_string(), record);
    }
}

/// A single critic review attached to an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReview {
    /// Name of the critic.
    pub reviewer_name: String,
    /// Publication the review appeared in.
    pub publisher: String,
    /// Publication date, normalized to UTC.
    pub date: DateTime<Utc>,
    /// Pull quote.
    pub caption: String,
    /// Link to the full review, when the service provides one.
    pub url: Option<String>,
}

/// What a provider remembers about its last completed refresh of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshRecord {
    /// Fingerprint of the external id the last completed attempt keyed on.
    pub fingerprint: Fingerprint,
    /// When the last attempt completed, regardless of match outcome.
    pub last_refreshed: DateTime<Utc>,
    /// Provider logic version that produced this record.
    pub version: u32,
}
