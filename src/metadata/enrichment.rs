//! Refresh orchestration for critic-rating enrichment.
//!
//! One [`MovieEnricher::refresh`] call runs the full state machine for a
//! single item: fingerprint gate, identity resolution, enrich-or-miss, and
//! record finalization. Remote calls within one refresh are strictly
//! sequential; concurrency across items is bounded by the catalog client's
//! request-slot pool.

use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::fingerprint::{needs_refresh, Fingerprint};
use super::resolver;
use crate::error::Result;
use crate::item::{MediaItem, RefreshRecord, PROVIDER_IMDB, PROVIDER_ROTTEN_TOMATOES};
use crate::rotten::CatalogClient;

/// Bumped when enrichment logic changes in a way that should invalidate
/// previously written refresh records.
pub const PROVIDER_VERSION: u32 = 1;

/// Drives one critic-rating refresh per call against a shared catalog
/// client.
///
/// The enricher borrows the item mutably only for the duration of a call;
/// callers are responsible for not running two refreshes of the same item
/// concurrently.
pub struct MovieEnricher {
    catalog: Arc<dyn CatalogClient>,
}

impl MovieEnricher {
    /// Create an enricher over a shared catalog client.
    pub fn new(catalog: Arc<dyn CatalogClient>) -> Self {
        Self { catalog }
    }

    /// True when [`refresh`](Self::refresh) would actually run for `item`.
    pub fn needs_refresh(&self, item: &MediaItem, force: bool) -> bool {
        let current = Fingerprint::of(item.provider_id(PROVIDER_IMDB).unwrap_or(""));
        needs_refresh(
            &current,
            item.refresh_record(PROVIDER_ROTTEN_TOMATOES),
            force,
            PROVIDER_VERSION,
        )
    }

    /// Run one refresh attempt against `item`.
    ///
    /// Returns `Ok(false)` when the fingerprint gate skipped the attempt
    /// without any network traffic, and `Ok(true)` when an attempt completed
    /// and the refresh record was updated (whether or not the catalog had a
    /// match). On any error the item and its record are exactly as they were
    /// before the call.
    pub async fn refresh(
        &self,
        item: &mut MediaItem,
        force: bool,
        cancel: &CancellationToken,
    ) -> Result<bool> {
        let entry_imdb_id = item.provider_id(PROVIDER_IMDB).unwrap_or("").to_string();
        let current = Fingerprint::of(&entry_imdb_id);

        if !needs_refresh(
            &current,
            item.refresh_record(PROVIDER_ROTTEN_TOMATOES),
            force,
            PROVIDER_VERSION,
        ) {
            debug!(item = %item.name, "fingerprint unchanged, skipping refresh");
            return Ok(false);
        }

        let hit =
            resolver::resolve(self.catalog.as_ref(), &item.name, Some(&entry_imdb_id), cancel)
                .await?;

        let fingerprint = match hit {
            Some(hit) => {
                // Fetch and convert everything before touching the item, so
                // a failure here commits nothing.
                let review_list = self.catalog.movie_reviews(&hit.id, cancel).await?;
                let mut reviews = Vec::with_capacity(review_list.reviews.len());
                for review in review_list.reviews {
                    reviews.push(review.into_item_review()?);
                }

                info!(
                    item = %item.name,
                    rt_id = %hit.id,
                    score = ?hit.critic_score(),
                    reviews = reviews.len(),
                    "matched on Rotten Tomatoes"
                );

                item.critic_rating = hit.critic_score();
                item.critic_rating_summary = hit.critics_consensus.clone();
                item.critic_reviews.clear();
                item.critic_reviews.extend(reviews);

                let linked_imdb_id = hit.alternate_ids.imdb.clone().unwrap_or_default();
                if !linked_imdb_id.is_empty() {
                    item.set_provider_id(PROVIDER_IMDB, linked_imdb_id.clone());
                }
                item.set_provider_id(PROVIDER_ROTTEN_TOMATOES, hit.id.clone());

                // Gate future refreshes on the id the catalog reported, not
                // the one this attempt started from.
                Fingerprint::of(&linked_imdb_id)
            }
            None => {
                info!(item = %item.name, "nothing found on Rotten Tomatoes");

                // Record that the attempt happened so identical re-checks
                // stay cheap.
                Fingerprint::of(&entry_imdb_id)
            }
        };

        item.set_refresh_record(
            PROVIDER_ROTTEN_TOMATOES,
            RefreshRecord {
                fingerprint,
                last_refreshed: Utc::now(),
                version: PROVIDER_VERSION,
            },
        );

        Ok(true)
    }
}
