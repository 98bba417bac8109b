//! Exact-match-first identity resolution.
//!
//! A known external id short-circuits to the alias lookup and its answer is
//! final. Without one, the title search is paged until an exact
//! case-insensitive title match turns up, the service reports exactly one
//! hit, or a page comes back with `total == 0`.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{Error, Result};
use crate::rotten::{CatalogClient, MovieResult};

/// Ceiling on search pagination. The service signals exhaustion with a
/// `total == 0` page; a remote that never sends one must not keep this loop
/// alive forever.
pub const MAX_SEARCH_PAGES: u32 = 10;

/// Resolve a movie title (and optionally a known IMDb id) to a catalog
/// record, or `None` when the catalog has no match.
pub async fn resolve(
    catalog: &dyn CatalogClient,
    title: &str,
    known_imdb_id: Option<&str>,
    cancel: &CancellationToken,
) -> Result<Option<MovieResult>> {
    if let Some(imdb_id) = known_imdb_id.filter(|id| !id.is_empty()) {
        debug!(imdb_id, "resolving by alias lookup");
        return catalog.lookup_by_imdb_id(imdb_id, cancel).await;
    }

    let mut page = 1;
    let mut results = catalog.search_movies(title, page, cancel).await?;

    if results.total == 0 {
        return Ok(None);
    }
    if results.total == 1 {
        return Ok(results.movies.into_iter().next());
    }

    let needle = title.to_lowercase();
    loop {
        if let Some(hit) = results
            .movies
            .iter()
            .find(|movie| movie.title.to_lowercase() == needle)
        {
            debug!(page, rt_id = %hit.id, "exact title match");
            return Ok(Some(hit.clone()));
        }

        if page >= MAX_SEARCH_PAGES {
            return Err(Error::SearchExhausted {
                title: title.to_string(),
                pages: page,
            });
        }

        page += 1;
        results = catalog.search_movies(title, page, cancel).await?;
        if results.total == 0 {
            return Ok(None);
        }
    }
}
