//! Request-pool bounds and cancellation behavior over real HTTP.

mod common;

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use common::{enricher, miss_body};
use freshcritic::error::Error;
use freshcritic::item::{MediaItem, RefreshRecord, PROVIDER_IMDB, PROVIDER_ROTTEN_TOMATOES};
use freshcritic::metadata::fingerprint::Fingerprint;

/// Responds with an alias-lookup miss after `delay`, recording when each
/// request arrived.
struct TimedMiss {
    starts: Arc<Mutex<Vec<Instant>>>,
    delay: Duration,
}

impl Respond for TimedMiss {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        self.starts.lock().unwrap().push(Instant::now());
        ResponseTemplate::new(200)
            .set_body_json(miss_body())
            .set_delay(self.delay)
    }
}

#[tokio::test]
async fn ten_refreshes_never_exceed_three_in_flight_requests() {
    let server = MockServer::start().await;
    let starts = Arc::new(Mutex::new(Vec::new()));
    let delay = Duration::from_millis(300);

    Mock::given(method("GET"))
        .and(path("/movie_alias.json"))
        .respond_with(TimedMiss {
            starts: starts.clone(),
            delay,
        })
        .expect(10)
        .mount(&server)
        .await;

    let enricher = Arc::new(enricher(&server));
    let cancel = CancellationToken::new();

    let mut tasks = Vec::new();
    for n in 0..10 {
        let enricher = enricher.clone();
        let cancel = cancel.clone();
        tasks.push(tokio::spawn(async move {
            let mut item = MediaItem::new(format!("Movie {n}"));
            item.set_provider_id(PROVIDER_IMDB, format!("tt000000{n}"));
            enricher.refresh(&mut item, false, &cancel).await
        }));
    }

    for task in tasks {
        assert!(task.await.unwrap().unwrap());
    }

    // Each request occupies its pool slot for ~`delay`. With only three
    // slots, the 4th request after any given one cannot have started inside
    // that window.
    let starts = starts.lock().unwrap();
    assert_eq!(starts.len(), 10);
    let mut sorted = starts.clone();
    sorted.sort();
    for window in sorted.windows(4) {
        let spread = window[3].duration_since(window[0]);
        assert!(
            spread >= delay / 2,
            "4 requests started within {spread:?}; pool bound violated"
        );
    }
}

#[tokio::test]
async fn cancellation_mid_flight_preserves_the_refresh_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie_alias.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(miss_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let enricher = Arc::new(enricher(&server));
    let cancel = CancellationToken::new();

    let prior_record = RefreshRecord {
        fingerprint: Fingerprint::of("tt0000001"),
        last_refreshed: Utc::now() - chrono::Duration::hours(6),
        version: 1,
    };

    let mut item = MediaItem::new("Brazil");
    item.set_provider_id(PROVIDER_IMDB, "tt0088846");
    item.set_refresh_record(PROVIDER_ROTTEN_TOMATOES, prior_record.clone());

    let task = {
        let enricher = enricher.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            let result = enricher.refresh(&mut item, false, &cancel).await;
            (result, item)
        })
    };

    tokio::time::sleep(Duration::from_millis(150)).await;
    cancel.cancel();

    let (result, item) = task.await.unwrap();
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Cancelled));
    assert!(!err.is_transient());

    // The record is exactly its pre-attempt value.
    assert_eq!(
        item.refresh_record(PROVIDER_ROTTEN_TOMATOES),
        Some(&prior_record)
    );
    assert!(item.critic_rating.is_none());
}

#[tokio::test]
async fn cancellation_aborts_the_wait_for_a_pool_slot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie_alias.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(miss_body())
                .set_delay(Duration::from_millis(800)),
        )
        .mount(&server)
        .await;

    let enricher = Arc::new(enricher(&server));

    // Saturate all three slots.
    let blocker_cancel = CancellationToken::new();
    let mut blockers = Vec::new();
    for n in 0..3 {
        let enricher = enricher.clone();
        let cancel = blocker_cancel.clone();
        blockers.push(tokio::spawn(async move {
            let mut item = MediaItem::new(format!("Blocker {n}"));
            item.set_provider_id(PROVIDER_IMDB, format!("tt100000{n}"));
            enricher.refresh(&mut item, false, &cancel).await
        }));
    }
    tokio::time::sleep(Duration::from_millis(200)).await;

    // The fourth refresh queues for a slot; cancelling it must not wait for
    // one to free up.
    let cancel = CancellationToken::new();
    let queued = {
        let enricher = enricher.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            let started = Instant::now();
            let mut item = MediaItem::new("Queued");
            item.set_provider_id(PROVIDER_IMDB, "tt2000000");
            let result = enricher.refresh(&mut item, false, &cancel).await;
            (result, started.elapsed())
        })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    cancel.cancel();

    let (result, waited) = queued.await.unwrap();
    assert!(matches!(result.unwrap_err(), Error::Cancelled));
    assert!(
        waited < Duration::from_millis(500),
        "cancelled wait took {waited:?}"
    );

    for blocker in blockers {
        assert!(blocker.await.unwrap().unwrap());
    }
}
