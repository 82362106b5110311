use regatta_core::{
    Coordinate, FetchError, FetchOutcome, FetchSettings, network_error, rate_limited, test_fix,
};

use crate::helper::{fetcher, no_cooldown, settings, vessel};

#[tokio::test]
async fn test_successful_fetch_updates_cache_and_history() {
    let fetcher = fetcher(settings());
    let mut vessel = vessel("contessa");
    fetcher.source().push_fix("contessa", test_fix(-4.0, -33.0));

    let outcome = fetcher.fetch(&mut vessel).await;

    assert!(matches!(outcome, FetchOutcome::Fresh(ref fix) if *fix == test_fix(-4.0, -33.0)));
    assert!(outcome.advisory().is_none());
    assert_eq!(vessel.last_fix(), Some(&test_fix(-4.0, -33.0)));
    assert!(vessel.last_fetched_at().is_some());
    assert_eq!(
        vessel.history().to_vec(),
        vec![Coordinate::new(-4.0, -33.0)]
    );
}

#[tokio::test]
async fn test_fetch_within_cooldown_serves_cache_without_network_call() {
    let fetcher = fetcher(settings());
    let mut vessel = vessel("contessa");
    fetcher
        .source()
        .push_fix("contessa", test_fix(-4.0, -33.0))
        .push_fix("contessa", test_fix(-4.5, -33.5));

    let first = fetcher.fetch(&mut vessel).await;
    let second = fetcher.fetch(&mut vessel).await;

    assert!(first.is_fresh());
    assert!(matches!(second, FetchOutcome::Cooldown(ref fix) if *fix == test_fix(-4.0, -33.0)));
    assert_eq!(fetcher.source().fix_calls("contessa"), 1);
    assert_eq!(vessel.history().len(), 1);
}

#[tokio::test]
async fn test_fetch_after_cooldown_issues_new_request() {
    let fetcher = fetcher(no_cooldown());
    let mut vessel = vessel("contessa");
    fetcher
        .source()
        .push_fix("contessa", test_fix(-4.0, -33.0))
        .push_fix("contessa", test_fix(-4.5, -33.5));

    fetcher.fetch(&mut vessel).await;
    let second = fetcher.fetch(&mut vessel).await;

    assert!(matches!(second, FetchOutcome::Fresh(ref fix) if *fix == test_fix(-4.5, -33.5)));
    assert_eq!(fetcher.source().fix_calls("contessa"), 2);
    assert_eq!(vessel.history().len(), 2);
}

#[tokio::test]
async fn test_rate_limited_fetch_is_retried_once() {
    let fetcher = fetcher(settings());
    let mut vessel = vessel("contessa");
    fetcher
        .source()
        .push_error("contessa", rate_limited("contessa"))
        .push_fix("contessa", test_fix(-4.0, -33.0));

    let outcome = fetcher.fetch(&mut vessel).await;

    assert!(matches!(outcome, FetchOutcome::Fresh(ref fix) if *fix == test_fix(-4.0, -33.0)));
    assert_eq!(fetcher.source().fix_calls("contessa"), 2);
}

#[tokio::test]
async fn test_second_rate_limit_fails_the_fetch() {
    let fetcher = fetcher(settings());
    let mut vessel = vessel("contessa");
    fetcher
        .source()
        .push_error("contessa", rate_limited("contessa"))
        .push_error("contessa", rate_limited("contessa"))
        .push_fix("contessa", test_fix(-4.0, -33.0));

    let outcome = fetcher.fetch(&mut vessel).await;

    assert!(matches!(
        outcome,
        FetchOutcome::NoData(FetchError::RateLimited { .. })
    ));
    assert_eq!(fetcher.source().fix_calls("contessa"), 2);
}

#[tokio::test]
async fn test_other_errors_are_not_retried() {
    let fetcher = fetcher(settings());
    let mut vessel = vessel("contessa");
    fetcher
        .source()
        .push_error("contessa", network_error("contessa"))
        .push_fix("contessa", test_fix(-4.0, -33.0));

    let outcome = fetcher.fetch(&mut vessel).await;

    assert!(matches!(
        outcome,
        FetchOutcome::NoData(FetchError::Network { .. })
    ));
    assert_eq!(fetcher.source().fix_calls("contessa"), 1);
}

#[tokio::test]
async fn test_failure_without_cache_yields_no_data() {
    let fetcher = fetcher(settings());
    let mut vessel = vessel("contessa");

    let outcome = fetcher.fetch(&mut vessel).await;

    assert!(outcome.fix().is_none());
    assert!(outcome.advisory().is_some());
    assert!(vessel.last_fix().is_none());
    assert!(vessel.history().is_empty());
}

#[tokio::test]
async fn test_failure_with_cache_falls_back_to_cached_fix() {
    let fetcher = fetcher(no_cooldown());
    let mut vessel = vessel("contessa");
    fetcher
        .source()
        .push_fix("contessa", test_fix(-4.0, -33.0))
        .push_error("contessa", network_error("contessa"));

    fetcher.fetch(&mut vessel).await;
    let fetched_at = vessel.last_fetched_at();
    let outcome = fetcher.fetch(&mut vessel).await;

    match outcome {
        FetchOutcome::Fallback { fix, error } => {
            assert_eq!(fix, test_fix(-4.0, -33.0));
            assert!(matches!(error, FetchError::Network { .. }));
        }
        other => panic!("expected fallback, got {other:?}"),
    }
    assert_eq!(vessel.last_fetched_at(), fetched_at);
    assert_eq!(vessel.history().len(), 1);
}

#[tokio::test]
async fn test_track_is_refreshed_after_fresh_fix() {
    let fetcher = fetcher(FetchSettings {
        fetch_track: true,
        ..no_cooldown()
    });
    let mut vessel = vessel("contessa");
    let track = vec![Coordinate::new(-4.1, -33.1), Coordinate::new(-4.0, -33.0)];
    fetcher
        .source()
        .push_fix("contessa", test_fix(-4.0, -33.0))
        .push_track("contessa", Ok(track.clone()))
        .push_fix("contessa", test_fix(-4.2, -33.2))
        .push_track("contessa", Err(network_error("contessa")));

    fetcher.fetch(&mut vessel).await;
    assert_eq!(vessel.track(), track.as_slice());

    let outcome = fetcher.fetch(&mut vessel).await;
    assert!(outcome.is_fresh());
    assert_eq!(vessel.track(), track.as_slice());
    assert_eq!(fetcher.source().track_calls("contessa"), 2);
}

#[tokio::test]
async fn test_track_is_not_requested_when_disabled_or_fetch_fails() {
    let fetcher = fetcher(no_cooldown());
    let mut vessel = vessel("contessa");
    fetcher.source().push_fix("contessa", test_fix(-4.0, -33.0));

    fetcher.fetch(&mut vessel).await;
    fetcher.fetch(&mut vessel).await;

    assert_eq!(fetcher.source().track_calls("contessa"), 0);
    assert!(vessel.track().is_empty());
}
