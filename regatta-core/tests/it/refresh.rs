use regatta_core::{FetchOutcome, ReferencePoint, network_error, test_fix};

use crate::helper::{fetcher, fleet, no_cooldown, settings};

#[tokio::test]
async fn test_refresh_all_isolates_vessel_failures() {
    let fetcher = fetcher(settings());
    let mut fleet = fleet(&["contessa", "AZULUC", "FINISTERRE"]);
    fetcher
        .source()
        .push_fix("contessa", test_fix(-4.0, -33.0))
        .push_error("AZULUC", network_error("AZULUC"))
        .push_fix("FINISTERRE", test_fix(-5.0, -34.0));

    let refreshes = fleet.refresh_all(&fetcher).await;

    let names: Vec<_> = refreshes.iter().map(|r| r.vessel.as_str()).collect();
    assert_eq!(names, ["contessa", "AZULUC", "FINISTERRE"]);
    assert!(refreshes[0].outcome.is_fresh());
    assert!(matches!(refreshes[1].outcome, FetchOutcome::NoData(_)));
    assert!(refreshes[2].outcome.is_fresh());
    assert!(fleet.get("AZULUC").unwrap().last_fix().is_none());
}

#[tokio::test]
async fn test_history_keeps_most_recent_positions_across_cycles() {
    let fetcher = fetcher(no_cooldown());
    let mut fleet = fleet(&["contessa"]);
    for i in 0..4 {
        fetcher
            .source()
            .push_fix("contessa", test_fix(-4.0 - i as f64, -33.0));
    }

    for _ in 0..4 {
        fleet.refresh_all(&fetcher).await;
    }

    let latitudes: Vec<_> = fleet.vessels()[0]
        .history()
        .iter()
        .map(|c| c.latitude)
        .collect();
    assert_eq!(latitudes, [-5.0, -6.0, -7.0]);
}

#[tokio::test]
async fn test_nearest_vessel_after_refresh() {
    let fetcher = fetcher(settings());
    let mut fleet = fleet(&["far", "near", "silent"]);
    let reference = ReferencePoint::default();
    fetcher
        .source()
        .push_fix("far", test_fix(-10.0, -35.0))
        .push_fix("near", test_fix(-3.9, -32.5));

    fleet.refresh_all(&fetcher).await;
    let result = fleet.nearest_to(&reference);

    assert_eq!(result.nearest.as_ref().unwrap().name, "near");
    assert!(result.distance_nm < 10.0);

    let snapshot = fleet.snapshot(&reference, 10.0);
    assert_eq!(snapshot.proximity_circle.unwrap().vessel, "near");
    assert_eq!(snapshot.vessels.len(), 3);
}
