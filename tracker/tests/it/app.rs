use regatta_core::{Color, ColorPolicy, distance_nm};
use tracker::error::Error;
use wiremock::ResponseTemplate;

use crate::helper::{TestHelper, feed_body};

#[tokio::test]
async fn test_build_registers_configured_vessels_in_order() {
    let helper = TestHelper::new().await;
    let app = helper.app(&["contessa", "AZULUC", "FINISTERRE"]).unwrap();

    let colors: Vec<Color> = app.fleet().vessels().iter().map(|v| v.color()).collect();
    assert_eq!(colors, vec![Color::Blue, Color::Red, Color::Green]);
    assert_eq!(app.fleet().get("AZULUC").unwrap().share_id(), "AZULUC");
}

#[tokio::test]
async fn test_build_fails_with_seven_vessels_under_unique_colors() {
    let helper = TestHelper::new().await;
    let ids = ["a", "b", "c", "d", "e", "f", "g"];

    let error = helper.app(&ids).err().unwrap();
    assert!(matches!(error, Error::Registry { ref name, .. } if name == "g"));
}

#[tokio::test]
async fn test_build_accepts_seven_vessels_with_cycling_colors() {
    let helper = TestHelper::new().await;
    let mut settings = helper.settings(&["a", "b", "c", "d", "e", "f", "g"]);
    settings.color_policy = ColorPolicy::Cycle;

    let app = tracker::startup::App::build(settings).unwrap();
    let vessels = app.fleet().vessels();
    assert_eq!(vessels[6].color(), vessels[0].color());
}

#[tokio::test]
async fn test_build_fails_on_duplicate_vessel() {
    let helper = TestHelper::new().await;

    let error = helper.app(&["contessa", "contessa"]).err().unwrap();
    assert!(matches!(error, Error::Registry { .. }));
}

#[tokio::test]
async fn test_build_fails_on_invalid_provider_url() {
    let helper = TestHelper::new().await;
    let mut settings = helper.settings(&["contessa"]);
    settings.provider.base_url = "not a url".to_string();

    let error = tracker::startup::App::build(settings).err().unwrap();
    assert!(matches!(error, Error::ShareFeed { .. }));
}

#[tokio::test]
async fn test_refresh_reports_nearest_vessel_and_isolates_failures() {
    let helper = TestHelper::new().await;
    helper
        .mount_feed("far", ResponseTemplate::new(200).set_body_json(feed_body(-5.0, -35.0)), 1)
        .await;
    helper
        .mount_feed("near", ResponseTemplate::new(200).set_body_json(feed_body(-3.9, -32.5)), 1)
        .await;
    helper.mount_feed("broken", ResponseTemplate::new(500), 1).await;

    let mut app = helper.app(&["far", "broken", "near"]).unwrap();
    let snapshot = app.refresh().await;

    let nearest = snapshot.proximity.nearest.as_ref().unwrap();
    assert_eq!(nearest.name, "near");

    let reference = app.reference_point().coordinate();
    let expected = distance_nm(reference, nearest.fix.coordinate());
    assert!((snapshot.proximity.distance_nm - expected).abs() < 1e-9);

    let circle = snapshot.proximity_circle.unwrap();
    assert_eq!(circle.vessel, "near");
    assert_eq!(circle.radius_meters, 18_520.0);

    assert_eq!(snapshot.vessels.len(), 3);
    assert!(snapshot.vessels[1].last_fix.is_none());
    assert_eq!(snapshot.vessels[0].history.len(), 1);
}

#[tokio::test]
async fn test_second_refresh_within_cooldown_does_not_hit_provider() {
    let helper = TestHelper::new().await;
    helper
        .mount_feed(
            "contessa",
            ResponseTemplate::new(200).set_body_json(feed_body(-4.0, -33.0)),
            1,
        )
        .await;

    let mut app = helper.app(&["contessa"]).unwrap();
    let first = app.refresh().await;
    let second = app.refresh().await;

    assert_eq!(
        first.proximity.nearest.unwrap().fix,
        second.proximity.nearest.unwrap().fix
    );
    assert_eq!(app.fleet().get("contessa").unwrap().history().len(), 1);
}

#[tokio::test]
async fn test_refresh_without_any_position_has_no_nearest_vessel() {
    let helper = TestHelper::new().await;
    helper.mount_feed("contessa", ResponseTemplate::new(429), 2).await;

    let mut app = helper.app(&["contessa"]).unwrap();
    let snapshot = app.refresh().await;

    assert!(snapshot.proximity.nearest.is_none());
    assert!(snapshot.proximity.distance_nm.is_infinite());
    assert!(snapshot.proximity_circle.is_none());
}
