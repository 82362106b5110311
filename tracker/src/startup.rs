use std::time::Duration;

use regatta_core::{Fleet, FleetSnapshot, PositionFetcher, ReferencePoint, VesselRefresh};
use share_feed::ShareFeed;
use snafu::ResultExt;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::{
        Result,
        error::{RegistrySnafu, ShareFeedSnafu},
    },
    settings::Settings,
};

pub struct App {
    fleet: Fleet,
    fetcher: PositionFetcher<ShareFeed>,
    reference_point: ReferencePoint,
    proximity_radius_nm: f64,
    refresh_interval: Duration,
}

impl App {
    pub fn build(settings: Settings) -> Result<App> {
        let feed = ShareFeed::new(&settings.provider).context(ShareFeedSnafu)?;

        let mut fleet = Fleet::new(settings.history_length, settings.color_policy);
        for vessel in settings.vessels {
            fleet
                .register(vessel.name.clone(), &vessel.share_url)
                .context(RegistrySnafu { name: vessel.name })?;
        }

        info!(
            environment = settings.environment.as_ref(),
            num_vessels = fleet.len(),
            reference_point = %settings.reference_point.name,
            "tracker configured"
        );

        Ok(App {
            fleet,
            fetcher: PositionFetcher::new(feed, settings.fetch),
            reference_point: settings.reference_point,
            proximity_radius_nm: settings.proximity_radius_nm,
            refresh_interval: settings.refresh_interval,
        })
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn reference_point(&self) -> &ReferencePoint {
        &self.reference_point
    }

    pub async fn run(mut self) {
        loop {
            self.refresh().await;
            tokio::time::sleep(self.refresh_interval).await;
        }
    }

    /// Runs a single refresh cycle over the whole fleet and returns the resulting snapshot.
    #[instrument(skip_all)]
    pub async fn refresh(&mut self) -> FleetSnapshot {
        let refreshed = self.fleet.refresh_all(&self.fetcher).await;
        log_advisories(&refreshed);

        let snapshot = self
            .fleet
            .snapshot(&self.reference_point, self.proximity_radius_nm);

        match &snapshot.proximity.nearest {
            Some(nearest) => info!(
                vessel = %nearest.name,
                distance_nm = snapshot.proximity.distance_nm,
                reference_point = %self.reference_point.name,
                "nearest vessel"
            ),
            None => info!("no vessel has a known position"),
        }

        match serde_json::to_string(&snapshot) {
            Ok(json) => debug!(snapshot = %json, "fleet snapshot"),
            Err(e) => warn!("failed to serialize fleet snapshot: {e:?}"),
        }

        snapshot
    }
}

fn log_advisories(refreshed: &[VesselRefresh]) {
    for r in refreshed {
        if let Some(error) = r.outcome.advisory() {
            match r.outcome.fix() {
                Some(fix) => warn!(
                    vessel = %r.vessel,
                    timestamp = %fix.timestamp,
                    "showing last known position: {error}"
                ),
                None => warn!(vessel = %r.vessel, "no position available: {error}"),
            }
        }
    }
}
