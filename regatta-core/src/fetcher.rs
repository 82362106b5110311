use std::time::Duration;

use async_trait::async_trait;
use backon::{ConstantBuilder, Retryable};
use chrono::Utc;
use serde::Deserialize;
use strum::AsRefStr;
use tracing::{debug, instrument, warn};

use crate::{Coordinate, FetchError, Fix, Vessel};

/// Upstream provider of vessel positions, addressed by share id.
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// The most recent position the provider reports for the share.
    async fn latest_fix(&self, share_id: &str) -> Result<Fix, FetchError>;
    /// The points of the last track the provider reports for the share.
    async fn last_track(&self, share_id: &str) -> Result<Vec<Coordinate>, FetchError>;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Minimum time between two live fetches of the same vessel.
    #[serde(with = "humantime_serde")]
    pub cooldown: Duration,
    /// Wait before the single retry of a rate limited request.
    #[serde(with = "humantime_serde")]
    pub rate_limit_backoff: Duration,
    pub fetch_track: bool,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_secs(300),
            rate_limit_backoff: Duration::from_secs(120),
            fetch_track: true,
        }
    }
}

#[derive(Debug, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum FetchOutcome {
    /// A new fix was retrieved from the provider.
    Fresh(Fix),
    /// The vessel was fetched too recently, the cached fix is served without a network call.
    Cooldown(Fix),
    /// The fetch failed and the cached fix is served instead.
    Fallback { fix: Fix, error: FetchError },
    /// The fetch failed and there is no cached fix to fall back on.
    NoData(FetchError),
}

impl FetchOutcome {
    pub fn fix(&self) -> Option<&Fix> {
        match self {
            FetchOutcome::Fresh(fix)
            | FetchOutcome::Cooldown(fix)
            | FetchOutcome::Fallback { fix, .. } => Some(fix),
            FetchOutcome::NoData(_) => None,
        }
    }

    /// The error that was recovered from, if any.
    pub fn advisory(&self) -> Option<&FetchError> {
        match self {
            FetchOutcome::Fresh(_) | FetchOutcome::Cooldown(_) => None,
            FetchOutcome::Fallback { error, .. } | FetchOutcome::NoData(error) => Some(error),
        }
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, FetchOutcome::Fresh(_))
    }
}

pub struct PositionFetcher<S> {
    source: S,
    settings: FetchSettings,
}

impl<S: PositionSource> PositionFetcher<S> {
    pub fn new(source: S, settings: FetchSettings) -> Self {
        Self { source, settings }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Refreshes a single vessel, updating its cache and history on success.
    ///
    /// Never fails, every error ends up as a [`FetchOutcome::Fallback`] or
    /// [`FetchOutcome::NoData`] so that one vessel cannot abort a refresh cycle.
    #[instrument(skip_all, fields(app.vessel = vessel.name(), app.outcome))]
    pub async fn fetch(&self, vessel: &mut Vessel) -> FetchOutcome {
        let outcome = self.fetch_impl(vessel).await;
        tracing::Span::current().record("app.outcome", outcome.as_ref());
        outcome
    }

    async fn fetch_impl(&self, vessel: &mut Vessel) -> FetchOutcome {
        if let Some(fix) = vessel.cached_within(self.settings.cooldown, Utc::now()) {
            debug!("vessel is in cooldown, serving cached fix");
            return FetchOutcome::Cooldown(fix.clone());
        }

        let result = self.latest_fix_with_retry(vessel.share_id()).await;

        match result {
            Ok(fix) => {
                vessel.record_fix(fix.clone(), Utc::now());
                if self.settings.fetch_track {
                    self.refresh_track(vessel).await;
                }
                FetchOutcome::Fresh(fix)
            }
            Err(error) => match vessel.last_fix() {
                Some(fix) => {
                    warn!("fetch failed, falling back to cached fix: {error}");
                    FetchOutcome::Fallback {
                        fix: fix.clone(),
                        error,
                    }
                }
                None => {
                    warn!("fetch failed and no cached fix exists: {error}");
                    FetchOutcome::NoData(error)
                }
            },
        }
    }

    // A rate limited request is retried exactly once, a second rate limit fails the fetch.
    async fn latest_fix_with_retry(&self, share_id: &str) -> Result<Fix, FetchError> {
        let source = &self.source;
        (move || source.latest_fix(share_id))
            .retry(
                ConstantBuilder::default()
                    .with_delay(self.settings.rate_limit_backoff)
                    .with_max_times(1),
            )
            .when(FetchError::is_rate_limited)
            .notify(|error, delay| warn!("rate limited, retrying in {delay:?}: {error}"))
            .await
    }

    async fn refresh_track(&self, vessel: &mut Vessel) {
        let result = self.source.last_track(vessel.share_id()).await;
        match result {
            Ok(track) => vessel.set_track(track),
            Err(e) => warn!("failed to refresh track, keeping previous: {e}"),
        }
    }
}
