use std::{num::NonZeroUsize, time::Duration};

use chrono::{DateTime, Utc};

use crate::{Color, Coordinate, Fix, TrackHistory};

#[derive(Debug, Clone)]
struct CachedFix {
    fix: Fix,
    fetched_at: DateTime<Utc>,
}

/// A tracked vessel and everything learned about it since it was registered.
#[derive(Debug, Clone)]
pub struct Vessel {
    name: String,
    share_id: String,
    color: Color,
    history: TrackHistory,
    cache: Option<CachedFix>,
    track: Vec<Coordinate>,
}

impl Vessel {
    pub fn new(
        name: impl Into<String>,
        share_id: impl Into<String>,
        color: Color,
        history_capacity: NonZeroUsize,
    ) -> Self {
        Self {
            name: name.into(),
            share_id: share_id.into(),
            color,
            history: TrackHistory::new(history_capacity),
            cache: None,
            track: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn share_id(&self) -> &str {
        &self.share_id
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn history(&self) -> &TrackHistory {
        &self.history
    }

    /// The last fix produced by a successful fetch, which is also the fix served while the
    /// provider is in cooldown or failing.
    pub fn last_fix(&self) -> Option<&Fix> {
        self.cache.as_ref().map(|c| &c.fix)
    }

    pub fn last_fetched_at(&self) -> Option<DateTime<Utc>> {
        self.cache.as_ref().map(|c| c.fetched_at)
    }

    /// Points of the last track reported by the provider.
    pub fn track(&self) -> &[Coordinate] {
        &self.track
    }

    /// Stores a freshly fetched fix and appends its position to the history.
    pub fn record_fix(&mut self, fix: Fix, fetched_at: DateTime<Utc>) {
        self.history.push(fix.coordinate());
        self.cache = Some(CachedFix { fix, fetched_at });
    }

    pub fn set_track(&mut self, track: Vec<Coordinate>) {
        self.track = track;
    }

    /// Returns the cached fix if it was fetched less than `cooldown` before `now`.
    pub fn cached_within(&self, cooldown: Duration, now: DateTime<Utc>) -> Option<&Fix> {
        let cache = self.cache.as_ref()?;
        // A fetch timestamp in the future counts as just fetched.
        let elapsed = (now - cache.fetched_at).to_std().unwrap_or(Duration::ZERO);
        (elapsed < cooldown).then_some(&cache.fix)
    }
}

/// Extracts the share id from a share url, which is its last non-empty path segment.
///
/// Query strings and fragments are ignored. A string without a scheme is treated as a bare path,
/// so `"contessa"` yields `"contessa"` while `"https://share.example.com/"` yields nothing.
pub fn share_id_from_url(url: &str) -> Option<&str> {
    let url = url.trim();
    let without_suffix = &url[..url.find(['?', '#']).unwrap_or(url.len())];

    let path = match without_suffix.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map_or("", |(_, path)| path),
        None => without_suffix,
    };

    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
}
