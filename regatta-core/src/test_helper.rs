use std::{
    collections::{HashMap, VecDeque},
    sync::{Mutex, PoisonError},
};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::{Coordinate, FetchError, Fix, PositionSource, fetch_error};

pub fn test_fix(latitude: f64, longitude: f64) -> Fix {
    Fix {
        latitude,
        longitude,
        timestamp: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        speed: 6.5,
        course: 245.0,
        elevation: 0.0,
    }
}

pub fn rate_limited(share_id: &str) -> FetchError {
    fetch_error::RateLimitedSnafu {
        url: format!("test://{share_id}"),
    }
    .build()
}

pub fn network_error(share_id: &str) -> FetchError {
    fetch_error::NetworkSnafu {
        url: format!("test://{share_id}"),
        reason: "connection refused",
    }
    .build()
}

/// [`PositionSource`] replaying queued responses per share id.
///
/// A share without queued responses fails with a network error.
#[derive(Default)]
pub struct ScriptedSource {
    state: Mutex<ScriptedState>,
}

#[derive(Default)]
struct ScriptedState {
    fixes: HashMap<String, VecDeque<Result<Fix, FetchError>>>,
    tracks: HashMap<String, VecDeque<Result<Vec<Coordinate>, FetchError>>>,
    fix_calls: HashMap<String, usize>,
    track_calls: HashMap<String, usize>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_fix(&self, share_id: &str, fix: Fix) -> &Self {
        self.push_fix_result(share_id, Ok(fix))
    }

    pub fn push_error(&self, share_id: &str, error: FetchError) -> &Self {
        self.push_fix_result(share_id, Err(error))
    }

    pub fn push_track(&self, share_id: &str, track: Result<Vec<Coordinate>, FetchError>) -> &Self {
        self.state()
            .tracks
            .entry(share_id.to_string())
            .or_default()
            .push_back(track);
        self
    }

    pub fn fix_calls(&self, share_id: &str) -> usize {
        self.state().fix_calls.get(share_id).copied().unwrap_or(0)
    }

    pub fn track_calls(&self, share_id: &str) -> usize {
        self.state().track_calls.get(share_id).copied().unwrap_or(0)
    }

    fn push_fix_result(&self, share_id: &str, result: Result<Fix, FetchError>) -> &Self {
        self.state()
            .fixes
            .entry(share_id.to_string())
            .or_default()
            .push_back(result);
        self
    }

    fn state(&self) -> std::sync::MutexGuard<'_, ScriptedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl PositionSource for ScriptedSource {
    async fn latest_fix(&self, share_id: &str) -> Result<Fix, FetchError> {
        let mut state = self.state();
        *state.fix_calls.entry(share_id.to_string()).or_default() += 1;
        state
            .fixes
            .get_mut(share_id)
            .and_then(|q| q.pop_front())
            .unwrap_or_else(|| Err(network_error(share_id)))
    }

    async fn last_track(&self, share_id: &str) -> Result<Vec<Coordinate>, FetchError> {
        let mut state = self.state();
        *state.track_calls.entry(share_id.to_string()).or_default() += 1;
        state
            .tracks
            .get_mut(share_id)
            .and_then(|q| q.pop_front())
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
