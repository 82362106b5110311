use chrono::DateTime;
use regatta_core::{
    Coordinate, FetchError, Fix,
    fetch_error::{MalformedResponseSnafu, MissingLocationSnafu},
};
use serde::Deserialize;
use snafu::OptionExt;

#[derive(Debug, Deserialize)]
pub struct ShareFeedResponse {
    pub locations: Option<Vec<FeedLocation>>,
}

/// One location entry of the share feed, timestamps are milliseconds since the unix epoch.
#[derive(Debug, Deserialize)]
pub struct FeedLocation {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timestamp: Option<i64>,
    pub speed: Option<MeasuredValue>,
    pub course: Option<f64>,
    pub elevation: Option<MeasuredValue>,
}

#[derive(Debug, Deserialize)]
pub struct MeasuredValue {
    pub value: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct TrackPoint {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl FeedLocation {
    /// Converts the entry into a [`Fix`], speed, course and elevation default to zero while a
    /// missing position or timestamp yields nothing.
    pub fn into_fix(self) -> Option<Fix> {
        Some(Fix {
            latitude: self.latitude?,
            longitude: self.longitude?,
            timestamp: DateTime::from_timestamp_millis(self.timestamp?)?,
            speed: self.speed.and_then(|s| s.value).unwrap_or_default(),
            course: self.course.unwrap_or_default(),
            elevation: self.elevation.and_then(|e| e.value).unwrap_or_default(),
        })
    }
}

/// Parses a share feed body into the fix of its first location entry.
pub fn parse_share_feed(url: &str, body: &str) -> Result<Fix, FetchError> {
    let response: ShareFeedResponse = serde_json::from_str(body).map_err(|e| {
        MalformedResponseSnafu {
            url,
            reason: e.to_string(),
        }
        .build()
    })?;

    let locations = response.locations.context(MalformedResponseSnafu {
        url,
        reason: "missing 'locations'",
    })?;

    locations
        .into_iter()
        .next()
        .and_then(FeedLocation::into_fix)
        .context(MissingLocationSnafu { url })
}

/// Parses a last track body, skipping points without a position.
pub fn parse_last_track(url: &str, body: &str) -> Result<Vec<Coordinate>, FetchError> {
    let points: Vec<TrackPoint> = serde_json::from_str(body).map_err(|e| {
        MalformedResponseSnafu {
            url,
            reason: e.to_string(),
        }
        .build()
    })?;

    Ok(points
        .into_iter()
        .filter_map(|p| Some(Coordinate::new(p.latitude?, p.longitude?)))
        .collect())
}
