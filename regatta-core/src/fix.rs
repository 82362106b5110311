use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Coordinate;

/// A single reported position of a vessel.
///
/// Fixes are only produced from a complete provider location entry, a failed or partial entry
/// never yields a `Fix`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fix {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
    /// Speed over ground in knots.
    pub speed: f64,
    /// Course over ground in degrees.
    pub course: f64,
    /// Elevation in meters.
    pub elevation: f64,
}

impl Fix {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
