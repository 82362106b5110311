use std::f64::consts::PI;

use geo::{Distance, HaversineMeasure, Point};
use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
pub const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;

const EARTH: HaversineMeasure = HaversineMeasure::new(EARTH_RADIUS_METERS);
const HALF_CIRCUMFERENCE_METERS: f64 = PI * EARTH_RADIUS_METERS;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl From<Coordinate> for Point {
    fn from(c: Coordinate) -> Self {
        Point::new(c.longitude, c.latitude)
    }
}

/// Great-circle distance between two points in nautical miles, using the haversine formula on a
/// spherical earth.
pub fn distance_nm(a: Coordinate, b: Coordinate) -> f64 {
    let meters = EARTH.distance(Point::from(a), Point::from(b));

    // Rounding can push near-antipodal points past the half circumference and yield NaN.
    let meters = if a.is_finite() && b.is_finite() {
        meters.min(HALF_CIRCUMFERENCE_METERS)
    } else {
        meters
    };

    meters / METERS_PER_NAUTICAL_MILE
}

pub fn nm_to_meters(nm: f64) -> f64 {
    nm * METERS_PER_NAUTICAL_MILE
}
