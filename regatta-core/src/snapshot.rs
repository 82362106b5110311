use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    Color, Coordinate, Fix, Fleet, ProximityCircle, ProximityResult, ReferencePoint, Vessel,
};

/// Everything a map dashboard needs to draw one refresh cycle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSnapshot {
    pub taken_at: DateTime<Utc>,
    pub reference_point: ReferencePoint,
    pub vessels: Vec<VesselSnapshot>,
    pub proximity: ProximityResult,
    pub proximity_circle: Option<ProximityCircle>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselSnapshot {
    pub name: String,
    pub share_id: String,
    pub color: Color,
    pub history: Vec<Coordinate>,
    pub last_fix: Option<Fix>,
    pub last_fetched_at: Option<DateTime<Utc>>,
    pub track: Vec<Coordinate>,
}

impl FleetSnapshot {
    pub fn new(fleet: &Fleet, reference_point: &ReferencePoint, proximity_radius_nm: f64) -> Self {
        let proximity = fleet.nearest_to(reference_point);
        let proximity_circle = proximity.circle(proximity_radius_nm);

        Self {
            taken_at: Utc::now(),
            reference_point: reference_point.clone(),
            vessels: fleet.vessels().iter().map(VesselSnapshot::from).collect(),
            proximity,
            proximity_circle,
        }
    }
}

impl From<&Vessel> for VesselSnapshot {
    fn from(v: &Vessel) -> Self {
        Self {
            name: v.name().to_string(),
            share_id: v.share_id().to_string(),
            color: v.color(),
            history: v.history().to_vec(),
            last_fix: v.last_fix().cloned(),
            last_fetched_at: v.last_fetched_at(),
            track: v.track().to_vec(),
        }
    }
}
