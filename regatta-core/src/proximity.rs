use serde::{Deserialize, Serialize};

use crate::{Coordinate, Fix, Vessel, distance_nm, nm_to_meters};

/// Fixed location the fleet's proximity is measured against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ReferencePoint {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl Default for ReferencePoint {
    fn default() -> Self {
        Self::new("Fernando de Noronha", -3.8547, -32.4248)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestVessel {
    pub name: String,
    pub fix: Fix,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProximityResult {
    pub nearest: Option<NearestVessel>,
    /// Infinite when no vessel has a fix.
    pub distance_nm: f64,
}

/// Circle drawn around the vessel nearest to the reference point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProximityCircle {
    pub vessel: String,
    pub center: Coordinate,
    pub radius_meters: f64,
    pub distance_nm: f64,
}

impl ProximityResult {
    pub fn none() -> Self {
        Self {
            nearest: None,
            distance_nm: f64::INFINITY,
        }
    }

    pub fn circle(&self, radius_nm: f64) -> Option<ProximityCircle> {
        self.nearest.as_ref().map(|nearest| ProximityCircle {
            vessel: nearest.name.clone(),
            center: nearest.fix.coordinate(),
            radius_meters: nm_to_meters(radius_nm),
            distance_nm: self.distance_nm,
        })
    }
}

/// Finds the vessel whose last fix is closest to `reference`.
///
/// Vessels without a fix, or whose distance cannot be computed, are ignored. On equal distance
/// the vessel yielded first wins.
pub fn nearest_to<'a>(
    reference: &ReferencePoint,
    vessels: impl IntoIterator<Item = &'a Vessel>,
) -> ProximityResult {
    let origin = reference.coordinate();

    let mut best: Option<(&Vessel, &Fix, f64)> = None;
    for vessel in vessels {
        let Some(fix) = vessel.last_fix() else {
            continue;
        };
        let distance = distance_nm(origin, fix.coordinate());
        if !distance.is_finite() {
            continue;
        }
        if best.is_none_or(|(_, _, min)| distance < min) {
            best = Some((vessel, fix, distance));
        }
    }

    match best {
        Some((vessel, fix, distance_nm)) => ProximityResult {
            nearest: Some(NearestVessel {
                name: vessel.name().to_string(),
                fix: fix.clone(),
            }),
            distance_nm,
        },
        None => ProximityResult::none(),
    }
}
