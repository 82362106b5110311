use std::num::NonZeroUsize;

use snafu::OptionExt;
use tracing::{info, instrument};

use crate::{
    ColorPolicy, FetchOutcome, FleetSnapshot, PALETTE, PositionFetcher, PositionSource,
    ProximityResult, ReferencePoint, RegistryError, Vessel, color_for, nearest_to,
    registry_error::{DuplicateVesselSnafu, InvalidShareUrlSnafu, PaletteExhaustedSnafu},
    share_id_from_url,
};

/// Outcome of refreshing one vessel during a refresh cycle.
#[derive(Debug)]
pub struct VesselRefresh {
    pub vessel: String,
    pub outcome: FetchOutcome,
}

/// The set of tracked vessels in registration order.
#[derive(Debug, Clone)]
pub struct Fleet {
    vessels: Vec<Vessel>,
    history_capacity: NonZeroUsize,
    color_policy: ColorPolicy,
}

impl Fleet {
    pub fn new(history_capacity: NonZeroUsize, color_policy: ColorPolicy) -> Self {
        Self {
            vessels: Vec::new(),
            history_capacity,
            color_policy,
        }
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        share_url: &str,
    ) -> Result<&Vessel, RegistryError> {
        let name = name.into();

        let share_id =
            share_id_from_url(share_url).context(InvalidShareUrlSnafu { url: share_url })?;

        if self.get(&name).is_some() {
            return DuplicateVesselSnafu { name }.fail();
        }

        let index = self.vessels.len();
        if self.color_policy == ColorPolicy::Unique && index >= PALETTE.len() {
            return PaletteExhaustedSnafu {
                name,
                palette_size: PALETTE.len(),
            }
            .fail();
        }

        let color = color_for(index);
        info!(vessel = %name, share_id, %color, "registered vessel");

        self.vessels.push(Vessel::new(name, share_id, color, self.history_capacity));
        Ok(&self.vessels[index])
    }

    pub fn vessels(&self) -> &[Vessel] {
        &self.vessels
    }

    pub fn get(&self, name: &str) -> Option<&Vessel> {
        self.vessels.iter().find(|v| v.name() == name)
    }

    pub fn len(&self) -> usize {
        self.vessels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vessels.is_empty()
    }

    /// Fetches every vessel in registration order, one after the other.
    #[instrument(skip_all, fields(app.num_vessels = self.vessels.len(), app.num_fresh))]
    pub async fn refresh_all<S: PositionSource>(
        &mut self,
        fetcher: &PositionFetcher<S>,
    ) -> Vec<VesselRefresh> {
        let mut refreshes = Vec::with_capacity(self.vessels.len());

        for vessel in &mut self.vessels {
            let outcome = fetcher.fetch(vessel).await;
            refreshes.push(VesselRefresh {
                vessel: vessel.name().to_string(),
                outcome,
            });
        }

        let num_fresh = refreshes.iter().filter(|r| r.outcome.is_fresh()).count();
        tracing::Span::current().record("app.num_fresh", num_fresh);

        refreshes
    }

    pub fn nearest_to(&self, reference: &ReferencePoint) -> ProximityResult {
        nearest_to(reference, &self.vessels)
    }

    pub fn snapshot(&self, reference: &ReferencePoint, proximity_radius_nm: f64) -> FleetSnapshot {
        FleetSnapshot::new(self, reference, proximity_radius_nm)
    }
}
