//! `ProbabilityDistribution`: a containment map owned by one lost-person
//! instance at one instant.
//!
//! Arithmetic never mutates: `scaled` and `added` return new distributions
//! carrying `self`'s owner and timestamp.

use serde::{Deserialize, Serialize};

use sar_core::{EpochMs, GeoPoint, GeoRectangle, LpiId};

use crate::{ContainmentMap, GridError, GridResult, GridSpec, ValidationInfo};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityDistribution {
    lpi_id: LpiId,
    time:   EpochMs,
    map:    ContainmentMap,
}

impl ProbabilityDistribution {
    pub fn new(lpi_id: LpiId, time: EpochMs, map: ContainmentMap) -> Self {
        Self { lpi_id, time, map }
    }

    /// All-zero distribution over `rect`.
    pub fn zeros(lpi_id: LpiId, time: EpochMs, rect: GeoRectangle, spec: GridSpec) -> Self {
        Self::new(lpi_id, time, ContainmentMap::zeros(rect, spec))
    }

    /// Equal weight `1 / n` on each of `points`.
    pub fn from_points(
        lpi_id: LpiId,
        time:   EpochMs,
        rect:   GeoRectangle,
        spec:   GridSpec,
        points: &[GeoPoint],
    ) -> GridResult<Self> {
        let w = if points.is_empty() { 0.0 } else { 1.0 / points.len() as f64 };
        let weights = vec![w; points.len()];
        Self::from_weighted_points(lpi_id, time, rect, spec, points, &weights)
    }

    /// Sum `weights` into the cells holding `points`.  Points outside `rect`
    /// are ignored.
    pub fn from_weighted_points(
        lpi_id:  LpiId,
        time:    EpochMs,
        rect:    GeoRectangle,
        spec:    GridSpec,
        points:  &[GeoPoint],
        weights: &[f64],
    ) -> GridResult<Self> {
        let map = ContainmentMap::aggregate(rect, spec, points, weights)?;
        Ok(Self::new(lpi_id, time, map))
    }

    #[inline] pub fn lpi_id(&self) -> LpiId { self.lpi_id }
    #[inline] pub fn time(&self) -> EpochMs { self.time }
    #[inline] pub fn map(&self) -> &ContainmentMap { &self.map }
    #[inline] pub fn rect(&self) -> &GeoRectangle { self.map.rect() }
    #[inline] pub fn cells(&self) -> &[Vec<f64>] { self.map.cells() }

    pub fn into_map(self) -> ContainmentMap {
        self.map
    }

    /// The same distribution stamped with a different time.
    pub fn with_time(mut self, time: EpochMs) -> Self {
        self.time = time;
        self
    }

    pub fn scaled(&self, k: f64) -> Self {
        Self::new(self.lpi_id, self.time, self.map.scaled(k))
    }

    /// Cell-wise sum.  Fails with [`GridError::IncompatibleGeometry`] unless
    /// both cover the identical rectangle.
    pub fn added(&self, other: &ProbabilityDistribution) -> GridResult<Self> {
        if self.rect() != other.rect() {
            return Err(GridError::IncompatibleGeometry { left: *self.rect(), right: *other.rect() });
        }
        Ok(Self::new(self.lpi_id, self.time, self.map.added(&other.map)?))
    }

    pub fn validate(&self) -> ValidationInfo {
        self.map.validate_as(&format!("distribution at {}", self.time))
    }
}
