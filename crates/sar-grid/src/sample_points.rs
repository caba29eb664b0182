//! Sample-point distributions: relative weights on individual points.
//!
//! Finer-grained than a grid; search evaluation reweights the points
//! directly and only bins them when a grid is needed.

use serde::{Deserialize, Serialize};

use sar_core::{EpochMs, GeoPoint, GeoRectangle, LpiId};

use crate::{ContainmentMap, GridError, GridResult, GridSpec, ProbabilityDistribution};

/// One point and its relative weight.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightedPoint {
    pub point:  GeoPoint,
    pub weight: f64,
}

impl WeightedPoint {
    #[inline]
    pub fn new(point: GeoPoint, weight: f64) -> Self {
        Self { point, weight }
    }
}

/// Parallel lists of points and weights.  Weights are relative and need not
/// sum to 1.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionBySamplePoints {
    points:  Vec<GeoPoint>,
    weights: Vec<f64>,
}

impl DistributionBySamplePoints {
    pub fn new(points: Vec<GeoPoint>, weights: Vec<f64>) -> GridResult<Self> {
        if points.len() != weights.len() {
            return Err(GridError::LengthMismatch { points: points.len(), weights: weights.len() });
        }
        Ok(Self { points, weights })
    }

    pub fn from_weighted(items: impl IntoIterator<Item = WeightedPoint>) -> Self {
        let (points, weights) = items.into_iter().map(|wp| (wp.point, wp.weight)).unzip();
        Self { points, weights }
    }

    #[inline] pub fn points(&self) -> &[GeoPoint] { &self.points }
    #[inline] pub fn weights(&self) -> &[f64] { &self.weights }
    #[inline] pub fn len(&self) -> usize { self.points.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.points.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = WeightedPoint> + '_ {
        self.points.iter().zip(&self.weights).map(|(p, w)| WeightedPoint::new(*p, *w))
    }

    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Points (with weights) lying inside `rect`.
    pub fn region(&self, rect: &GeoRectangle) -> Vec<WeightedPoint> {
        self.iter().filter(|wp| rect.contains(wp.point)).collect()
    }

    /// Bin into a containment map over `rect`.
    pub fn to_containment_map(&self, rect: GeoRectangle, spec: GridSpec) -> ContainmentMap {
        // points.len() == weights.len() is a construction invariant.
        ContainmentMap::aggregate(rect, spec, &self.points, &self.weights)
            .unwrap_or_else(|_| ContainmentMap::zeros(rect, spec))
    }

    /// Bin into a distribution over `rect` owned by `lpi_id` at `time`.
    pub fn to_distribution(
        &self,
        lpi_id: LpiId,
        time:   EpochMs,
        rect:   GeoRectangle,
        spec:   GridSpec,
    ) -> ProbabilityDistribution {
        ProbabilityDistribution::new(lpi_id, time, self.to_containment_map(rect, spec))
    }
}
