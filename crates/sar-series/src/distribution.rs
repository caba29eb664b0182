//! Hourly probability-distribution series and off-grid queries against it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sar_core::EpochMs;
use sar_grid::{ProbabilityDistribution, ValidationInfo};

use crate::blend::{Blend, blend_at};
use crate::SeriesResult;

impl Blend for ProbabilityDistribution {
    fn blend(before: &Self, w_before: f64, after: &Self, w_after: f64) -> SeriesResult<Self> {
        Ok(before.scaled(w_before).added(&after.scaled(w_after))?)
    }

    fn restamp(self, t: EpochMs) -> Self {
        self.with_time(t)
    }
}

/// The distribution at `t` from a keyed series.
///
/// Fails with `SeriesError::Empty` on an empty series, and with a grid error
/// if the two bracketing distributions cover different rectangles.
pub fn interpolate_distribution(
    series: &BTreeMap<EpochMs, ProbabilityDistribution>,
    t:      EpochMs,
) -> SeriesResult<ProbabilityDistribution> {
    blend_at(series, t)
}

/// Distributions keyed by their timestamp.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionSeries {
    by_time: BTreeMap<EpochMs, ProbabilityDistribution>,
}

impl DistributionSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `d` under its own timestamp, replacing any previous entry.
    pub fn insert(&mut self, d: ProbabilityDistribution) -> Option<ProbabilityDistribution> {
        self.by_time.insert(d.time(), d)
    }

    #[inline] pub fn len(&self) -> usize { self.by_time.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.by_time.is_empty() }
    #[inline] pub fn as_map(&self) -> &BTreeMap<EpochMs, ProbabilityDistribution> { &self.by_time }

    pub fn get(&self, t: EpochMs) -> Option<&ProbabilityDistribution> {
        self.by_time.get(&t)
    }

    pub fn times(&self) -> impl Iterator<Item = EpochMs> + '_ {
        self.by_time.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProbabilityDistribution> + '_ {
        self.by_time.values()
    }

    pub fn first_time(&self) -> Option<EpochMs> {
        self.by_time.keys().next().copied()
    }

    pub fn last_time(&self) -> Option<EpochMs> {
        self.by_time.keys().next_back().copied()
    }

    pub fn at(&self, t: EpochMs) -> SeriesResult<ProbabilityDistribution> {
        interpolate_distribution(&self.by_time, t)
    }

    /// Findings for every distribution, labelled by time.
    pub fn validate(&self) -> ValidationInfo {
        let mut info = ValidationInfo::new();
        for d in self.by_time.values() {
            info.merge(d.validate());
        }
        info
    }
}

impl FromIterator<ProbabilityDistribution> for DistributionSeries {
    fn from_iter<I: IntoIterator<Item = ProbabilityDistribution>>(iter: I) -> Self {
        let mut s = Self::new();
        for d in iter {
            s.insert(d);
        }
        s
    }
}
