//! Result of a search-evaluation query: a grid or a sample-point cloud,
//! depending on which representation the model keeps.

use serde::{Deserialize, Serialize};

use sar_core::{EpochMs, GeoRectangle, LpiId};

use crate::{DistributionBySamplePoints, GridSpec, ProbabilityDistribution};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DistOrMap {
    Grid(ProbabilityDistribution),
    SamplePoints(DistributionBySamplePoints),
}

impl DistOrMap {
    pub fn as_grid(&self) -> Option<&ProbabilityDistribution> {
        match self {
            DistOrMap::Grid(d) => Some(d),
            DistOrMap::SamplePoints(_) => None,
        }
    }

    pub fn as_sample_points(&self) -> Option<&DistributionBySamplePoints> {
        match self {
            DistOrMap::SamplePoints(s) => Some(s),
            DistOrMap::Grid(_) => None,
        }
    }

    /// A grid view, binning sample points over `rect` if necessary.
    pub fn into_distribution(
        self,
        lpi_id: LpiId,
        time:   EpochMs,
        rect:   GeoRectangle,
        spec:   GridSpec,
    ) -> ProbabilityDistribution {
        match self {
            DistOrMap::Grid(d) => d,
            DistOrMap::SamplePoints(s) => s.to_distribution(lpi_id, time, rect, spec),
        }
    }

    /// Total mass in whichever representation is held.
    pub fn total_mass(&self) -> f64 {
        match self {
            DistOrMap::Grid(d) => d.map().total(),
            DistOrMap::SamplePoints(s) => s.total_weight(),
        }
    }
}

impl From<ProbabilityDistribution> for DistOrMap {
    fn from(d: ProbabilityDistribution) -> Self {
        DistOrMap::Grid(d)
    }
}

impl From<DistributionBySamplePoints> for DistOrMap {
    fn from(s: DistributionBySamplePoints) -> Self {
        DistOrMap::SamplePoints(s)
    }
}
