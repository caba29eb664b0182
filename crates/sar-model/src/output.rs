//! `ModelOutput`: what a model run hands to the planning layer.

use serde::{Deserialize, Serialize};

use sar_core::{EpochMs, LpiId};
use sar_grid::{ProbabilityDistribution, ValidationInfo};
use sar_path::TimeAwarePath;
use sar_series::DistributionSeries;

use crate::ModelResult;

/// Hourly distributions without and with searches, plus the sample paths
/// they were derived from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    lpi_id:        LpiId,
    model_name:    String,
    generated_at:  EpochMs,
    initial:       DistributionSeries,
    with_searches: DistributionSeries,
    paths:         Vec<TimeAwarePath>,
}

impl ModelOutput {
    /// A new output whose with-searches series is empty.
    pub fn new(
        lpi_id:     LpiId,
        model_name: impl Into<String>,
        initial:    DistributionSeries,
        paths:      Vec<TimeAwarePath>,
    ) -> Self {
        Self {
            lpi_id,
            model_name: model_name.into(),
            generated_at: EpochMs::now(),
            initial,
            with_searches: DistributionSeries::new(),
            paths,
        }
    }

    #[inline] pub fn lpi_id(&self) -> LpiId { self.lpi_id }
    #[inline] pub fn model_name(&self) -> &str { &self.model_name }
    #[inline] pub fn generated_at(&self) -> EpochMs { self.generated_at }
    #[inline] pub fn initial(&self) -> &DistributionSeries { &self.initial }
    #[inline] pub fn with_searches(&self) -> &DistributionSeries { &self.with_searches }
    #[inline] pub fn paths(&self) -> &[TimeAwarePath] { &self.paths }

    /// With no searches applied the two series coincide.
    pub fn copy_initial_to_with_searches(&mut self) {
        self.with_searches = self.initial.clone();
    }

    /// A copy of `self` carrying `series` as its with-searches distributions
    /// and a fresh generation timestamp.
    pub fn with_new_searches(&self, series: DistributionSeries) -> Self {
        Self {
            with_searches: series,
            generated_at: EpochMs::now(),
            ..self.clone()
        }
    }

    /// The with-searches distribution at `t`, interpolated between hours.
    pub fn distribution_at(&self, t: EpochMs) -> ModelResult<ProbabilityDistribution> {
        Ok(self.with_searches.at(t)?)
    }

    /// Structural findings plus every distribution's own findings.
    pub fn validate(&self) -> ValidationInfo {
        let mut info = ValidationInfo::new();
        if self.model_name.is_empty() {
            info.add_error("Missing model name");
        }
        if self.lpi_id.is_nil() {
            info.add_error("Missing lpiId");
        }
        if self.initial.is_empty() {
            info.add_error("No initial distribution");
        } else {
            info.merge(self.initial.validate());
        }
        if self.with_searches.is_empty() {
            info.add_error("No distribution with searches");
        } else {
            info.merge(self.with_searches.validate());
        }
        info
    }
}
