//! `StraightLineModel`: every sample path heads the same way at the same
//! speed from its own start point.
//!
//! # Run loop
//!
//! ```text
//! t = start
//! while any builder is active:
//!     t += Δ
//!     step every active builder to t          (parallel with `parallel`)
//!     builders that reached their logical end → Sample
//!     past the horizon: stop whatever is left
//! hourly from start to the latest sample end → ProbabilityDistribution
//! ```

use std::sync::Arc;

use sar_core::{EpochMs, GeoPoint, GeoRectangle, LpiId, MS_PER_HOUR, StepClock};
use sar_geometry::ExclusionZones;
use sar_grid::{GridSpec, ProbabilityDistribution};
use sar_path::{LandCover, Sample, SampleBuilder, StepContext};
use sar_schedule::MovementSchedule;
use sar_series::DistributionSeries;

use crate::{ModelOutput, ModelParams, ModelResult, ProgressSink, SampleSet};

/// Output of one run: the distributions for the planner and the samples
/// that later search operations need.
#[derive(Clone, Debug)]
pub struct ModelRun {
    pub output:  ModelOutput,
    pub samples: SampleSet,
}

/// A validated, ready-to-run model.  Build with [`ModelBuilder`][crate::ModelBuilder].
#[derive(Debug)]
pub struct StraightLineModel {
    pub(crate) name:         String,
    pub(crate) lpi_id:       LpiId,
    pub(crate) start_time:   EpochMs,
    pub(crate) start_points: Vec<GeoPoint>,
    pub(crate) rect:         GeoRectangle,
    pub(crate) spec:         GridSpec,
    pub(crate) schedule:     Arc<dyn MovementSchedule>,
    pub(crate) land:         Arc<dyn LandCover>,
    pub(crate) zones:        ExclusionZones,
    pub(crate) params:       ModelParams,
}

impl StraightLineModel {
    #[inline] pub fn name(&self) -> &str { &self.name }
    #[inline] pub fn lpi_id(&self) -> LpiId { self.lpi_id }
    #[inline] pub fn params(&self) -> &ModelParams { &self.params }
    #[inline] pub fn rect(&self) -> &GeoRectangle { &self.rect }

    /// Simulate every sample path to its end and assemble the hourly series.
    pub fn run(&self, sink: &mut dyn ProgressSink) -> ModelResult<ModelRun> {
        sink.on_start(self.lpi_id, self.start_points.len());
        let samples = self.simulate(sink)?;
        let set = SampleSet::new(self.lpi_id, self.rect, self.spec, samples);

        let initial = self.hourly_distributions(&set)?;
        let paths = set.samples().iter().map(Sample::to_time_aware).collect();
        let mut output = ModelOutput::new(self.lpi_id, self.name.clone(), initial, paths);
        output.copy_initial_to_with_searches();

        sink.status(&format!("{}: finished computing.", self.name));
        sink.on_finish(self.lpi_id, output.initial().len());
        Ok(ModelRun { output, samples: set })
    }

    fn simulate(&self, sink: &mut dyn ProgressSink) -> ModelResult<Vec<Sample>> {
        let p = &self.params;
        let ctx = StepContext {
            schedule:          self.schedule.as_ref(),
            land:              self.land.as_ref(),
            rect:              &self.rect,
            zones:             &self.zones,
            stay_out_of_water: p.stay_out_of_water,
        };
        let horizon = self.start_time + p.max_duration_ms;

        let mut active: Vec<(usize, SampleBuilder)> = self
            .start_points
            .iter()
            .enumerate()
            .map(|(i, &pt)| {
                let b = SampleBuilder::with_direction(
                    self.start_time, p.time_delta_ms, pt, p.direction, p.distance_km, p.speed_kph,
                );
                (i, b)
            })
            .collect();
        let mut finished: Vec<Option<Sample>> = vec![None; active.len()];

        let mut clock = StepClock::new(self.start_time, p.time_delta_ms);
        while !active.is_empty() {
            let t = clock.advance();
            step_all(&mut active, t, &ctx)?;

            if t >= horizon {
                let (d, h, m) = clock.elapsed_dhm();
                log::warn!(
                    "{}: {} paths still moving after {d}d {h}h {m}m; stopping them",
                    self.lpi_id,
                    active.len(),
                );
                active.iter_mut().for_each(|(_, b)| b.stop());
            }

            let mut still_active = Vec::with_capacity(active.len());
            for (i, b) in active {
                if b.reached_logical_end(t) {
                    finished[i] = Some(b.build()?);
                } else {
                    still_active.push((i, b));
                }
            }
            active = still_active;
            sink.on_step(t, active.len());
        }

        Ok(finished.into_iter().flatten().collect())
    }

    fn hourly_distributions(&self, set: &SampleSet) -> ModelResult<DistributionSeries> {
        let end = set.end_time().unwrap_or(self.start_time);
        let mut series = DistributionSeries::new();
        let mut hours = StepClock::new(self.start_time, MS_PER_HOUR);
        let mut t = hours.now();
        while t <= end {
            let d = ProbabilityDistribution::from_points(self.lpi_id, t, self.rect, self.spec, &set.locations_at(t))?;
            series.insert(d);
            t = hours.advance();
        }
        log::debug!("{}: {} hourly distributions", self.lpi_id, series.len());
        Ok(series)
    }
}

#[cfg(not(feature = "parallel"))]
fn step_all(active: &mut [(usize, SampleBuilder)], t: EpochMs, ctx: &StepContext<'_>) -> ModelResult<()> {
    active.iter_mut().try_for_each(|(_, b)| b.compute_next_point(t, ctx))?;
    Ok(())
}

#[cfg(feature = "parallel")]
fn step_all(active: &mut [(usize, SampleBuilder)], t: EpochMs, ctx: &StepContext<'_>) -> ModelResult<()> {
    use rayon::prelude::*;

    active.par_iter_mut().try_for_each(|(_, b)| b.compute_next_point(t, ctx))?;
    Ok(())
}
