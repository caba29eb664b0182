//! `SampleBuilder`: advances one sample path a fixed time step at a time.
//!
//! # States
//!
//! ```text
//! Active ──compute_next_point──► Active        (valid step appended)
//!        ──compute_next_point──► Finalized(t)  (distance budget used up at t)
//!        ──compute_next_point──► Finalized(t−Δ) (next point invalid)
//! Finalized ──build──► Sample
//! ```
//!
//! A point is invalid if it leaves the governing rectangle, falls in an
//! exclusion zone, or (with `stay_out_of_water`) lands on water.  The model
//! is deterministic, so an invalid step simply ends the path; from outside,
//! that is indistinguishable from exhausting the distance budget except by
//! the end time reached.

use serde::{Deserialize, Serialize};

use sar_core::{Direction, EpochMs, GeoPoint, GeoRectangle, MS_PER_HOUR};
use sar_geometry::{ExclusionZone, ExclusionZones};
use sar_schedule::MovementSchedule;

use crate::{LandCover, PathBuilder, PathError, PathResult, Sample};

/// A position and the instant it was reached.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointAndTime {
    pub point: GeoPoint,
    pub time:  EpochMs,
}

/// Lifecycle state of a [`SampleBuilder`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BuilderState {
    Active,
    Finalized { end_time: EpochMs },
}

/// Everything outside the builder that a step consults.
#[derive(Clone, Copy, Debug)]
pub struct StepContext<'a> {
    pub schedule:          &'a dyn MovementSchedule,
    pub land:              &'a dyn LandCover,
    pub rect:              &'a GeoRectangle,
    pub zones:             &'a ExclusionZones,
    pub stay_out_of_water: bool,
}

impl StepContext<'_> {
    fn is_valid(&self, p: GeoPoint) -> bool {
        if !self.rect.contains(p) || self.zones.contains_point(p) {
            return false;
        }
        !(self.stay_out_of_water && self.land.is_water(p))
    }
}

#[derive(Clone, Debug)]
pub struct SampleBuilder {
    start_time:     EpochMs,
    time_delta_ms:  i64,
    path:           PathBuilder,
    last:           PointAndTime,
    heading_deg:    f64,
    max_distance_m: f64,
    speed_kph:      f64,
    state:          BuilderState,
}

impl SampleBuilder {
    pub fn new(
        start_time:    EpochMs,
        time_delta_ms: i64,
        start:         GeoPoint,
        heading_deg:   f64,
        distance_km:   f64,
        speed_kph:     f64,
    ) -> Self {
        debug_assert!(time_delta_ms > 0, "time_delta_ms must be > 0");
        Self {
            start_time,
            time_delta_ms,
            path: PathBuilder::starting_at(start),
            last: PointAndTime { point: start, time: start_time },
            heading_deg,
            max_distance_m: distance_km * 1000.0,
            speed_kph,
            state: BuilderState::Active,
        }
    }

    /// Like [`new`](Self::new), heading along a compass direction.
    pub fn with_direction(
        start_time:    EpochMs,
        time_delta_ms: i64,
        start:         GeoPoint,
        direction:     Direction,
        distance_km:   f64,
        speed_kph:     f64,
    ) -> Self {
        Self::new(start_time, time_delta_ms, start, direction.heading_deg(), distance_km, speed_kph)
    }

    #[inline] pub fn state(&self) -> BuilderState { self.state }
    #[inline] pub fn last(&self) -> PointAndTime { self.last }
    #[inline] pub fn path(&self) -> &PathBuilder { &self.path }
    #[inline] pub fn heading_deg(&self) -> f64 { self.heading_deg }

    #[inline]
    pub fn is_finalized(&self) -> bool {
        matches!(self.state, BuilderState::Finalized { .. })
    }

    /// `true` once finalized and `t` is at or past the end time.
    pub fn reached_logical_end(&self, t: EpochMs) -> bool {
        match self.state {
            BuilderState::Active => false,
            BuilderState::Finalized { end_time } => t >= end_time,
        }
    }

    /// Advance to `t`, which must be exactly one time delta after the last
    /// step.  A finalized builder ignores further steps.
    pub fn compute_next_point(&mut self, t: EpochMs, ctx: &StepContext<'_>) -> PathResult<()> {
        if self.is_finalized() {
            return Ok(());
        }
        let prev = self.last;
        let expected = prev.time + self.time_delta_ms;
        if t != expected {
            return Err(PathError::InvalidStep { expected, got: t });
        }

        let moving_ms = ctx.schedule.time_spent_moving(prev.time, t)?;
        let moving_hours = moving_ms as f64 / MS_PER_HOUR as f64;
        let step_m = 1000.0 * self.speed_kph * moving_hours * ctx.land.speed_of_advance(prev.point);

        let remaining_m = self.max_distance_m - self.path.length_m();
        if step_m < remaining_m {
            let next = prev.point.displaced(self.heading_deg, step_m);
            if ctx.is_valid(next) {
                self.accept(next, t);
            } else {
                self.finalize(prev.time);
            }
            return Ok(());
        }

        // Budget exhausted: move exactly the remainder and stop.
        let next = prev.point.displaced(self.heading_deg, remaining_m.max(0.0));
        if ctx.is_valid(next) {
            self.accept(next, t);
            self.finalize(t);
        } else {
            self.finalize(prev.time);
        }
        Ok(())
    }

    /// Finalize at the last accepted step, regardless of remaining budget.
    /// No-op once finalized.
    pub fn stop(&mut self) {
        if !self.is_finalized() {
            self.finalize(self.last.time);
        }
    }

    /// Finish the sample.  Fails with [`PathError::NotFinalized`] while the
    /// builder is still active.
    pub fn build(self) -> PathResult<Sample> {
        if !self.is_finalized() {
            return Err(PathError::NotFinalized);
        }
        Sample::new(self.start_time, self.time_delta_ms, self.path.into_points())
    }

    fn accept(&mut self, p: GeoPoint, t: EpochMs) {
        self.path.append_point(p);
        self.last = PointAndTime { point: p, time: t };
    }

    fn finalize(&mut self, end_time: EpochMs) {
        log::trace!("sample path finalized at {end_time} after {:.0} m", self.path.length_m());
        self.state = BuilderState::Finalized { end_time };
    }
}
