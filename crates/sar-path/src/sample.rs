//! `Sample`: one finished, time-resolved trajectory.
//!
//! Point `i` is the position at `start_time + i · time_delta_ms`.  Between
//! points the position is interpolated linearly in latitude and longitude.
//! An optional quitting time freezes the position from that instant on.

use serde::{Deserialize, Serialize};

use sar_core::{EpochMs, GeoPoint};

use crate::{PathError, PathResult, PointAndTime, TimeAwarePath};

/// Deserialization re-runs [`Sample::new`]; `end_time` is recomputed from
/// the points rather than trusted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSample")]
pub struct Sample {
    start_time:    EpochMs,
    end_time:      EpochMs,
    time_delta_ms: i64,
    quitting_time: EpochMs,
    points:        Vec<GeoPoint>,
    /// Per-step resource-level change; empty unless a model tracks it.
    resource_level_change: Vec<f64>,
}

#[derive(Deserialize)]
struct RawSample {
    start_time:    EpochMs,
    time_delta_ms: i64,
    quitting_time: EpochMs,
    points:        Vec<GeoPoint>,
    #[serde(default)]
    resource_level_change: Vec<f64>,
}

impl TryFrom<RawSample> for Sample {
    type Error = PathError;

    fn try_from(raw: RawSample) -> PathResult<Self> {
        let mut sample = Sample::new(raw.start_time, raw.time_delta_ms, raw.points)?;
        sample.quitting_time = raw.quitting_time;
        sample.resource_level_change = raw.resource_level_change;
        Ok(sample)
    }
}

impl Sample {
    pub fn new(start_time: EpochMs, time_delta_ms: i64, points: Vec<GeoPoint>) -> PathResult<Self> {
        if points.is_empty() {
            return Err(PathError::EmptyPath);
        }
        if time_delta_ms <= 0 {
            return Err(PathError::InvalidSample(format!("time delta {time_delta_ms} ms must be positive")));
        }
        let end_time = start_time + (points.len() as i64 - 1) * time_delta_ms;
        Ok(Self {
            start_time,
            end_time,
            time_delta_ms,
            quitting_time: EpochMs::MAX,
            points,
            resource_level_change: Vec::new(),
        })
    }

    /// Freeze the position `relative_ms` after the start.
    pub fn with_quitting_time_relative(mut self, relative_ms: i64) -> Self {
        self.quitting_time = self.start_time + relative_ms;
        self
    }

    pub fn with_resource_level_change(mut self, change: Vec<f64>) -> Self {
        self.resource_level_change = change;
        self
    }

    #[inline] pub fn start_time(&self) -> EpochMs { self.start_time }
    #[inline] pub fn end_time(&self) -> EpochMs { self.end_time }
    #[inline] pub fn time_delta_ms(&self) -> i64 { self.time_delta_ms }
    #[inline] pub fn quitting_time(&self) -> EpochMs { self.quitting_time }
    #[inline] pub fn points(&self) -> &[GeoPoint] { &self.points }
    #[inline] pub fn resource_level_change(&self) -> &[f64] { &self.resource_level_change }

    /// Position at `t`.
    pub fn location(&self, t: EpochMs) -> GeoPoint {
        let t = t.min(self.quitting_time);
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if t <= self.start_time {
            return first;
        }
        if t >= self.end_time {
            return last;
        }
        let (i0, i1) = self.bracket(t);
        let beta = ((t - self.start_time) % self.time_delta_ms) as f64 / self.time_delta_ms as f64;
        let (p0, p1) = (self.points[i0], self.points[i1]);
        GeoPoint::new(
            (1.0 - beta) * p0.lat + beta * p1.lat,
            (1.0 - beta) * p0.lon + beta * p1.lon,
        )
    }

    /// Positions at `start, start + step, …` up to and including `end`.
    pub fn locations(&self, start: EpochMs, end: EpochMs, step_ms: i64) -> PathResult<Vec<GeoPoint>> {
        if step_ms <= 0 {
            return Err(PathError::InvalidSample(format!("location step {step_ms} ms must be positive")));
        }
        let mut out = Vec::new();
        let mut t = start;
        while t <= end {
            out.push(self.location(t));
            t += step_ms;
        }
        Ok(out)
    }

    pub fn locations_at(&self, times: &[EpochMs]) -> Vec<GeoPoint> {
        times.iter().map(|t| self.location(*t)).collect()
    }

    /// `true` if the step containing `t` changes position.  Always `false`
    /// at or outside the sample's time span.
    pub fn is_moving(&self, t: EpochMs) -> bool {
        if t <= self.start_time || t >= self.end_time {
            return false;
        }
        let (i0, i1) = self.bracket(t);
        self.points[i0] != self.points[i1]
    }

    /// Ground speed during the step containing `t`, metres per second.
    pub fn speed_mps(&self, t: EpochMs) -> f64 {
        if t <= self.start_time || t >= self.end_time {
            return 0.0;
        }
        let (i0, i1) = self.bracket(t);
        self.points[i0].distance_m(self.points[i1]) / (self.time_delta_ms as f64 / 1000.0)
    }

    /// The same trajectory with each point stamped with the instant it was
    /// reached.  Ignores the quitting time.
    pub fn to_time_aware(&self) -> TimeAwarePath {
        let anchors = self
            .points
            .iter()
            .enumerate()
            .map(|(i, &point)| PointAndTime { point, time: self.start_time + i as i64 * self.time_delta_ms })
            .collect();
        TimeAwarePath { anchors }
    }

    /// Indices of the points bracketing `t`; `start_time < t < end_time`.
    #[inline]
    fn bracket(&self, t: EpochMs) -> (usize, usize) {
        let i0 = ((t - self.start_time) / self.time_delta_ms) as usize;
        let i1 = (i0 + 1).min(self.points.len() - 1);
        (i0, i1)
    }
}
