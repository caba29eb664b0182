//! Paths whose anchor points carry their own, irregular timestamps.
//!
//! A [`Sample`][crate::Sample] places point `i` at a fixed multiple of its
//! time delta.  A [`TimeAwarePath`] instead records the instant each anchor
//! was reached; anchor times strictly increase.  [`StationaryPath`] covers the
//! model in which the person does not move at all.

use serde::{Deserialize, Serialize};

use sar_core::{EpochMs, GeoPoint};

use crate::{PathBuilder, PathError, PathResult, PointAndTime};

// ── TimeAwarePathBuilder ──────────────────────────────────────────────────────

/// Mutable counterpart of [`TimeAwarePath`].  Length is tracked by the inner
/// [`PathBuilder`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeAwarePathBuilder {
    path:  PathBuilder,
    times: Vec<EpochMs>,
}

impl TimeAwarePathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(point: GeoPoint, time: EpochMs) -> Self {
        Self { path: PathBuilder::starting_at(point), times: vec![time] }
    }

    /// Fails with `OutOfOrder` unless anchor times strictly increase.
    pub fn from_anchors(anchors: &[PointAndTime]) -> PathResult<Self> {
        let mut b = Self::new();
        for a in anchors {
            b.append_point(a.point, a.time)?;
        }
        Ok(b)
    }

    pub fn append_point(&mut self, point: GeoPoint, time: EpochMs) -> PathResult<()> {
        if let Some(&last) = self.times.last() {
            if time <= last {
                return Err(PathError::OutOfOrder { neighbour: last, got: time });
            }
        }
        self.path.append_point(point);
        self.times.push(time);
        Ok(())
    }

    pub fn prepend_point(&mut self, point: GeoPoint, time: EpochMs) -> PathResult<()> {
        if let Some(&first) = self.times.first() {
            if time >= first {
                return Err(PathError::OutOfOrder { neighbour: first, got: time });
            }
        }
        self.path.prepend_point(point);
        self.times.insert(0, time);
        Ok(())
    }

    /// Append every anchor of `other`, which must start after this path ends.
    pub fn append_path(&mut self, other: &TimeAwarePathBuilder) -> PathResult<()> {
        if let (Some(&last), Some(&first)) = (self.times.last(), other.times.first()) {
            if first <= last {
                return Err(PathError::OutOfOrder { neighbour: last, got: first });
            }
        }
        self.path.append_path(&other.path);
        self.times.extend_from_slice(&other.times);
        Ok(())
    }

    pub fn remove_point(&mut self, index: usize) -> Option<PointAndTime> {
        let point = self.path.remove_point(index)?;
        let time = self.times.remove(index);
        Some(PointAndTime { point, time })
    }

    #[inline] pub fn length_m(&self) -> f64 { self.path.length_m() }
    #[inline] pub fn len(&self) -> usize { self.times.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.times.is_empty() }

    pub fn last_point(&self) -> Option<GeoPoint> {
        self.path.last_point()
    }

    pub fn build(self) -> PathResult<TimeAwarePath> {
        if self.times.is_empty() {
            return Err(PathError::EmptyPath);
        }
        let anchors = self
            .path
            .into_points()
            .into_iter()
            .zip(self.times)
            .map(|(point, time)| PointAndTime { point, time })
            .collect();
        Ok(TimeAwarePath { anchors })
    }
}

// ── TimeAwarePath ─────────────────────────────────────────────────────────────

/// Non-empty, strictly time-ordered anchors.  Deserialization re-checks both.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeAwarePath")]
pub struct TimeAwarePath {
    pub(crate) anchors: Vec<PointAndTime>,
}

#[derive(Deserialize)]
struct RawTimeAwarePath {
    anchors: Vec<PointAndTime>,
}

impl TryFrom<RawTimeAwarePath> for TimeAwarePath {
    type Error = PathError;

    fn try_from(raw: RawTimeAwarePath) -> PathResult<Self> {
        TimeAwarePathBuilder::from_anchors(&raw.anchors)?.build()
    }
}

impl TimeAwarePath {
    #[inline] pub fn anchors(&self) -> &[PointAndTime] { &self.anchors }

    pub fn start_time(&self) -> EpochMs {
        self.anchors.first().map(|a| a.time).unwrap_or_default()
    }

    pub fn end_time(&self) -> EpochMs {
        self.anchors.last().map(|a| a.time).unwrap_or_default()
    }

    /// The first anchor reached at or after `t`; `None` past the last anchor.
    pub fn point_at_time(&self, t: EpochMs) -> Option<GeoPoint> {
        let i = self.anchors.partition_point(|a| a.time < t);
        self.anchors.get(i).map(|a| a.point)
    }

    /// Position at `t`, linear between the bracketing anchors and clamped to
    /// the first and last anchor outside their span.
    pub fn location(&self, t: EpochMs) -> GeoPoint {
        let i = self.anchors.partition_point(|a| a.time < t);
        match (i.checked_sub(1).and_then(|j| self.anchors.get(j)), self.anchors.get(i)) {
            (_, Some(after)) if after.time == t => after.point,
            (Some(before), Some(after)) => {
                let w = (t - before.time) as f64 / (after.time - before.time) as f64;
                GeoPoint::new(
                    (1.0 - w) * before.point.lat + w * after.point.lat,
                    (1.0 - w) * before.point.lon + w * after.point.lon,
                )
            }
            (None, Some(first)) => first.point,
            (Some(last), None) => last.point,
            (None, None) => GeoPoint::new(f64::NAN, f64::NAN),
        }
    }
}

// ── StationaryPath ────────────────────────────────────────────────────────────

/// A person who stays at one point for `total_time_ms`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StationaryPath {
    pub point:         GeoPoint,
    pub total_time_ms: i64,
}

impl StationaryPath {
    pub fn new(point: GeoPoint, total_time_ms: i64) -> Self {
        Self { point, total_time_ms }
    }

    #[inline]
    pub fn location(&self, _t: EpochMs) -> GeoPoint {
        self.point
    }

    /// As a time-aware path from `start`: the point itself, held until
    /// `start + total_time_ms` when that is later than `start`.
    pub fn to_time_aware(&self, start: EpochMs) -> PathResult<TimeAwarePath> {
        let mut b = TimeAwarePathBuilder::starting_at(self.point, start);
        if self.total_time_ms > 0 {
            b.append_point(self.point, start + self.total_time_ms)?;
        }
        b.build()
    }
}
