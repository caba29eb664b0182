//! The `MovementSchedule` trait and its 24-hour periodic implementation.
//!
//! # Interval model
//!
//! A `Schedule24h` stores its moving sub-intervals as millisecond offsets
//! within a local day, then duplicates every interval one day later so the
//! stored set covers a virtual 48-hour window.  Any query remainder shorter
//! than a day, anchored anywhere in `[0, MS_PER_DAY)`, then lies inside the
//! window and never needs wraparound logic:
//!
//! ```text
//! whole_days = (t1 - t0) / MS_PER_DAY
//! moving     = whole_days * moving_per_day
//! a          = (t0 + offset(t0)) mod MS_PER_DAY
//! b          = a + (t1 - t0) - whole_days * MS_PER_DAY
//! moving    += Σ overlap([a, b), interval)   over all 48 h intervals
//! ```
//!
//! The zone offset is evaluated once, at `t0`.  A query remainder that
//! crosses a DST transition uses the pre-transition offset throughout.

use std::fmt;
use std::sync::Arc;

use sar_core::{EpochMs, MS_PER_DAY, MS_PER_HOUR};

use crate::zone::ZoneRules;
use crate::{ScheduleError, ScheduleResult};

// ── MovementSchedule ──────────────────────────────────────────────────────────

/// Answers "how long was the lost person moving between two instants".
///
/// The trait is object-safe and `Send + Sync` so schedules can be shared
/// across parallel sample-path workers behind an `Arc<dyn MovementSchedule>`.
pub trait MovementSchedule: Send + Sync + fmt::Debug {
    /// Registry name, e.g. `"Night-UTC"`.
    fn name(&self) -> &str;

    /// Identifier of the zone the schedule is expressed in.
    fn zone_id(&self) -> String;

    /// Milliseconds spent moving in `[start, end)`.
    ///
    /// Fails with [`ScheduleError::InvalidInterval`] if `start > end`.
    fn time_spent_moving(&self, start: EpochMs, end: EpochMs) -> ScheduleResult<i64>;

    /// Every positive-length moving interval overlapping `[min, max)`, in
    /// absolute time, sorted by start.
    fn moving_intervals(&self, min: EpochMs, max: EpochMs) -> ScheduleResult<Vec<(EpochMs, EpochMs)>>;

    /// `true` if the schedule is moving during the millisecond starting at `t`.
    fn is_moving(&self, t: EpochMs) -> bool {
        matches!(self.time_spent_moving(t, t + 1), Ok(ms) if ms > 0)
    }

    /// Human-readable summary for operators.
    fn description(&self) -> String;
}

// ── MovementStatus ────────────────────────────────────────────────────────────

/// Whether the lost person is moving or resting during a span of the day.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MovementStatus {
    Resting,
    Moving,
}

impl MovementStatus {
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            MovementStatus::Resting => MovementStatus::Moving,
            MovementStatus::Moving => MovementStatus::Resting,
        }
    }
}

// ── Schedule24h ───────────────────────────────────────────────────────────────

/// A movement schedule identical over every local 24-hour day.
#[derive(Clone)]
pub struct Schedule24h {
    name: String,
    zone: Arc<dyn ZoneRules>,
    /// Moving intervals as day-relative offsets, spanning a 48 h window.
    intervals: Vec<(i64, i64)>,
    moving_per_day: i64,
}

impl Schedule24h {
    /// Build from ascending status-change offsets (ms into the local day).
    ///
    /// `initial` is the status from midnight until the first change; each
    /// subsequent change toggles the status.  An empty change list means the
    /// status holds all day.
    pub fn new(
        name:         impl Into<String>,
        change_times: &[i64],
        initial:      MovementStatus,
        zone:         Arc<dyn ZoneRules>,
    ) -> ScheduleResult<Self> {
        if let Some(bad) = change_times.iter().find(|t| !(0..=MS_PER_DAY).contains(*t)) {
            return Err(ScheduleError::InvalidChangeTimes(format!(
                "{bad} ms is outside one day"
            )));
        }
        if change_times.windows(2).any(|w| w[1] < w[0]) {
            return Err(ScheduleError::InvalidChangeTimes(
                "change times must be non-decreasing".into(),
            ));
        }

        // Walk the day: [0, c0), [c0, c1), ..., [cn, day) with alternating status.
        let mut intervals = Vec::with_capacity(change_times.len() + 1);
        let mut status = initial;
        let mut from = 0;
        for &change in change_times.iter().chain(std::iter::once(&MS_PER_DAY)) {
            if status == MovementStatus::Moving && change > from {
                intervals.push((from, change));
            }
            status = status.toggled();
            from = change;
        }
        let moving_per_day = intervals.iter().map(|(a, b)| b - a).sum();

        let next_day: Vec<(i64, i64)> = intervals
            .iter()
            .map(|&(a, b)| (a + MS_PER_DAY, b + MS_PER_DAY))
            .collect();
        intervals.extend(next_day);

        Ok(Self { name: name.into(), zone, intervals, moving_per_day })
    }

    /// Build from status-change hours, e.g. `[1.0, 7.0, 17.0, 23.0]`.
    pub fn from_change_hours(
        name:    impl Into<String>,
        hours:   &[f64],
        initial: MovementStatus,
        zone:    Arc<dyn ZoneRules>,
    ) -> ScheduleResult<Self> {
        let times: Vec<i64> = hours.iter().map(|h| hours_to_ms(*h)).collect();
        Self::new(name, &times, initial, zone)
    }

    /// Build from a list of `(start_hour, end_hour)` rest intervals.
    ///
    /// All endpoints are sorted into change times.  If the earliest is
    /// midnight the day starts resting and that endpoint is dropped;
    /// otherwise the day starts moving.
    pub fn from_rest_intervals(
        name:           impl Into<String>,
        rest_intervals: &[(f64, f64)],
        zone:           Arc<dyn ZoneRules>,
    ) -> ScheduleResult<Self> {
        let mut hours: Vec<f64> = rest_intervals
            .iter()
            .flat_map(|&(a, b)| [a, b])
            .collect();
        if hours.iter().any(|h| h.is_nan()) {
            return Err(ScheduleError::InvalidChangeTimes("NaN rest hour".into()));
        }
        hours.sort_by(f64::total_cmp);

        let mut initial = MovementStatus::Moving;
        if hours.first() == Some(&0.0) {
            initial = MovementStatus::Resting;
            hours.remove(0);
        }
        Self::from_change_hours(name, &hours, initial, zone)
    }

    /// Total moving milliseconds in one local day.
    #[inline]
    pub fn moving_per_day(&self) -> i64 {
        self.moving_per_day
    }

    /// The stored day-relative moving intervals (48 h window).
    pub fn day_intervals(&self) -> &[(i64, i64)] {
        &self.intervals
    }

    pub fn zone(&self) -> &Arc<dyn ZoneRules> {
        &self.zone
    }

    /// Shift `t` into the schedule's local day coordinate, `[0, MS_PER_DAY)`.
    #[inline]
    fn day_offset(&self, t: EpochMs) -> i64 {
        (t.0 + self.zone.offset_ms_at(t)).rem_euclid(MS_PER_DAY)
    }
}

impl MovementSchedule for Schedule24h {
    fn name(&self) -> &str {
        &self.name
    }

    fn zone_id(&self) -> String {
        self.zone.id()
    }

    fn time_spent_moving(&self, start: EpochMs, end: EpochMs) -> ScheduleResult<i64> {
        if start > end {
            return Err(ScheduleError::InvalidInterval { start, end });
        }
        let span = end - start;
        let whole_days = span / MS_PER_DAY;
        let remaining = span - whole_days * MS_PER_DAY;

        let a = self.day_offset(start);
        let b = a + remaining;
        let partial: i64 = self
            .intervals
            .iter()
            .map(|&(i0, i1)| (b.min(i1) - a.max(i0)).max(0))
            .sum();

        Ok(whole_days * self.moving_per_day + partial)
    }

    fn moving_intervals(&self, min: EpochMs, max: EpochMs) -> ScheduleResult<Vec<(EpochMs, EpochMs)>> {
        if min > max {
            return Err(ScheduleError::InvalidInterval { start: min, end: max });
        }
        let a = self.day_offset(min);
        let b = a + (max - min);
        let shift = min.0 - a;

        let mut out = Vec::new();
        for &(i0, i1) in &self.intervals {
            let (mut s0, mut s1) = (i0, i1);
            while s0 < b {
                let c0 = s0.max(a);
                let c1 = s1.min(b);
                if c0 < c1 {
                    out.push((EpochMs(c0 + shift), EpochMs(c1 + shift)));
                }
                s0 += MS_PER_DAY;
                s1 += MS_PER_DAY;
            }
        }
        out.sort_unstable();
        out.dedup();
        Ok(out)
    }

    fn description(&self) -> String {
        let mut s = self.name.clone();
        for &(a, b) in &self.intervals {
            s.push_str(&format!(
                " [{:.2}h, {:.2}h]",
                a as f64 / MS_PER_HOUR as f64,
                b as f64 / MS_PER_HOUR as f64
            ));
        }
        s.push_str(
            "\nThis movement schedule is identical over all 24-hour periods \
             (except for daylight saving changes, if applicable).",
        );
        s
    }
}

impl fmt::Debug for Schedule24h {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schedule24h")
            .field("name", &self.name)
            .field("zone", &self.zone.id())
            .field("moving_per_day", &self.moving_per_day)
            .field("intervals", &self.intervals)
            .finish()
    }
}

#[inline]
pub(crate) fn hours_to_ms(hours: f64) -> i64 {
    (hours * MS_PER_HOUR as f64) as i64
}
