//! Time model.
//!
//! # Design
//!
//! Time is Unix epoch milliseconds wrapped in `EpochMs`.  Durations are plain
//! `i64` milliseconds.  Integer arithmetic keeps schedule math exact: moving
//! time over `[t0, t1)` is a sum of integer interval overlaps with no
//! floating-point drift.
//!
//! Sample paths advance in fixed steps held by `StepClock`:
//!
//!   time(step) = start + step * delta_ms

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const MS_PER_MINUTE: i64 = 60_000;
pub const MS_PER_HOUR: i64 = 3_600_000;
pub const MS_PER_DAY: i64 = 86_400_000;

// ── EpochMs ───────────────────────────────────────────────────────────────────

/// An absolute instant in Unix epoch milliseconds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpochMs(pub i64);

impl EpochMs {
    pub const ZERO: EpochMs = EpochMs(0);
    pub const MAX: EpochMs = EpochMs(i64::MAX);

    /// Milliseconds from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: EpochMs) -> i64 {
        self.0 - earlier.0
    }

    /// Convert to a chrono UTC timestamp, if representable.
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.0)
    }

    pub fn from_utc(t: DateTime<Utc>) -> Self {
        EpochMs(t.timestamp_millis())
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }
}

impl std::ops::Add<i64> for EpochMs {
    type Output = EpochMs;
    #[inline]
    fn add(self, rhs: i64) -> EpochMs {
        EpochMs(self.0 + rhs)
    }
}

impl std::ops::AddAssign<i64> for EpochMs {
    #[inline]
    fn add_assign(&mut self, rhs: i64) {
        self.0 += rhs;
    }
}

impl std::ops::Sub<i64> for EpochMs {
    type Output = EpochMs;
    #[inline]
    fn sub(self, rhs: i64) -> EpochMs {
        EpochMs(self.0 - rhs)
    }
}

impl std::ops::Sub for EpochMs {
    type Output = i64;
    #[inline]
    fn sub(self, rhs: EpochMs) -> i64 {
        self.0 - rhs.0
    }
}

/// RFC 3339 in UTC when representable, raw milliseconds otherwise.
impl fmt::Display for EpochMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_utc() {
            Some(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => write!(f, "{}ms", self.0),
        }
    }
}

// ── StepClock ─────────────────────────────────────────────────────────────────

/// Fixed-step clock that drives a model run.
///
/// `StepClock` is `Copy`; the current time is derived from the step count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StepClock {
    /// Instant of step 0.
    pub start: EpochMs,
    /// Milliseconds per step.
    pub delta_ms: i64,
    /// Steps taken so far.
    pub step: u64,
}

impl StepClock {
    pub fn new(start: EpochMs, delta_ms: i64) -> Self {
        debug_assert!(delta_ms > 0, "delta_ms must be > 0");
        Self { start, delta_ms, step: 0 }
    }

    /// Advance one step and return the new current time.
    #[inline]
    pub fn advance(&mut self) -> EpochMs {
        self.step += 1;
        self.now()
    }

    /// Instant of the current step.
    #[inline]
    pub fn now(&self) -> EpochMs {
        self.start + self.step as i64 * self.delta_ms
    }

    /// Elapsed milliseconds since step 0.
    #[inline]
    pub fn elapsed_ms(&self) -> i64 {
        self.step as i64 * self.delta_ms
    }

    /// Break elapsed time into (day, hour, minute) components for logging.
    pub fn elapsed_dhm(&self) -> (i64, i64, i64) {
        let total = self.elapsed_ms().max(0);
        let days = total / MS_PER_DAY;
        let hours = (total % MS_PER_DAY) / MS_PER_HOUR;
        let minutes = (total % MS_PER_HOUR) / MS_PER_MINUTE;
        (days, hours, minutes)
    }
}
