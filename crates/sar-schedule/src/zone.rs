//! Timezone rules consulted by schedules.
//!
//! A schedule is defined in local wall-clock offsets within a day, so every
//! interval query needs the UTC offset in effect at some instant.  The
//! `ZoneRules` trait is the minimum a schedule needs: a stable identifier
//! (used in schedule names) and the offset at an instant.
//!
//! Implementations are provided for chrono's `Utc`, `FixedOffset`, and
//! `Local`.  Zones with daylight-saving rules can be supplied by implementing
//! the trait directly.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};

use sar_core::EpochMs;

/// Offset rules for one timezone.
pub trait ZoneRules: Send + Sync + fmt::Debug {
    /// Stable identifier, e.g. `"UTC"` or `"UTC-05:00"`.  Used as the suffix
    /// of standard schedule names, so it must not change between runs.
    fn id(&self) -> String;

    /// Milliseconds to add to a UTC instant to get local wall-clock time.
    fn offset_ms_at(&self, t: EpochMs) -> i64;
}

impl ZoneRules for Utc {
    fn id(&self) -> String {
        "UTC".to_string()
    }

    fn offset_ms_at(&self, _t: EpochMs) -> i64 {
        0
    }
}

impl ZoneRules for FixedOffset {
    fn id(&self) -> String {
        format!("UTC{self}")
    }

    fn offset_ms_at(&self, _t: EpochMs) -> i64 {
        self.local_minus_utc() as i64 * 1000
    }
}

impl ZoneRules for Local {
    fn id(&self) -> String {
        "Local".to_string()
    }

    fn offset_ms_at(&self, t: EpochMs) -> i64 {
        match DateTime::<Utc>::from_timestamp_millis(t.0) {
            Some(utc) => Local.offset_from_utc_datetime(&utc.naive_utc()).local_minus_utc() as i64 * 1000,
            None => 0,
        }
    }
}

/// Resolve a zone identifier produced by [`ZoneRules::id`].
///
/// Accepts `"UTC"`, `"GMT"`, `"Z"`, `"Local"`, and fixed offsets written as
/// `"UTC+05:00"`, `"+05:00"`, `"UTC-0330"`, or `"UTC+5"`.  Returns `None` for
/// anything else.
pub fn parse_zone(id: &str) -> Option<Arc<dyn ZoneRules>> {
    let id = id.trim();
    match id {
        "UTC" | "GMT" | "Z" => return Some(Arc::new(Utc)),
        "Local" => return Some(Arc::new(Local)),
        _ => {}
    }
    let rest = id
        .strip_prefix("UTC")
        .or_else(|| id.strip_prefix("GMT"))
        .unwrap_or(id);
    parse_fixed_offset(rest).map(|o| Arc::new(o) as Arc<dyn ZoneRules>)
}

fn parse_fixed_offset(s: &str) -> Option<FixedOffset> {
    let (sign, digits) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let (hours, minutes) = match digits.split_once(':') {
        Some((h, m)) => (h.parse::<i32>().ok()?, m.parse::<i32>().ok()?),
        None if digits.len() == 4 => (digits.get(..2)?.parse::<i32>().ok()?, digits.get(2..)?.parse::<i32>().ok()?),
        None => (digits.parse::<i32>().ok()?, 0),
    };
    if !(0..=18).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
