//! CSV loader for custom 24-hour schedules.
//!
//! # CSV format
//!
//! One row per rest interval.  Rows sharing a `name` form one schedule;
//! schedules are returned in order of each name's first appearance.
//!
//! ```csv
//! name,rest_start_hour,rest_end_hour
//! siesta,0,6
//! siesta,13,15
//! siesta,22,24
//! late-riser,0,10
//! ```
//!
//! Hours are fractional local wall-clock hours in `[0, 24]`.  A schedule whose
//! first rest interval starts at midnight begins the day resting.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::schedule::Schedule24h;
use crate::zone::ZoneRules;
use crate::{ScheduleError, ScheduleResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RestRecord {
    name:            String,
    rest_start_hour: f64,
    rest_end_hour:   f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load custom schedules from a CSV file, all expressed in `zone`.
pub fn load_schedules_csv(path: &Path, zone: Arc<dyn ZoneRules>) -> ScheduleResult<Vec<Schedule24h>> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_schedules_reader(file, zone)
}

/// Like [`load_schedules_csv`] but accepts any `Read` source.
pub fn load_schedules_reader<R: Read>(
    reader: R,
    zone:   Arc<dyn ZoneRules>,
) -> ScheduleResult<Vec<Schedule24h>> {
    // ── Parse CSV rows, grouping by name in first-seen order ──────────────
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut groups: Vec<(String, Vec<(f64, f64)>)> = Vec::new();

    for result in csv_reader.deserialize::<RestRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        validate_row(&row)?;
        let interval = (row.rest_start_hour, row.rest_end_hour);
        match groups.iter_mut().find(|(name, _)| *name == row.name) {
            Some((_, intervals)) => intervals.push(interval),
            None => groups.push((row.name, vec![interval])),
        }
    }

    // ── Build one schedule per name ───────────────────────────────────────
    groups
        .into_iter()
        .map(|(name, intervals)| Schedule24h::from_rest_intervals(name, &intervals, Arc::clone(&zone)))
        .collect()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn validate_row(row: &RestRecord) -> ScheduleResult<()> {
    let in_day = |h: f64| (0.0..=24.0).contains(&h);
    if !in_day(row.rest_start_hour) || !in_day(row.rest_end_hour) {
        return Err(ScheduleError::Parse(format!(
            "schedule {:?}: rest hours must be within [0, 24], got {}..{}",
            row.name, row.rest_start_hour, row.rest_end_hour
        )));
    }
    if row.rest_end_hour < row.rest_start_hour {
        return Err(ScheduleError::Parse(format!(
            "schedule {:?}: rest interval ends before it starts ({}..{})",
            row.name, row.rest_start_hour, row.rest_end_hour
        )));
    }
    Ok(())
}
