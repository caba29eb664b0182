//! `sar-schedule` — periodic movement schedules, zones, and a registry.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`schedule`]  | `MovementSchedule` trait, `Schedule24h`, `MovementStatus` |
//! | [`zone`]      | `ZoneRules` trait (chrono `Utc`/`FixedOffset`/`Local`), `parse_zone` |
//! | [`standard`]  | `StandardSchedule` (`Continuous`, `Night`, `Day`)         |
//! | [`registry`]  | `ScheduleRegistry` (mutex-guarded get-or-create cache)    |
//! | [`loader`]    | `load_schedules_csv`, `load_schedules_reader`             |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Day model (summary)
//!
//! A schedule is the same every local day.  For an instant `t`:
//!
//! ```text
//! day_pos = (t + zone_offset(t)) mod 24h
//! moving  = day_pos falls inside one of the schedule's moving intervals
//! ```
//!
//! Interval queries (`time_spent_moving`, `moving_intervals`) evaluate the
//! zone offset once, at the start of the query.

pub mod error;
pub mod loader;
pub mod registry;
pub mod schedule;
pub mod standard;
pub mod zone;

#[cfg(test)]
mod tests;

pub use error::{ScheduleError, ScheduleResult};
pub use loader::{load_schedules_csv, load_schedules_reader};
pub use registry::ScheduleRegistry;
pub use schedule::{MovementSchedule, MovementStatus, Schedule24h};
pub use standard::StandardSchedule;
pub use zone::{ZoneRules, parse_zone};
