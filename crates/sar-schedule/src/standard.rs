//! The three built-in schedule kinds and their naming convention.
//!
//! | Kind         | Starts  | Change hours       | Moving                    |
//! |--------------|---------|--------------------|---------------------------|
//! | `Continuous` | Moving  | 12, 12             | all day                   |
//! | `Night`      | Resting | 1, 7, 17, 23       | 01:00–07:00, 17:00–23:00  |
//! | `Day`        | Resting | 5, 11, 13, 19      | 05:00–11:00, 13:00–19:00  |
//!
//! Standard schedules are named `"{Kind}-{zone id}"`, e.g. `"Night-UTC"`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::schedule::{MovementStatus, Schedule24h};
use crate::zone::ZoneRules;
use crate::{ScheduleError, ScheduleResult};

/// Separator between the kind and the zone id in a standard schedule name.
pub const NAME_SEPARATOR: char = '-';

const CONTINUOUS_HOURS: &[f64] = &[12.0, 12.0];
const NIGHT_HOURS: &[f64] = &[1.0, 7.0, 17.0, 23.0];
const DAY_HOURS: &[f64] = &[5.0, 11.0, 13.0, 19.0];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StandardSchedule {
    Night,
    Day,
    Continuous,
}

impl StandardSchedule {
    pub const ALL: [StandardSchedule; 3] =
        [StandardSchedule::Continuous, StandardSchedule::Night, StandardSchedule::Day];

    /// Status at local midnight and the hours at which it toggles.
    pub fn change_hours(self) -> (MovementStatus, &'static [f64]) {
        match self {
            StandardSchedule::Continuous => (MovementStatus::Moving, CONTINUOUS_HOURS),
            StandardSchedule::Night => (MovementStatus::Resting, NIGHT_HOURS),
            StandardSchedule::Day => (MovementStatus::Resting, DAY_HOURS),
        }
    }

    /// `"{Kind}-{zone_id}"`
    pub fn name_for(self, zone_id: &str) -> String {
        format!("{self}{NAME_SEPARATOR}{zone_id}")
    }

    /// Instantiate this kind of schedule in `zone`.
    pub fn create(self, zone: Arc<dyn ZoneRules>) -> ScheduleResult<Schedule24h> {
        let (initial, hours) = self.change_hours();
        let name = self.name_for(&zone.id());
        Schedule24h::from_change_hours(name, hours, initial, zone)
    }
}

impl fmt::Display for StandardSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StandardSchedule::Night => "Night",
            StandardSchedule::Day => "Day",
            StandardSchedule::Continuous => "Continuous",
        })
    }
}

impl FromStr for StandardSchedule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Night" => Ok(StandardSchedule::Night),
            "Day" => Ok(StandardSchedule::Day),
            "Continuous" => Ok(StandardSchedule::Continuous),
            other => Err(ScheduleError::Parse(format!("unknown schedule kind {other:?}"))),
        }
    }
}
