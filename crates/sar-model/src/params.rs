//! Per-run parameters of the straight-line model.

use serde::{Deserialize, Serialize};

use sar_core::{Direction, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE};
use sar_grid::ValidationInfo;

/// Default simulation step.
pub const DEFAULT_TIME_DELTA_MS: i64 = 5 * MS_PER_MINUTE;

/// Default cap on simulated time; paths still moving at the horizon stop there.
pub const DEFAULT_MAX_DURATION_MS: i64 = 14 * MS_PER_DAY;

/// Straight-line model parameters.
///
/// | Field               | Default | Constraint                      |
/// |---------------------|---------|---------------------------------|
/// | `direction`         | —       |                                 |
/// | `speed_kph`         | —       | `> 0`                           |
/// | `distance_km`       | —       | `>= 0`                          |
/// | `stay_out_of_water` | `false` |                                 |
/// | `time_delta_ms`     | 5 min   | `> 0` and divides one hour      |
/// | `max_duration_ms`   | 14 days | `>= time_delta_ms`              |
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    pub direction:   Direction,
    pub speed_kph:   f64,
    pub distance_km: f64,
    #[serde(default)]
    pub stay_out_of_water: bool,
    #[serde(default = "default_time_delta")]
    pub time_delta_ms: i64,
    #[serde(default = "default_max_duration")]
    pub max_duration_ms: i64,
}

fn default_time_delta() -> i64 {
    DEFAULT_TIME_DELTA_MS
}

fn default_max_duration() -> i64 {
    DEFAULT_MAX_DURATION_MS
}

impl ModelParams {
    pub fn new(direction: Direction, speed_kph: f64, distance_km: f64) -> Self {
        Self {
            direction,
            speed_kph,
            distance_km,
            stay_out_of_water: false,
            time_delta_ms:     DEFAULT_TIME_DELTA_MS,
            max_duration_ms:   DEFAULT_MAX_DURATION_MS,
        }
    }

    pub fn stay_out_of_water(mut self, yes: bool) -> Self {
        self.stay_out_of_water = yes;
        self
    }

    pub fn time_delta_ms(mut self, ms: i64) -> Self {
        self.time_delta_ms = ms;
        self
    }

    pub fn max_duration_ms(mut self, ms: i64) -> Self {
        self.max_duration_ms = ms;
        self
    }

    /// Every violated constraint as an error; never fails.
    pub fn validate(&self) -> ValidationInfo {
        let mut info = ValidationInfo::new();
        if self.distance_km.is_nan() || self.distance_km < 0.0 {
            info.add_error(format!("invalid value for 'distance'. Value: {:.2}", self.distance_km));
        }
        if self.speed_kph.is_nan() || self.speed_kph <= 0.0 {
            info.add_error(format!("invalid value for 'speed'. Value: {:.2}", self.speed_kph));
        }
        if self.time_delta_ms <= 0 || MS_PER_HOUR % self.time_delta_ms != 0 {
            info.add_error(format!(
                "time delta of {} ms must be positive and evenly divide one hour",
                self.time_delta_ms
            ));
        }
        if self.max_duration_ms < self.time_delta_ms {
            info.add_error(format!(
                "max duration of {} ms is shorter than one time step",
                self.max_duration_ms
            ));
        }
        info
    }
}
