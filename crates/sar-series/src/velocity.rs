//! `Velocity2d`: a horizontal velocity in east / north components.

use std::fmt;
use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// East and north components, in the unit of the data set that holds them.
///
/// A NaN component means "no data here".  Two velocities compare equal when
/// their known components agree and their unknown components coincide, so
/// [`Velocity2d::UNKNOWN`] equals itself.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Velocity2d {
    pub east:  f64,
    pub north: f64,
}

impl Velocity2d {
    pub const ZERO: Velocity2d = Velocity2d { east: 0.0, north: 0.0 };
    pub const UNKNOWN: Velocity2d = Velocity2d { east: f64::NAN, north: f64::NAN };

    #[inline]
    pub const fn new(east: f64, north: f64) -> Self {
        Self { east, north }
    }

    /// `true` if either component is NaN.
    #[inline]
    pub fn is_unknown(self) -> bool {
        self.east.is_nan() || self.north.is_nan()
    }

    /// Compass heading of the vector, degrees clockwise from north in
    /// `[0, 360)`.  Unknown vectors report 0; a purely north/south vector
    /// reports 0 or 180.
    pub fn heading_deg(self) -> f64 {
        if self.is_unknown() {
            return 0.0;
        }
        if self.east == 0.0 {
            return if self.north >= 0.0 { 0.0 } else { 180.0 };
        }
        (self.east.atan2(self.north).to_degrees() + 360.0) % 360.0
    }

    /// Euclidean length, or `-1.0` for an unknown vector.
    pub fn magnitude(self) -> f64 {
        if self.is_unknown() {
            return -1.0;
        }
        self.east.hypot(self.north)
    }
}

impl PartialEq for Velocity2d {
    fn eq(&self, other: &Self) -> bool {
        let same = |a: f64, b: f64| a == b || (a.is_nan() && b.is_nan());
        same(self.east, other.east) && same(self.north, other.north)
    }
}

impl Add for Velocity2d {
    type Output = Velocity2d;
    #[inline]
    fn add(self, rhs: Velocity2d) -> Velocity2d {
        Velocity2d::new(self.east + rhs.east, self.north + rhs.north)
    }
}

impl Mul<f64> for Velocity2d {
    type Output = Velocity2d;
    #[inline]
    fn mul(self, k: f64) -> Velocity2d {
        Velocity2d::new(self.east * k, self.north * k)
    }
}

impl fmt::Display for Velocity2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Velocity2d [east={}, north={}]", self.east, self.north)
    }
}
