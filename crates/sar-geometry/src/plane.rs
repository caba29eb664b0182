//! Local tangent-plane projection around a geographic origin.
//!
//! The projection is azimuthal equidistant: a point maps to the vector whose
//! length is its great-circle distance from the origin and whose direction is
//! its bearing.  Distances and bearings from the origin are exact; away from
//! the origin the plane is a small-region approximation, which is all the
//! exclusion-zone routines need.

use sar_core::GeoPoint;

use crate::Vec2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TangentPlane {
    origin: GeoPoint,
}

impl TangentPlane {
    pub fn new(origin: GeoPoint) -> Self {
        Self { origin }
    }

    #[inline]
    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    /// Geographic point to plane coordinates (metres east, metres north).
    pub fn project(&self, p: GeoPoint) -> Vec2 {
        let d = self.origin.distance_m(p);
        if d == 0.0 {
            return Vec2::ZERO;
        }
        let bearing = self.origin.bearing_to(p).to_radians();
        Vec2::new(d * bearing.sin(), d * bearing.cos())
    }

    /// Plane coordinates back to a geographic point.
    pub fn unproject(&self, v: Vec2) -> GeoPoint {
        let d = v.norm();
        if d == 0.0 {
            return self.origin;
        }
        let heading = v.x.atan2(v.y).to_degrees();
        self.origin.displaced(heading, d)
    }
}
