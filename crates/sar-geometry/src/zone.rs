//! Exclusion zones: regions a simulated lost person will not enter.
//!
//! | Type            | Test                                                  |
//! |-----------------|-------------------------------------------------------|
//! | `CircularZone`  | bounding-box screen, then great-circle `d < radius`   |
//! | `PolygonZone`   | bounding-box screen, then ray casting in degrees      |
//!
//! Both are meant for small regions.  Neither handles the antimeridian or
//! the poles.

use std::fmt;

use sar_core::{GeoPoint, GeoRectangle};

use crate::avoidance::circle_avoidance_waypoint;
use crate::{GeometryError, GeometryResult, TangentPlane, Vec2};

/// Margin applied to a circle's radius when steering around it.
pub const AVOIDANCE_MARGIN: f64 = 1.01;

/// Tolerance, in degrees, for treating a point as lying on a polygon edge.
const EDGE_EPS_DEG: f64 = 1e-12;

/// Membership test shared by every kind of exclusion zone.
pub trait ExclusionZone: Send + Sync + fmt::Debug {
    fn contains_point(&self, p: GeoPoint) -> bool;
}

// ── CircularZone ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct CircularZone {
    center:   GeoPoint,
    radius_m: f64,
    /// `false` for zones discovered after the incident began.
    known:    bool,
    plane:    TangentPlane,
    bbox:     GeoRectangle,
}

impl CircularZone {
    pub fn new(center: GeoPoint, radius_m: f64, known: bool) -> GeometryResult<Self> {
        if center.is_nan() {
            return Err(GeometryError::InvalidZone("NaN centre".into()));
        }
        if !(radius_m.is_finite() && radius_m > 0.0) {
            return Err(GeometryError::InvalidZone(format!("radius {radius_m} m must be positive")));
        }
        let plane = TangentPlane::new(center);
        let north = plane.unproject(Vec2::new(0.0, radius_m)).lat;
        let south = plane.unproject(Vec2::new(0.0, -radius_m)).lat;
        let east = plane.unproject(Vec2::new(radius_m, 0.0)).lon;
        let west = plane.unproject(Vec2::new(-radius_m, 0.0)).lon;
        let bbox = GeoRectangle::new(north, south, east, west)
            .map_err(|e| GeometryError::InvalidZone(e.to_string()))?;
        Ok(Self { center, radius_m, known, plane, bbox })
    }

    #[inline] pub fn center(&self) -> GeoPoint { self.center }
    #[inline] pub fn radius_m(&self) -> f64 { self.radius_m }
    #[inline] pub fn is_known(&self) -> bool { self.known }

    /// Screening rectangle enclosing the circle.
    pub fn bounding_box(&self) -> &GeoRectangle {
        &self.bbox
    }

    /// The point just outside the boundary on the ray from the centre
    /// through `p`.  `None` when `p` is the centre.
    pub fn closest_boundary_point(&self, p: GeoPoint) -> Option<GeoPoint> {
        let v = self.plane.project(p).normalized()?;
        Some(self.plane.unproject(v * (AVOIDANCE_MARGIN * self.radius_m)))
    }

    /// A waypoint that routes the straight leg `a → b` around this zone.
    ///
    /// `None` if either endpoint is within the padded radius or the tangent
    /// rays have no forward intersection.
    pub fn avoidance_waypoint(&self, a: GeoPoint, b: GeoPoint) -> Option<GeoPoint> {
        let a = self.plane.project(a);
        let b = self.plane.project(b);
        circle_avoidance_waypoint(a, b, Vec2::ZERO, AVOIDANCE_MARGIN * self.radius_m)
            .map(|w| self.plane.unproject(w))
    }
}

impl ExclusionZone for CircularZone {
    fn contains_point(&self, p: GeoPoint) -> bool {
        if p.lat > self.bbox.north()
            || p.lat < self.bbox.south()
            || p.lon > self.bbox.east()
            || p.lon < self.bbox.west()
        {
            return false;
        }
        self.center.distance_m(p) < self.radius_m
    }
}

// ── PolygonZone ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct PolygonZone {
    vertices: Vec<GeoPoint>,
    bbox:     Option<GeoRectangle>,
}

impl PolygonZone {
    /// Vertices in order; the closing edge back to the first is implicit.
    pub fn new(vertices: Vec<GeoPoint>) -> Self {
        let bbox = GeoRectangle::from_points(&vertices, 0.0).ok();
        Self { vertices, bbox }
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }
}

impl ExclusionZone for PolygonZone {
    fn contains_point(&self, p: GeoPoint) -> bool {
        if self.vertices.len() < 3 {
            log::warn!("polygon has fewer than 3 vertices; treating it as empty");
            return false;
        }
        match &self.bbox {
            Some(bbox) if bbox.contains(p) => polygon_contains(&self.vertices, p),
            _ => false,
        }
    }
}

/// Even-odd ray casting in degree space, with points on an edge counted
/// as inside.
fn polygon_contains(vertices: &[GeoPoint], p: GeoPoint) -> bool {
    let (x, y) = (p.lon, p.lat);
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (xi, yi) = (vertices[i].lon, vertices[i].lat);
        let (xj, yj) = (vertices[j].lon, vertices[j].lat);

        if on_segment((xi, yi), (xj, yj), (x, y)) {
            return true;
        }
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn on_segment(a: (f64, f64), b: (f64, f64), p: (f64, f64)) -> bool {
    let cross = (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0);
    if cross.abs() > EDGE_EPS_DEG {
        return false;
    }
    p.0 >= a.0.min(b.0) && p.0 <= a.0.max(b.0) && p.1 >= a.1.min(b.1) && p.1 <= a.1.max(b.1)
}

// ── ExclusionZones ────────────────────────────────────────────────────────────

/// Every exclusion zone in force for one lost-person instance.
#[derive(Clone, Debug, Default)]
pub struct ExclusionZones {
    pub circles:  Vec<CircularZone>,
    pub polygons: Vec<PolygonZone>,
}

impl ExclusionZones {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_circles(circles: Vec<CircularZone>) -> Self {
        Self { circles, polygons: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty() && self.polygons.is_empty()
    }

    pub fn len(&self) -> usize {
        self.circles.len() + self.polygons.len()
    }

    /// The first circular zone containing `p`, if any.
    pub fn circle_containing(&self, p: GeoPoint) -> Option<&CircularZone> {
        self.circles.iter().find(|z| z.contains_point(p))
    }
}

impl ExclusionZone for ExclusionZones {
    fn contains_point(&self, p: GeoPoint) -> bool {
        self.circles.iter().any(|z| z.contains_point(p))
            || self.polygons.iter().any(|z| z.contains_point(p))
    }
}
