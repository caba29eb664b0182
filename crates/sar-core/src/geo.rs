//! Geographic coordinate and rectangle types.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Probability grids are derived
//! from rectangle bounds arithmetically, so the extra precision keeps
//! aggregation and `cell_bounds` exact inverses of each other.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Mean Earth radius, metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Kilometres per degree of latitude (10 000 km from equator to pole).
pub const KM_PER_DEG: f64 = 1.0e4 / 90.0;

/// Padding applied by [`GeoRectangle::from_points`] callers that want the
/// conventional margin around a point cloud.
pub const DEFAULT_POINT_PAD_DEG: f64 = 0.02;

/// Total surface area of the Earth used by the area approximation, m².
const EARTH_AREA_M2: f64 = 5.1e14;

// ── GeoPoint ──────────────────────────────────────────────────────────────────

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` if either coordinate is NaN.
    #[inline]
    pub fn is_nan(self) -> bool {
        self.lat.is_nan() || self.lon.is_nan()
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// The point reached by travelling `distance_m` along the great circle
    /// leaving `self` at `heading_deg` (clockwise from north).
    ///
    /// Uses the same sphere as [`distance_m`](Self::distance_m), so
    /// `p.distance_m(p.displaced(h, d))` recovers `d`.
    pub fn displaced(self, heading_deg: f64, distance_m: f64) -> GeoPoint {
        let delta = distance_m / EARTH_RADIUS_M;
        let theta = heading_deg.to_radians();
        let lat1 = self.lat.to_radians();
        let lon1 = self.lon.to_radians();

        let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
        let lon2 = lon1
            + (theta.sin() * delta.sin() * lat1.cos())
                .atan2(delta.cos() - lat1.sin() * lat2.sin());

        GeoPoint::new(lat2.to_degrees(), lon2.to_degrees())
    }

    /// Initial great-circle bearing from `self` to `other`, degrees in [0, 360).
    pub fn bearing_to(self, other: GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
        y.atan2(x).to_degrees().rem_euclid(360.0)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── GeoRectangle ──────────────────────────────────────────────────────────────

/// An axis-aligned latitude/longitude rectangle, bounds in degrees.
///
/// # Preconditions
///
/// `north >= south` and `west <= east`.  The rectangle is never normalized
/// across the antimeridian; a region crossing ±180° longitude must be split
/// by the caller.
///
/// Equality is bitwise on the four bounds: two rectangles describe the same
/// grid only if every bound is the identical `f64`.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct GeoRectangle {
    north: f64,
    south: f64,
    east:  f64,
    west:  f64,
}

impl GeoRectangle {
    /// Construct a rectangle, rejecting NaN bounds, `north < south`, and
    /// `east < west`.
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> CoreResult<Self> {
        if [north, south, east, west].iter().any(|v| v.is_nan()) {
            return Err(CoreError::InvalidRectangle(format!(
                "NaN bound in N={north} S={south} E={east} W={west}"
            )));
        }
        if north < south {
            return Err(CoreError::InvalidRectangle(format!(
                "north {north} is below south {south}"
            )));
        }
        if east < west {
            return Err(CoreError::InvalidRectangle(format!(
                "east {east} is west of west {west}; antimeridian crossing is unsupported"
            )));
        }
        Ok(Self { north, south, east, west })
    }

    /// Smallest rectangle holding every point, grown by `pad_deg` on all sides.
    pub fn from_points(points: &[GeoPoint], pad_deg: f64) -> CoreResult<Self> {
        if points.is_empty() {
            return Err(CoreError::InvalidRectangle("no points to bound".into()));
        }
        let mut north = f64::NEG_INFINITY;
        let mut south = f64::INFINITY;
        let mut east  = f64::NEG_INFINITY;
        let mut west  = f64::INFINITY;
        for p in points {
            north = north.max(p.lat);
            south = south.min(p.lat);
            east  = east.max(p.lon);
            west  = west.min(p.lon);
        }
        Self::new(north + pad_deg, south - pad_deg, east + pad_deg, west - pad_deg)
    }

    /// Rectangle centred on `center` with the given north-south and east-west
    /// extents in kilometres.
    pub fn around(center: GeoPoint, ns_extent_km: f64, ew_extent_km: f64) -> CoreResult<Self> {
        let half_ns = 1000.0 * ns_extent_km / 2.0;
        let half_ew = 1000.0 * ew_extent_km / 2.0;
        Self::new(
            center.displaced(0.0, half_ns).lat,
            center.displaced(180.0, half_ns).lat,
            center.displaced(90.0, half_ew).lon,
            center.displaced(270.0, half_ew).lon,
        )
    }

    #[inline] pub fn north(&self) -> f64 { self.north }
    #[inline] pub fn south(&self) -> f64 { self.south }
    #[inline] pub fn east(&self) -> f64 { self.east }
    #[inline] pub fn west(&self) -> f64 { self.west }

    /// Latitude span in degrees.
    #[inline]
    pub fn lat_span_deg(&self) -> f64 {
        self.north - self.south
    }

    /// Longitude span in degrees.
    #[inline]
    pub fn lon_span_deg(&self) -> f64 {
        self.east - self.west
    }

    /// `true` if either span is zero, i.e. the rectangle has no area.
    pub fn is_degenerate(&self) -> bool {
        self.lat_span_deg() == 0.0 || self.lon_span_deg() == 0.0
    }

    pub fn nw_corner(&self) -> GeoPoint { GeoPoint::new(self.north, self.west) }
    pub fn ne_corner(&self) -> GeoPoint { GeoPoint::new(self.north, self.east) }
    pub fn sw_corner(&self) -> GeoPoint { GeoPoint::new(self.south, self.west) }
    pub fn se_corner(&self) -> GeoPoint { GeoPoint::new(self.south, self.east) }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new((self.south + self.north) / 2.0, (self.east + self.west) / 2.0)
    }

    /// Inclusive containment test.  NaN coordinates are never contained.
    pub fn contains(&self, p: GeoPoint) -> bool {
        if p.is_nan() {
            log::warn!("point {p} has NaN coordinates");
            return false;
        }
        p.lat <= self.north && p.lat >= self.south && p.lon <= self.east && p.lon >= self.west
    }

    /// `true` if both the NE and SW corners of `other` lie inside `self`.
    pub fn contains_rect(&self, other: &GeoRectangle) -> bool {
        self.contains(other.ne_corner()) && self.contains(other.sw_corner())
    }

    /// North-south extent in metres, measured along the west edge.
    pub fn ns_extent_m(&self) -> f64 {
        self.nw_corner().distance_m(self.sw_corner())
    }

    /// East-west extent in metres, measured along the north edge.
    pub fn ew_extent_m(&self) -> f64 {
        self.nw_corner().distance_m(self.ne_corner())
    }

    /// Approximate surface area in m² from the spherical-zone formula.
    pub fn approx_area_m2(&self) -> f64 {
        let lon_factor = (self.west - self.east).abs().to_radians();
        let lat_factor =
            (self.north.to_radians().sin() - self.south.to_radians().sin()).abs();
        lon_factor * lat_factor * EARTH_AREA_M2 / (4.0 * std::f64::consts::PI)
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &GeoRectangle) -> GeoRectangle {
        GeoRectangle {
            north: self.north.max(other.north),
            south: self.south.min(other.south),
            east:  self.east.max(other.east),
            west:  self.west.min(other.west),
        }
    }

    /// Grow in place to include `p`.  Returns `true` if any bound moved.
    ///
    /// Intended for accumulating bounds from data sources; grid code treats
    /// rectangles as immutable.
    pub fn expand_to_include(&mut self, p: GeoPoint) -> bool {
        if p.is_nan() {
            return false;
        }
        let before = *self;
        self.north = self.north.max(p.lat);
        self.south = self.south.min(p.lat);
        self.east  = self.east.max(p.lon);
        self.west  = self.west.min(p.lon);
        before != *self
    }

    /// Keep the centre, but make each extent at least `min_extent_km`.
    pub fn expand_to_minimum(&self, min_extent_km: f64) -> CoreResult<GeoRectangle> {
        let ns_km = min_extent_km.max(self.ns_extent_m() / 1000.0);
        let ew_km = min_extent_km.max(self.ew_extent_m() / 1000.0);
        GeoRectangle::around(self.center(), ns_km, ew_km)
    }
}

impl PartialEq for GeoRectangle {
    fn eq(&self, other: &Self) -> bool {
        self.north.to_bits() == other.north.to_bits()
            && self.south.to_bits() == other.south.to_bits()
            && self.east.to_bits() == other.east.to_bits()
            && self.west.to_bits() == other.west.to_bits()
    }
}

impl Eq for GeoRectangle {}

impl Hash for GeoRectangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.north.to_bits().hash(state);
        self.south.to_bits().hash(state);
        self.east.to_bits().hash(state);
        self.west.to_bits().hash(state);
    }
}

/// `S,N,W,E`
impl fmt::Display for GeoRectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.south, self.north, self.west, self.east)
    }
}

impl FromStr for GeoRectangle {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|t| t.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|e| CoreError::Parse(format!("rectangle {s:?}: {e}")))?;
        match parts.as_slice() {
            [south, north, west, east] => GeoRectangle::new(*north, *south, *east, *west),
            _ => Err(CoreError::Parse(format!(
                "rectangle {s:?}: expected 4 comma-separated values \"S,N,W,E\""
            ))),
        }
    }
}
