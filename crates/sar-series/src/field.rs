//! Time-indexed vector fields (winds, currents) on a regular lat/lon raster.
//!
//! A keyframe is a [`VectorGrid`] indexed `[lat_index][lon_index]`, where the
//! axes ascend: row 0 is the *southernmost* latitude, unlike a
//! `ContainmentMap`.  Queries between keyframes blend in time via
//! [`blend_at`]; queries between raster nodes blend bilinearly in space.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use sar_core::{EpochMs, GeoPoint, GeoRectangle};

use crate::blend::{Blend, blend_at};
use crate::{SeriesError, SeriesResult, Velocity2d};

// ── VectorGrid ────────────────────────────────────────────────────────────────

/// One keyframe of a vector field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VectorGrid {
    rows: Vec<Vec<Velocity2d>>,
}

impl VectorGrid {
    pub fn new(rows: Vec<Vec<Velocity2d>>) -> Self {
        Self { rows }
    }

    /// A `num_lat × num_lon` grid holding `v` everywhere.
    pub fn filled(num_lat: usize, num_lon: usize, v: Velocity2d) -> Self {
        Self { rows: vec![vec![v; num_lon]; num_lat] }
    }

    #[inline] pub fn rows(&self) -> &[Vec<Velocity2d>] { &self.rows }
    #[inline] pub fn num_lat(&self) -> usize { self.rows.len() }

    pub fn num_lon(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn get(&self, lat_index: usize, lon_index: usize) -> Option<Velocity2d> {
        self.rows.get(lat_index)?.get(lon_index).copied()
    }

    fn is_rectangular(&self, num_lat: usize, num_lon: usize) -> bool {
        self.rows.len() == num_lat && self.rows.iter().all(|r| r.len() == num_lon)
    }
}

impl Blend for VectorGrid {
    fn blend(before: &Self, w_before: f64, after: &Self, w_after: f64) -> SeriesResult<Self> {
        debug_assert_eq!(before.num_lat(), after.num_lat());
        let rows = before
            .rows
            .iter()
            .zip(&after.rows)
            .map(|(rb, ra)| rb.iter().zip(ra).map(|(&b, &a)| a * w_after + b * w_before).collect())
            .collect();
        Ok(Self { rows })
    }
}

// ── Axis helpers ──────────────────────────────────────────────────────────────

/// Index of the axis node at or below `v`, clamped to the axis.
///
/// `axis` must be non-empty and ascending.
pub fn lower_index(v: f64, axis: &[f64]) -> usize {
    let last = axis.len() - 1;
    if v <= axis[0] {
        return 0;
    }
    if v >= axis[last] {
        return last;
    }
    axis.partition_point(|&a| a < v) - 1
}

/// Fractional position of `v` between `axis[i0]` and `axis[i1]`; 0 when the
/// two indices coincide.
pub fn alpha(v: f64, axis: &[f64], i0: usize, i1: usize) -> f64 {
    if i0 == i1 {
        return 0.0;
    }
    (v - axis[i0]) / (axis[i1] - axis[i0])
}

fn bilinear(grid: &VectorGrid, lat_axis: &[f64], lon_axis: &[f64], p: GeoPoint) -> Velocity2d {
    let i0 = lower_index(p.lat, lat_axis);
    let j0 = lower_index(p.lon, lon_axis);
    let i1 = (i0 + 1).min(lat_axis.len() - 1);
    let j1 = (j0 + 1).min(lon_axis.len() - 1);
    let a_lat = alpha(p.lat, lat_axis, i0, i1);
    let a_lon = alpha(p.lon, lon_axis, j0, j1);

    let r = grid.rows();
    r[i0][j0] * ((1.0 - a_lat) * (1.0 - a_lon))
        + r[i0][j1] * ((1.0 - a_lat) * a_lon)
        + r[i1][j0] * (a_lat * (1.0 - a_lon))
        + r[i1][j1] * (a_lat * a_lon)
}

// ── TimeIndexedGrid ───────────────────────────────────────────────────────────

/// What a vector field measures.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VectorDataType {
    Winds,
    Currents,
    Other,
}

impl fmt::Display for VectorDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VectorDataType::Winds => "WINDS",
            VectorDataType::Currents => "CURRENTS",
            VectorDataType::Other => "OTHER",
        })
    }
}

/// A vector field that can be sampled at any instant.
pub trait TimeIndexedGrid: Send + Sync {
    fn data_type(&self) -> VectorDataType;

    /// The underlying series (axes and keyframes).
    fn series(&self) -> &VectorFieldSeries;

    /// The whole raster at `t`.
    fn data_at(&self, t: EpochMs) -> SeriesResult<VectorGrid> {
        blend_at(&self.series().keyframes, t)
    }

    /// The vector at `p` and `t`, bilinear in space and linear in time.
    fn value_at(&self, p: GeoPoint, t: EpochMs) -> SeriesResult<Velocity2d> {
        if p.is_nan() {
            return Err(SeriesError::NanLocation);
        }
        let s = self.series();
        Ok(bilinear(&self.data_at(t)?, &s.lat_values, &s.lon_values, p))
    }
}

// ── VectorFieldSeries ─────────────────────────────────────────────────────────

/// Deserialization goes through [`VectorFieldSeries::new`], so a decoded
/// series upholds the same axis and shape invariants as a constructed one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct VectorFieldSeries {
    lat_values: Vec<f64>,
    lon_values: Vec<f64>,
    keyframes:  BTreeMap<EpochMs, VectorGrid>,
}

#[derive(Deserialize)]
struct RawSeries {
    lat_values: Vec<f64>,
    lon_values: Vec<f64>,
    keyframes:  BTreeMap<EpochMs, VectorGrid>,
}

impl TryFrom<RawSeries> for VectorFieldSeries {
    type Error = SeriesError;

    fn try_from(raw: RawSeries) -> SeriesResult<Self> {
        Self::new(raw.lat_values, raw.lon_values, raw.keyframes)
    }
}

impl VectorFieldSeries {
    /// Validates that both axes ascend strictly and every keyframe is
    /// `lat_values.len() × lon_values.len()`.
    pub fn new(
        lat_values: Vec<f64>,
        lon_values: Vec<f64>,
        keyframes:  BTreeMap<EpochMs, VectorGrid>,
    ) -> SeriesResult<Self> {
        check_axis(&lat_values, "latitude")?;
        check_axis(&lon_values, "longitude")?;
        if keyframes.is_empty() {
            return Err(SeriesError::Empty);
        }
        let (want_rows, want_cols) = (lat_values.len(), lon_values.len());
        for (t, grid) in &keyframes {
            if !grid.is_rectangular(want_rows, want_cols) {
                return Err(SeriesError::ShapeMismatch {
                    time: t.0,
                    rows: grid.num_lat(),
                    cols: grid.num_lon(),
                    want_rows,
                    want_cols,
                });
            }
        }
        Ok(Self { lat_values, lon_values, keyframes })
    }

    #[inline] pub fn lat_values(&self) -> &[f64] { &self.lat_values }
    #[inline] pub fn lon_values(&self) -> &[f64] { &self.lon_values }
    #[inline] pub fn keyframes(&self) -> &BTreeMap<EpochMs, VectorGrid> { &self.keyframes }

    /// First keyframe time.  Construction guarantees at least one keyframe.
    pub fn earliest_time(&self) -> EpochMs {
        self.keyframes.keys().next().copied().unwrap_or_default()
    }

    pub fn latest_time(&self) -> EpochMs {
        self.keyframes.keys().next_back().copied().unwrap_or_default()
    }

    /// Rectangle spanned by the axis nodes.
    pub fn rect(&self) -> SeriesResult<GeoRectangle> {
        let (Some(&south), Some(&north)) = (self.lat_values.first(), self.lat_values.last()) else {
            return Err(SeriesError::BadAxis { axis: "latitude" });
        };
        let (Some(&west), Some(&east)) = (self.lon_values.first(), self.lon_values.last()) else {
            return Err(SeriesError::BadAxis { axis: "longitude" });
        };
        Ok(GeoRectangle::new(north, south, east, west)?)
    }
}

impl TimeIndexedGrid for VectorFieldSeries {
    fn data_type(&self) -> VectorDataType {
        VectorDataType::Other
    }

    fn series(&self) -> &VectorFieldSeries {
        self
    }
}

fn check_axis(axis: &[f64], name: &'static str) -> SeriesResult<()> {
    let ascending = axis.windows(2).all(|w| w[0] < w[1]);
    if axis.is_empty() || !ascending || axis.iter().any(|v| v.is_nan()) {
        return Err(SeriesError::BadAxis { axis: name });
    }
    Ok(())
}

// ── Wind / current wrappers ───────────────────────────────────────────────────

/// Surface wind field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindData(pub VectorFieldSeries);

/// Water current field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrentData(pub VectorFieldSeries);

impl TimeIndexedGrid for WindData {
    fn data_type(&self) -> VectorDataType {
        VectorDataType::Winds
    }

    fn series(&self) -> &VectorFieldSeries {
        &self.0
    }
}

impl TimeIndexedGrid for CurrentData {
    fn data_type(&self) -> VectorDataType {
        VectorDataType::Currents
    }

    fn series(&self) -> &VectorFieldSeries {
        &self.0
    }
}
