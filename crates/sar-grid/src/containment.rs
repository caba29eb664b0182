//! `ContainmentMap`: a 2-D probability-mass grid over a rectangle.
//!
//! # Indexing
//!
//! `cells[lat_row][lon_col]`, row 0 at the north edge and column 0 at the
//! west edge.  The expected shape is [`grid_dims`] of the rectangle under the
//! map's [`GridSpec`]; maps built by this crate always have it, while maps
//! assembled from external arrays are checked by [`ContainmentMap::validate`].
//!
//! ```text
//! lat_row = ⌊(north − lat) / (north − south) · num_lat⌋   clamped to [0, num_lat)
//! lon_col = ⌊(lon − west)  / (east − west)   · num_lon⌋   clamped to [0, num_lon)
//! ```
//!
//! [`ContainmentMap::cell_bounds`] is the inverse mapping, in the same degree
//! arithmetic.

use serde::{Deserialize, Serialize};

use sar_core::{DEFAULT_POINT_PAD_DEG, GeoPoint, GeoRectangle, KM_PER_DEG};

use crate::levels::{ContainmentLevel, ContainmentLevels};
use crate::sizing::{GridDims, GridSpec, grid_dims};
use crate::{GridError, GridResult, ValidationInfo};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContainmentMap {
    rect:  GeoRectangle,
    spec:  GridSpec,
    cells: Vec<Vec<f64>>,
}

impl ContainmentMap {
    // ── Construction ──────────────────────────────────────────────────────

    /// An all-zero map with the shape derived from `rect` and `spec`.
    pub fn zeros(rect: GeoRectangle, spec: GridSpec) -> Self {
        let dims = grid_dims(&rect, &spec);
        Self { rect, spec, cells: vec![vec![0.0; dims.num_lon]; dims.num_lat] }
    }

    /// Wrap an existing cell array.  The shape is not checked here; call
    /// [`validate`](Self::validate) before trusting it.
    pub fn from_cells(rect: GeoRectangle, spec: GridSpec, cells: Vec<Vec<f64>>) -> Self {
        Self { rect, spec, cells }
    }

    /// Bin weighted points into a new map over `rect`.
    ///
    /// Points outside `rect` are skipped.
    pub fn aggregate(
        rect:    GeoRectangle,
        spec:    GridSpec,
        points:  &[GeoPoint],
        weights: &[f64],
    ) -> GridResult<Self> {
        if points.len() != weights.len() {
            return Err(GridError::LengthMismatch { points: points.len(), weights: weights.len() });
        }
        let mut map = Self::zeros(rect, spec);
        let mut skipped = 0usize;
        for (p, w) in points.iter().zip(weights) {
            match map.cell_index(*p) {
                Some((i, j)) => map.cells[i][j] += w,
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            log::debug!("aggregate: {skipped} of {} points fell outside {}", points.len(), map.rect);
        }
        Ok(map)
    }

    /// Bin weighted points into a map over their own padded bounding box.
    pub fn from_points(points: &[GeoPoint], weights: &[f64], spec: GridSpec) -> GridResult<Self> {
        if points.is_empty() {
            return Err(GridError::NoPoints);
        }
        let rect = GeoRectangle::from_points(points, DEFAULT_POINT_PAD_DEG)?;
        Self::aggregate(rect, spec, points, weights)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline] pub fn rect(&self) -> &GeoRectangle { &self.rect }
    #[inline] pub fn spec(&self) -> &GridSpec { &self.spec }
    #[inline] pub fn cells(&self) -> &[Vec<f64>] { &self.cells }

    /// The shape the rectangle and spec call for.
    #[inline]
    pub fn dims(&self) -> GridDims {
        grid_dims(&self.rect, &self.spec)
    }

    #[inline] pub fn num_lat(&self) -> usize { self.dims().num_lat }
    #[inline] pub fn num_lon(&self) -> usize { self.dims().num_lon }

    pub fn cell(&self, lat_row: usize, lon_col: usize) -> Option<f64> {
        self.cells.get(lat_row)?.get(lon_col).copied()
    }

    pub fn total(&self) -> f64 {
        self.cells.iter().flatten().sum()
    }

    /// Every cell value, row-major.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().flatten().copied()
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    /// Grid cell holding `p`, or `None` if `p` is outside the rectangle.
    pub fn cell_index(&self, p: GeoPoint) -> Option<(usize, usize)> {
        if !self.rect.contains(p) {
            return None;
        }
        let dims = self.dims();
        let lat_frac = (self.rect.north() - p.lat) / self.rect.lat_span_deg();
        let lon_frac = (p.lon - self.rect.west()) / self.rect.lon_span_deg();
        Some((
            clamp_index(lat_frac * dims.num_lat as f64, dims.num_lat),
            clamp_index(lon_frac * dims.num_lon as f64, dims.num_lon),
        ))
    }

    /// Geographic bounds of cell `[lat_row][lon_col]`.
    pub fn cell_bounds(&self, lat_row: usize, lon_col: usize) -> Option<GeoRectangle> {
        let dims = self.dims();
        if lat_row >= dims.num_lat || lon_col >= dims.num_lon {
            return None;
        }
        let r = &self.rect;
        let lat_at = |i: usize| r.north() - (i as f64 / dims.num_lat as f64) * r.lat_span_deg();
        let lon_at = |j: usize| r.west() + (j as f64 / dims.num_lon as f64) * r.lon_span_deg();

        let north = lat_at(lat_row);
        let south = if lat_row + 1 == dims.num_lat { r.south() } else { lat_at(lat_row + 1) };
        let west = lon_at(lon_col);
        let east = if lon_col + 1 == dims.num_lon { r.east() } else { lon_at(lon_col + 1) };
        GeoRectangle::new(north, south, east, west).ok()
    }

    /// East-west size of one cell, km, at the rectangle's mid-latitude.
    pub fn ew_cell_extent_km(&self) -> f64 {
        let mid_lat = (self.rect.north() + self.rect.south()) / 2.0;
        mid_lat.to_radians().cos() * self.rect.lon_span_deg() * KM_PER_DEG / self.num_lon() as f64
    }

    /// North-south size of one cell, km.
    pub fn ns_cell_extent_km(&self) -> f64 {
        self.rect.lat_span_deg() * KM_PER_DEG / self.num_lat() as f64
    }

    // ── Arithmetic ────────────────────────────────────────────────────────

    /// A new map with every cell multiplied by `k`.
    pub fn scaled(&self, k: f64) -> Self {
        let cells = self
            .cells
            .iter()
            .map(|row| row.iter().map(|v| v * k).collect())
            .collect();
        Self { rect: self.rect, spec: self.spec, cells }
    }

    /// Cell-wise sum.  Both maps must cover the identical rectangle with the
    /// identical shape.
    pub fn added(&self, other: &ContainmentMap) -> GridResult<Self> {
        let same_shape = self.cells.len() == other.cells.len()
            && self.cells.iter().zip(&other.cells).all(|(a, b)| a.len() == b.len());
        if self.rect != other.rect || !same_shape {
            return Err(GridError::IncompatibleGeometry { left: self.rect, right: other.rect });
        }
        let cells = self
            .cells
            .iter()
            .zip(&other.cells)
            .map(|(a, b)| a.iter().zip(b).map(|(x, y)| x + y).collect())
            .collect();
        Ok(Self { rect: self.rect, spec: self.spec, cells })
    }

    // ── Containment levels ────────────────────────────────────────────────

    pub fn levels(&self) -> ContainmentLevels {
        ContainmentLevels::from_values(self.values())
    }

    /// Indices of the non-empty cells inside `level`'s region.
    pub fn cells_at_level(&self, level: ContainmentLevel) -> Vec<(usize, usize)> {
        let cutoff = self.levels().cutoff(level);
        let mut out = Vec::new();
        for (i, row) in self.cells.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                if v > 0.0 && v >= cutoff {
                    out.push((i, j));
                }
            }
        }
        out
    }

    // ── Validation ────────────────────────────────────────────────────────

    pub fn validate(&self) -> ValidationInfo {
        self.validate_as("containment map")
    }

    /// Shape and mass checks.  `label` prefixes the findings.
    ///
    /// A degenerate rectangle or a shape mismatch stops the checks early,
    /// since the remaining ones would be meaningless or index out of range.
    pub(crate) fn validate_as(&self, label: &str) -> ValidationInfo {
        let mut info = ValidationInfo::new();

        if self.rect.is_degenerate() {
            info.add_error(format!("{label} has a zero-area rectangle {}", self.rect));
            return info;
        }

        let dims = self.dims();
        if self.cells.len() != dims.num_lat {
            info.add_error(format!(
                "{label}: inconsistent probability array, expected {} rows but have {}",
                dims.num_lat,
                self.cells.len()
            ));
            return info;
        }
        if let Some((i, row)) = self.cells.iter().enumerate().find(|(_, r)| r.len() != dims.num_lon) {
            info.add_error(format!(
                "{label}: inconsistent probability array, expected {} cells in row {i} but have {}",
                dims.num_lon,
                row.len()
            ));
            return info;
        }

        let mut total = 0.0;
        for (i, row) in self.cells.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                if !v.is_finite() {
                    info.add_error(format!("{label}: non-finite cell probability {v} at [{i}][{j}]"));
                } else if v < 0.0 {
                    info.add_error(format!("{label}: negative cell probability {v} at [{i}][{j}]"));
                }
                total += v;
            }
        }

        if total < 0.0 {
            info.add_error(format!("{label} has cumulative probability of {total}"));
        } else if total == 0.0 {
            info.add_warning(format!(
                "{label} has cumulative probability of 0; searches can't be suggested \
                 when the distribution has zero probability in the rectangle"
            ));
        }
        info
    }
}

#[inline]
fn clamp_index(x: f64, n: usize) -> usize {
    if x <= 0.0 { 0 } else { (x as usize).min(n - 1) }
}
