//! Grid sizing: rectangle + resolution limits → row and column counts.
//!
//! ```text
//! lat_km = Δlat · KM_PER_DEG
//! lon_km = Δlon · cos(mid_lat) · KM_PER_DEG
//!
//! if lat_km · lon_km / min_side² ≤ max_cells:  side = min_side
//! else:                                        side = sqrt(lat_km · lon_km / max_cells)
//!
//! num_lat = max(1, ⌊lat_km / side⌋)
//! num_lon = max(1, ⌊lon_km / side⌋)
//! ```

use serde::{Deserialize, Serialize};

use sar_core::{GeoRectangle, KM_PER_DEG};

/// Resolution limits for a containment grid.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub max_cells:        usize,
    pub min_cell_side_km: f64,
}

impl GridSpec {
    pub const DEFAULT_MAX_CELLS: usize = 2500;
    pub const DEFAULT_MIN_CELL_SIDE_KM: f64 = 0.2;

    pub fn new(max_cells: usize, min_cell_side_km: f64) -> Self {
        debug_assert!(max_cells > 0, "max_cells must be positive");
        debug_assert!(min_cell_side_km > 0.0, "min_cell_side_km must be positive");
        Self { max_cells, min_cell_side_km }
    }

    #[inline]
    pub fn dims_for(&self, rect: &GeoRectangle) -> GridDims {
        grid_dims(rect, self)
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            max_cells:        Self::DEFAULT_MAX_CELLS,
            min_cell_side_km: Self::DEFAULT_MIN_CELL_SIDE_KM,
        }
    }
}

/// Row (latitude) and column (longitude) counts.  Both are at least 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    pub num_lat: usize,
    pub num_lon: usize,
}

impl GridDims {
    #[inline]
    pub fn cell_count(self) -> usize {
        self.num_lat * self.num_lon
    }
}

/// Physical extents of `rect` in km, `(north-south, east-west)`.
pub fn extents_km(rect: &GeoRectangle) -> (f64, f64) {
    let mid_lat = (rect.north() + rect.south()) / 2.0;
    let lat_km = rect.lat_span_deg() * KM_PER_DEG;
    let lon_km = rect.lon_span_deg() * mid_lat.to_radians().cos() * KM_PER_DEG;
    (lat_km, lon_km)
}

/// Compute the grid dimensions for `rect` under `spec`.
pub fn grid_dims(rect: &GeoRectangle, spec: &GridSpec) -> GridDims {
    let (lat_km, lon_km) = extents_km(rect);
    let area = lat_km * lon_km;
    let min_side = spec.min_cell_side_km;

    let side = if area / (min_side * min_side) <= spec.max_cells as f64 {
        min_side
    } else {
        (area / spec.max_cells as f64).sqrt()
    };

    GridDims {
        num_lat: ((lat_km / side) as usize).max(1),
        num_lon: ((lon_km / side) as usize).max(1),
    }
}
