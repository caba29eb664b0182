//! Land-cover capability consulted once per simulation step.

use std::fmt;

use sar_core::GeoPoint;

/// Terrain lookups a sample builder needs.
pub trait LandCover: Send + Sync + fmt::Debug {
    /// Multiplier on base travel speed at `p`; `>= 0`.
    fn speed_of_advance(&self, p: GeoPoint) -> f64;

    fn is_water(&self, p: GeoPoint) -> bool;
}

/// The same terrain everywhere, and no water.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UniformLand {
    pub speed_factor: f64,
}

impl Default for UniformLand {
    fn default() -> Self {
        Self { speed_factor: 1.0 }
    }
}

impl LandCover for UniformLand {
    #[inline]
    fn speed_of_advance(&self, _p: GeoPoint) -> f64 {
        self.speed_factor
    }

    #[inline]
    fn is_water(&self, _p: GeoPoint) -> bool {
        false
    }
}
