//! `sar-grid` — probability grids over geographic rectangles.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                  |
//! |-------------------|-----------------------------------------------------------|
//! | [`sizing`]        | `GridSpec`, `GridDims`, `grid_dims`                       |
//! | [`containment`]   | `ContainmentMap` (aggregate, cell bounds, arithmetic, validate) |
//! | [`distribution`]  | `ProbabilityDistribution` (map + owner + timestamp)       |
//! | [`sample_points`] | `DistributionBySamplePoints`, `WeightedPoint`             |
//! | [`dist_or_map`]   | `DistOrMap` (grid or sample points)                       |
//! | [`levels`]        | `ContainmentLevel`, `ContainmentLevels` (50 / 90 / 99 %)  |
//! | [`validation`]    | `ValidationInfo` (errors vs. warnings)                    |
//! | [`error`]         | `GridError`, `GridResult<T>`                              |
//!
//! # Error taxonomy
//!
//! Contract violations (adding distributions over different rectangles,
//! mismatched point/weight lengths) are `Err(GridError)`.  Suspect data
//! (bad shape, negative or zero mass, degenerate rectangle) is reported in a
//! `ValidationInfo` and never returned as an error.

pub mod containment;
pub mod dist_or_map;
pub mod distribution;
pub mod error;
pub mod levels;
pub mod sample_points;
pub mod sizing;
pub mod validation;

#[cfg(test)]
mod tests;

pub use containment::ContainmentMap;
pub use dist_or_map::DistOrMap;
pub use distribution::ProbabilityDistribution;
pub use error::{GridError, GridResult};
pub use levels::{ContainmentLevel, ContainmentLevels};
pub use sample_points::{DistributionBySamplePoints, WeightedPoint};
pub use sizing::{GridDims, GridSpec, extents_km, grid_dims};
pub use validation::ValidationInfo;
