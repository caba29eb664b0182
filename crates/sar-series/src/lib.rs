//! `sar-series` — values that change over time, queried at arbitrary instants.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                   |
//! |------------------|------------------------------------------------------------|
//! | [`blend`]        | `Blend` trait, `blend_at` (bracketing-keyframe rule)       |
//! | [`velocity`]     | `Velocity2d`                                               |
//! | [`field`]        | `VectorGrid`, `VectorFieldSeries`, `TimeIndexedGrid`, wind / current wrappers, `lower_index`, `alpha` |
//! | [`distribution`] | `DistributionSeries`, `interpolate_distribution`           |
//! | [`error`]        | `SeriesError`, `SeriesResult<T>`                           |
//!
//! Every series is immutable once built, so concurrent queries for distinct
//! times need no synchronisation.

pub mod blend;
pub mod distribution;
pub mod error;
pub mod field;
pub mod velocity;


pub use blend::{Blend, blend_at, later_weight};
pub use distribution::{DistributionSeries, interpolate_distribution};
pub use error::{SeriesError, SeriesResult};
pub use field::{
    CurrentData, TimeIndexedGrid, VectorDataType, VectorFieldSeries, VectorGrid, WindData, alpha,
    lower_index,
};
pub use velocity::Velocity2d;
