//! `sar-path` — sample paths and their step-wise construction.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`sample`]  | `Sample` (immutable time-tagged polyline)                 |
//! | [`path`]    | `PathBuilder` (points + running length)                   |
//! | [`timed`]   | `TimeAwarePath`, `TimeAwarePathBuilder`, `StationaryPath` |
//! | [`builder`] | `SampleBuilder`, `StepContext`, `BuilderState`, `PointAndTime` |
//! | [`land`]    | `LandCover` trait, `UniformLand`                          |
//! | [`error`]   | `PathError`, `PathResult<T>`                              |
//!
//! # Concurrency
//!
//! Each `SampleBuilder` is owned by exactly one caller and touches no shared
//! mutable state, so distinct builders can be stepped in parallel.  The
//! `StepContext` collaborators are `Send + Sync` and read-only.

pub mod builder;
pub mod error;
pub mod land;
pub mod path;
pub mod sample;
pub mod timed;


pub use builder::{BuilderState, PointAndTime, SampleBuilder, StepContext};
pub use error::{PathError, PathResult};
pub use land::{LandCover, UniformLand};
pub use path::PathBuilder;
pub use sample::Sample;
pub use timed::{StationaryPath, TimeAwarePath, TimeAwarePathBuilder};
