//! `sar-model` — runs a motion model and evaluates searches against it.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`params`]   | `ModelParams` (+ `validate`)                                  |
//! | [`builder`]  | `ModelBuilder`                                               |
//! | [`model`]    | `StraightLineModel`, `ModelRun`                              |
//! | [`output`]   | `ModelOutput` (initial / with-searches series, `validate`)   |
//! | [`search`]   | `Search`, `DiskSearch`, `PdValues`, `SampleSet`, `path_pd`   |
//! | [`observer`] | `ProgressSink`, `NoopProgress`, `LogProgress`                |
//! | [`error`]    | `ModelError`, `ModelResult<T>`                               |
//!
//! # Features
//!
//! `parallel` steps the sample paths of a run on the Rayon pool.  Results are
//! identical either way: each builder owns its state and reads only shared,
//! immutable collaborators.

pub mod builder;
pub mod error;
pub mod model;
pub mod observer;
pub mod output;
pub mod params;
pub mod search;

#[cfg(test)]
mod tests;

pub use builder::{DEFAULT_MODEL_NAME, ModelBuilder};
pub use error::{ModelError, ModelResult};
pub use model::{ModelRun, StraightLineModel};
pub use observer::{LogProgress, NoopProgress, ProgressSink};
pub use output::ModelOutput;
pub use params::{DEFAULT_MAX_DURATION_MS, DEFAULT_TIME_DELTA_MS, ModelParams};
pub use search::{DiskSearch, PdValues, SampleSet, Search, path_pd};
