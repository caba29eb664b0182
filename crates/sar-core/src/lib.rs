//! `sar-core` — foundational types for the `sar_engine` lost-person workspace.
//!
//! This crate is a dependency of every other `sar-*` crate.  It has no
//! `sar-*` dependencies of its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `LpiId`, `SearchId` (UUID-backed)                     |
//! | [`geo`]         | `GeoPoint`, `GeoRectangle`, haversine distance        |
//! | [`time`]        | `EpochMs`, `StepClock`, millisecond constants         |
//! | [`rng`]         | `SampleRng` (per-sample, seeded from the run seed)    |
//! | [`heading`]     | `Direction` compass enum                              |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Coordinate conventions
//!
//! Latitude and longitude are `f64` degrees.  Rectangles are never
//! normalized across the antimeridian: `west <= east` is a construction
//! precondition, and regions straddling ±180° are not representable.

pub mod error;
pub mod geo;
pub mod heading;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{GeoPoint, GeoRectangle, DEFAULT_POINT_PAD_DEG, EARTH_RADIUS_M, KM_PER_DEG};
pub use heading::Direction;
pub use ids::{LpiId, SearchId};
pub use rng::SampleRng;
pub use time::{EpochMs, StepClock, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE};
