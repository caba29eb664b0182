//! `sar-geometry` — local plane geometry and exclusion zones.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`vec2`]      | `Vec2` planar vector (metres east / north)                 |
//! | [`plane`]     | `TangentPlane` projection around a geographic origin       |
//! | [`avoidance`] | `tangent_points`, `positive_intersection`, `circle_avoidance_waypoint` |
//! | [`zone`]      | `ExclusionZone` trait, `CircularZone`, `PolygonZone`, `ExclusionZones` |
//! | [`loader`]    | `load_zones_csv`, `load_zones_reader`                      |
//! | [`error`]     | `GeometryError`, `GeometryResult<T>`                       |

pub mod avoidance;
pub mod error;
pub mod loader;
pub mod plane;
pub mod vec2;
pub mod zone;


pub use avoidance::{circle_avoidance_waypoint, positive_intersection, tangent_points};
pub use error::{GeometryError, GeometryResult};
pub use loader::{load_zones_csv, load_zones_reader};
pub use plane::TangentPlane;
pub use vec2::Vec2;
pub use zone::{AVOIDANCE_MARGIN, CircularZone, ExclusionZone, ExclusionZones, PolygonZone};
