//! Fluent builder for constructing a [`StraightLineModel`].

use std::sync::Arc;

use sar_core::{EpochMs, GeoPoint, GeoRectangle, LpiId};
use sar_geometry::ExclusionZones;
use sar_grid::GridSpec;
use sar_path::{LandCover, UniformLand};
use sar_schedule::MovementSchedule;

use crate::{ModelError, ModelParams, ModelResult, StraightLineModel};

/// Name reported in model output when none is supplied.
pub const DEFAULT_MODEL_NAME: &str = "straight-line";

/// Fluent builder for [`StraightLineModel`].
///
/// # Required inputs
///
/// - `LpiId` of the lost-person instance being modelled
/// - start time and the rectangle results are confined to
/// - a `MovementSchedule`
/// - `ModelParams`
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                      |
/// |--------------------|------------------------------|
/// | `.start_points(v)` | the rectangle's center, once |
/// | `.land(l)`         | `UniformLand::default()`     |
/// | `.zones(z)`        | no exclusion zones           |
/// | `.grid_spec(s)`    | `GridSpec::default()`        |
/// | `.name(s)`         | `"straight-line"`            |
///
/// ```rust,ignore
/// let model = ModelBuilder::new(lpi, start, rect, schedule, params)
///     .start_points(points)
///     .zones(zones)
///     .build()?;
/// let run = model.run(&mut NoopProgress)?;
/// ```
pub struct ModelBuilder {
    lpi_id:       LpiId,
    start_time:   EpochMs,
    rect:         GeoRectangle,
    schedule:     Arc<dyn MovementSchedule>,
    params:       ModelParams,
    start_points: Option<Vec<GeoPoint>>,
    land:         Option<Arc<dyn LandCover>>,
    zones:        Option<ExclusionZones>,
    spec:         Option<GridSpec>,
    name:         Option<String>,
}

impl ModelBuilder {
    pub fn new(
        lpi_id:     LpiId,
        start_time: EpochMs,
        rect:       GeoRectangle,
        schedule:   Arc<dyn MovementSchedule>,
        params:     ModelParams,
    ) -> Self {
        Self {
            lpi_id,
            start_time,
            rect,
            schedule,
            params,
            start_points: None,
            land:         None,
            zones:        None,
            spec:         None,
            name:         None,
        }
    }

    /// One sample path per point.
    pub fn start_points(mut self, points: Vec<GeoPoint>) -> Self {
        self.start_points = Some(points);
        self
    }

    pub fn land(mut self, land: Arc<dyn LandCover>) -> Self {
        self.land = Some(land);
        self
    }

    pub fn zones(mut self, zones: ExclusionZones) -> Self {
        self.zones = Some(zones);
        self
    }

    pub fn grid_spec(mut self, spec: GridSpec) -> Self {
        self.spec = Some(spec);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Validate the inputs and return a ready-to-run model.
    pub fn build(self) -> ModelResult<StraightLineModel> {
        let info = self.params.validate();
        if !info.is_valid() {
            return Err(ModelError::InvalidParams(info));
        }
        if self.rect.is_degenerate() {
            return Err(ModelError::Config(format!("rectangle {} has zero area", self.rect)));
        }

        let start_points = match self.start_points {
            Some(p) if p.is_empty() => {
                return Err(ModelError::Config("at least one start point is required".into()));
            }
            Some(p) => p,
            None => vec![self.rect.center()],
        };
        let outside = start_points.iter().filter(|p| !self.rect.contains(**p)).count();
        if outside > 0 {
            log::warn!("{}: {outside} start points lie outside {}", self.lpi_id, self.rect);
        }

        Ok(StraightLineModel {
            name:       self.name.unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string()),
            lpi_id:     self.lpi_id,
            start_time: self.start_time,
            start_points,
            rect:       self.rect,
            spec:       self.spec.unwrap_or_default(),
            schedule:   self.schedule,
            land:       self.land.unwrap_or_else(|| Arc::new(UniformLand::default())),
            zones:      self.zones.unwrap_or_default(),
            params:     self.params,
        })
    }
}
