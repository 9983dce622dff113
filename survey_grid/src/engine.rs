//! Grid engine: owns the grid state and is driven by the host map.
//!
//! The host calls [`GridEngine::attach`], [`GridEngine::on_activate`],
//! [`GridEngine::on_viewport_changed`] and [`GridEngine::on_render_frame`];
//! it reads the result through [`GridEngine::grid_points`] or
//! [`GridEngine::grid_multipoint`]. Input setters only mark the description
//! dirty; the next frame (or an explicit [`GridEngine::rebuild`]) replaces it.

use log::debug;

use crate::config::GridOptions;
use crate::crs::{CoordinateTransform, Crs, SphericalMercator};
use crate::error::GridError;
use crate::geometry::{distance, Extent, Point};
use crate::grid::{self, Basis, GridDescription};
use crate::scale::local_scale_factors;
use crate::services::MapServices;
use crate::sphere::{DistanceMetric, Haversine};

/// The map view an engine is attached to.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub projection: Crs,
    pub extent: Extent,
}

impl MapView {
    pub fn new(projection: Crs, extent: Extent) -> Self {
        Self { projection, extent }
    }
}

#[derive(Debug)]
pub struct GridEngine<T = SphericalMercator, M = Haversine> {
    options: GridOptions,
    services: MapServices<T, M>,
    view: Option<MapView>,
    description: Option<GridDescription>,
    dirty: bool,
    points: Vec<Point>,
}

impl GridEngine {
    /// Engine for web mercator maps with default options.
    pub fn with_defaults() -> Self {
        Self::new(GridOptions::default(), MapServices::spherical())
    }
}

impl<T, M> GridEngine<T, M>
where
    T: CoordinateTransform,
    M: DistanceMetric,
{
    pub fn new(options: GridOptions, services: MapServices<T, M>) -> Self {
        Self {
            options,
            services,
            view: None,
            description: None,
            dirty: true,
            points: Vec::new(),
        }
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn services(&self) -> &MapServices<T, M> {
        &self.services
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.options.origin = origin;
        self.invalidate();
    }

    /// Sets the point controlling the grid rotation. `None` aligns the grid
    /// with the projection's x axis at the origin.
    pub fn set_rotation_anchor(&mut self, anchor: Option<Point>) {
        self.options.rotation_anchor = anchor;
        self.invalidate();
    }

    pub fn set_x_grid_size(&mut self, size: f64) {
        self.options.x_grid_size = size;
        self.invalidate();
    }

    pub fn set_y_grid_size(&mut self, size: f64) {
        self.options.y_grid_size = size;
        self.invalidate();
    }

    /// Changes the point budget. The description stays valid; only the next
    /// frame's point set changes.
    pub fn set_max_points_per_side(&mut self, max_points_per_side: usize) {
        self.options.max_points_per_side = max_points_per_side;
    }

    /// Changes the host projection used while detached, and the attached
    /// view's projection when attached.
    pub fn set_projection(&mut self, projection: Crs) {
        if let Some(view) = self.view.as_mut() {
            view.projection = projection.clone();
        }
        self.options.projection = projection;
        self.invalidate();
    }

    pub fn attach(&mut self, view: MapView) {
        self.options.projection = view.projection.clone();
        self.view = Some(view);
        self.invalidate();
    }

    pub fn detach(&mut self) -> Option<MapView> {
        let view = self.view.take();
        self.invalidate();
        view
    }

    pub fn on_activate(&mut self, active: bool) {
        self.options.active = active;
        self.invalidate();
    }

    pub fn is_active(&self) -> bool {
        self.options.active
    }

    /// The grid is drawn whenever it is active and attached, even if the
    /// origin and anchor are outside the current view.
    pub fn is_visible(&self) -> bool {
        self.options.active && self.view.is_some()
    }

    pub fn on_viewport_changed(&mut self, extent: Extent) {
        if let Some(view) = self.view.as_mut() {
            view.extent = extent;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn description(&self) -> Option<&GridDescription> {
        self.description.as_ref()
    }

    /// Rebuilds the grid description from the current inputs.
    pub fn rebuild(&mut self) -> Result<Option<&GridDescription>, GridError> {
        self.description = None;
        if !self.is_visible() {
            self.points.clear();
            self.dirty = false;
            return Ok(None);
        }
        let built = grid::build_grid_description(
            Some(self.options.origin),
            self.options.rotation_anchor,
            self.options.x_grid_size,
            self.options.y_grid_size,
            &self.options.projection,
            &self.services,
        );
        // A failed build stays dirty so the next frame reports the error again.
        self.description = match built {
            Ok(description) => description,
            Err(err) => {
                self.points.clear();
                return Err(err);
            }
        };
        self.dirty = false;
        if self.description.is_none() {
            self.points.clear();
        }
        Ok(self.description.as_ref())
    }

    /// Recomputes the grid points for the current viewport.
    pub fn on_render_frame(&mut self) -> Result<&[Point], GridError> {
        if self.dirty {
            self.rebuild()?;
        }
        let (Some(description), Some(view)) = (self.description.as_ref(), self.view.as_ref()) else {
            self.points.clear();
            return Ok(&self.points);
        };
        let services = &self.services;
        let projection = &view.projection;
        self.points = grid::enumerate_lattice_points(
            description,
            &view.extent,
            self.options.max_points_per_side,
            |origin| local_scale_factors(origin, projection, services),
        )?;
        debug!("render frame produced {} grid points", self.points.len());
        Ok(&self.points)
    }

    /// Points produced by the last frame. Empty while inactive or detached.
    pub fn grid_points(&self) -> &[Point] {
        &self.points
    }

    pub fn grid_multipoint(&self) -> geo_types::MultiPoint<f64> {
        self.points
            .iter()
            .map(|p| geo_types::Point::from(*p))
            .collect()
    }

    /// Current basis in projected units, scale-corrected at the origin.
    pub fn basis(&self) -> Result<Option<Basis>, GridError> {
        let Some(description) = self.description.as_ref() else {
            return Ok(None);
        };
        match local_scale_factors(description.origin, &self.options.projection, &self.services) {
            Ok(factors) => Ok(Some(Basis::corrected(description, factors))),
            Err(e) if !e.is_fatal() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Nearest drawn grid point within `tolerance` of `target`.
    pub fn snap(&self, target: Point, tolerance: f64) -> Option<Point> {
        let mut best = None;
        let mut best_dist = tolerance;
        for p in &self.points {
            let d = distance(target, *p);
            if d <= best_dist {
                best_dist = d;
                best = Some(*p);
            }
        }
        best
    }

    fn invalidate(&mut self) {
        self.dirty = true;
    }
}
