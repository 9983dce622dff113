//! Grid orientation derived from an origin and a rotation anchor.

use log::{debug, warn};

use crate::crs::{CoordinateTransform, Crs};
use crate::error::GridError;
use crate::geometry::Point;
use crate::services::MapServices;
use crate::sphere::DistanceMetric;

/// Immutable description of a grid: where it starts, how it is tilted and
/// how large its cells are.
///
/// `rise_factor` and `run_factor` are direction cosines measured on the
/// ground, normalized per geographic axis. They do not form a true unit
/// rotation (`rise² + run²` is only approximately 1), so strongly skewed
/// anchors produce a slightly distorted basis.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct GridDescription {
    pub origin: Point,
    pub rise_factor: f64,
    pub run_factor: f64,
    pub x_dim: f64,
    pub y_dim: f64,
}

/// Builds a [`GridDescription`], or `None` when there is nothing to draw.
///
/// Missing inputs and an anchor that coincides with the origin are absorbed
/// into `None`; reprojection failures are returned as errors.
pub fn build_grid_description<T, M>(
    origin: Option<Point>,
    anchor: Option<Point>,
    x_dim: f64,
    y_dim: f64,
    projection: &Crs,
    services: &MapServices<T, M>,
) -> Result<Option<GridDescription>, GridError>
where
    T: CoordinateTransform,
    M: DistanceMetric,
{
    match describe(origin, anchor, x_dim, y_dim, projection, services) {
        Ok(description) => {
            debug!(
                "grid description rebuilt: rise {:.6}, run {:.6}, cell {}x{}",
                description.rise_factor, description.run_factor, x_dim, y_dim
            );
            Ok(Some(description))
        }
        Err(e) if !e.is_fatal() => {
            warn!("grid not renderable: {}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Strict variant of [`build_grid_description`] reporting why a grid cannot
/// be built.
pub fn describe<T, M>(
    origin: Option<Point>,
    anchor: Option<Point>,
    x_dim: f64,
    y_dim: f64,
    projection: &Crs,
    services: &MapServices<T, M>,
) -> Result<GridDescription, GridError>
where
    T: CoordinateTransform,
    M: DistanceMetric,
{
    let origin = origin.ok_or(GridError::MissingInput("origin"))?;
    if !origin.is_finite() {
        return Err(GridError::MissingInput("origin"));
    }
    if !is_cell_size(x_dim) {
        return Err(GridError::MissingInput("x grid size"));
    }
    if !is_cell_size(y_dim) {
        return Err(GridError::MissingInput("y grid size"));
    }
    let anchor = anchor.unwrap_or_else(|| origin.translated(1.0, 0.0));

    let cp1 = services.to_geographic(origin, projection)?;
    let cp2 = services.to_geographic(anchor, projection)?;
    // same longitude as the origin at the anchor's latitude, and vice versa
    let cp3 = Point::new(cp1.x, cp2.y);
    let cp4 = Point::new(cp2.x, cp1.y);

    let len = services.distance(cp1, cp2);
    let mut rise = services.distance(cp1, cp3);
    let mut run = services.distance(cp1, cp4);

    // Linear sign rule. Wrong for anchors across the antimeridian or a pole,
    // where longitude/latitude ordering no longer reflects direction.
    if cp1.x > cp2.x {
        run = -run;
    }
    if cp1.y > cp2.y {
        rise = -rise;
    }

    if !(len.is_finite() && len > 0.0) {
        return Err(GridError::DegenerateGrid("anchor coincides with origin"));
    }

    Ok(GridDescription {
        origin,
        rise_factor: rise / len,
        run_factor: run / len,
        x_dim,
        y_dim,
    })
}

fn is_cell_size(v: f64) -> bool {
    v.is_finite() && v != 0.0
}
