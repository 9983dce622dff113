//! Viewport lattice enumeration.
//!
//! A grid is the set of points `origin + xi * x_basis + yi * y_basis` for
//! integer `(xi, yi)`. Rendering only needs the points inside the current
//! viewport, and at low zoom only a bounded subset of those, so enumeration
//! works in lattice coordinates: locate the viewport corners in the basis,
//! bound them, then walk the bounded window with a stride that caps the
//! number of indices per axis. Thinned walks step outward from the render
//! origin so the remaining points stay spread across the view.

use log::{debug, warn};

use super::GridDescription;
use crate::error::GridError;
use crate::geometry::{Extent, Matrix2, Point, Vector};

/// Largest lattice index magnitude the enumerator will address.
const MAX_LATTICE_INDEX: f64 = 1e15;

/// Tolerance for lattice points sitting exactly on a viewport edge.
const EDGE_SLACK: f64 = 1e-9;

/// Integer lattice position: `xi` steps along the x basis and `yi` steps
/// along the y basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LatticeCoord {
    pub xi: i64,
    pub yi: i64,
}

impl LatticeCoord {
    pub fn new(xi: i64, yi: i64) -> Self {
        Self { xi, yi }
    }

    fn as_vector(self) -> Vector {
        Vector::new(self.xi as f64, self.yi as f64)
    }
}

/// The two cell-edge vectors of a grid in projected units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub x: Vector,
    pub y: Vector,
}

impl Basis {
    pub fn new(x: Vector, y: Vector) -> Self {
        Self { x, y }
    }

    /// Raw basis of a description, before any scale correction. The y basis
    /// is the x direction turned a quarter turn counter-clockwise.
    pub fn raw(description: &GridDescription) -> Self {
        let (rise, run) = (description.rise_factor, description.run_factor);
        Self::new(
            Vector::new(description.x_dim * run, description.x_dim * rise),
            Vector::new(description.y_dim * -rise, description.y_dim * run),
        )
    }

    /// Raw basis corrected component-wise by local scale `factors`.
    pub fn corrected(description: &GridDescription, factors: Vector) -> Self {
        let raw = Self::raw(description);
        Self::new(raw.x.element_product(factors), raw.y.element_product(factors))
    }

    pub fn matrix(&self) -> Matrix2 {
        Matrix2::from_columns(self.x, self.y)
    }

    /// Collinear (or non-finite) basis vectors span no lattice.
    pub fn is_degenerate(&self) -> bool {
        self.matrix().is_singular()
    }

    /// Projected position of `coord` relative to `origin`.
    pub fn point_at(&self, origin: Point, coord: LatticeCoord) -> Point {
        origin + self.matrix().mul_vector(coord.as_vector())
    }

    /// Fractional lattice coordinates of `target` relative to `origin`.
    pub fn locate(&self, origin: Point, target: Point) -> Option<Vector> {
        self.matrix().solve(target - origin)
    }

    /// Lattice coordinate nearest to `target`.
    pub fn nearest(&self, origin: Point, target: Point) -> Option<LatticeCoord> {
        let v = self.locate(origin, target)?;
        Some(LatticeCoord::new(to_index(v.x.round())?, to_index(v.y.round())?))
    }
}

/// The part of the lattice covering one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeWindow {
    /// Lattice point near the viewport center all indices are relative to.
    pub render_origin: Point,
    pub min: LatticeCoord,
    pub max: LatticeCoord,
    pub step_x: i64,
    pub step_y: i64,
}

impl LatticeWindow {
    /// Locates the window of `basis` around `origin` covering `extent`.
    ///
    /// Returns `None` when the basis is degenerate or the viewport lies too
    /// far away in lattice units to be indexed.
    pub fn locate(
        origin: Point,
        basis: &Basis,
        extent: &Extent,
        max_points_per_side: usize,
    ) -> Option<Self> {
        if basis.is_degenerate() {
            return None;
        }
        let center = basis.nearest(origin, extent.center())?;
        let render_origin = basis.point_at(origin, center);

        let mut lo = Vector::new(f64::INFINITY, f64::INFINITY);
        let mut hi = Vector::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for corner in extent.corners() {
            let v = basis.locate(render_origin, corner)?;
            lo = Vector::new(lo.x.min(v.x), lo.y.min(v.y));
            hi = Vector::new(hi.x.max(v.x), hi.y.max(v.y));
        }
        // Lattice points inside the view have coordinates within [lo, hi].
        let min = LatticeCoord::new(
            to_index((lo.x - EDGE_SLACK).ceil())?,
            to_index((lo.y - EDGE_SLACK).ceil())?,
        );
        let max = LatticeCoord::new(
            to_index((hi.x + EDGE_SLACK).floor())?,
            to_index((hi.y + EDGE_SLACK).floor())?,
        );

        let budget = i64::try_from(max_points_per_side.max(1)).unwrap_or(i64::MAX);
        Some(Self {
            render_origin,
            min,
            max,
            step_x: stride(max.xi - min.xi, budget),
            step_y: stride(max.yi - min.yi, budget),
        })
    }

    /// Multiples of `step_x` within `min.xi..=max.xi`.
    pub fn x_indices(&self) -> impl Iterator<Item = i64> {
        anchored(self.min.xi, self.max.xi, self.step_x)
    }

    /// Multiples of `step_y` within `min.yi..=max.yi`.
    pub fn y_indices(&self) -> impl Iterator<Item = i64> {
        anchored(self.min.yi, self.max.yi, self.step_y)
    }
}

/// Smallest stride visiting at most `budget + 1` indices over `span`.
fn stride(span: i64, budget: i64) -> i64 {
    let span = span.max(0);
    (span / budget + i64::from(span % budget != 0)).max(1)
}

/// Indices in `min..=max` that are multiples of `step`, so index 0 (the
/// render origin) is always on the walk.
fn anchored(min: i64, max: i64, step: i64) -> impl Iterator<Item = i64> {
    let mut first = min.div_euclid(step) * step;
    if first < min {
        first += step;
    }
    (first..=max).step_by(step as usize)
}

fn to_index(v: f64) -> Option<i64> {
    if v.is_finite() && v.abs() <= MAX_LATTICE_INDEX {
        Some(v as i64)
    } else {
        None
    }
}

/// Enumerates the grid points inside `extent`.
///
/// `local_scale` supplies the scale correction factors for the grid origin.
/// At most `max_points_per_side + 1` lattice indices are visited per axis,
/// so the cost is bounded independently of zoom. Points are emitted with the
/// x index outermost. A degenerate basis or an empty viewport yields no
/// points; errors from `local_scale` other than a degenerate grid are
/// returned.
pub fn enumerate_lattice_points<F>(
    description: &GridDescription,
    extent: &Extent,
    max_points_per_side: usize,
    local_scale: F,
) -> Result<Vec<Point>, GridError>
where
    F: FnOnce(Point) -> Result<Vector, GridError>,
{
    if extent.is_empty() {
        debug!("empty viewport, no grid points");
        return Ok(Vec::new());
    }
    let factors = match local_scale(description.origin) {
        Ok(f) => f,
        Err(e) if !e.is_fatal() => {
            warn!("grid not renderable: {}", e);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };
    let basis = Basis::corrected(description, factors);
    let Some(window) = LatticeWindow::locate(description.origin, &basis, extent, max_points_per_side)
    else {
        warn!("grid not renderable: collinear or unindexable basis");
        return Ok(Vec::new());
    };

    let mut points = Vec::new();
    for xi in window.x_indices() {
        for yi in window.y_indices() {
            let p = basis.point_at(window.render_origin, LatticeCoord::new(xi, yi));
            if extent.contains(p) {
                points.push(p);
            }
        }
    }
    debug!(
        "lattice window x {}..={} step {}, y {}..={} step {}: {} points",
        window.min.xi,
        window.max.xi,
        window.step_x,
        window.min.yi,
        window.max.yi,
        window.step_y,
        points.len()
    );
    Ok(points)
}

/// Grid point nearest to `target`, or `None` for a degenerate basis.
pub fn nearest_lattice_point(
    description: &GridDescription,
    basis: &Basis,
    target: Point,
) -> Option<Point> {
    let coord = basis.nearest(description.origin, target)?;
    Some(basis.point_at(description.origin, coord))
}
