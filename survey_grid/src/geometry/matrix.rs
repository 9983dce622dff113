//! 2×2 matrix helpers used to express vectors in a grid basis.

use nalgebra as na;

use super::Vector;

/// Relative tolerance below which two basis columns count as collinear.
pub const COLLINEAR_TOLERANCE: f64 = 1e-12;

/// A 2×2 matrix stored as its two column vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2 {
    pub col_x: Vector,
    pub col_y: Vector,
}

impl Matrix2 {
    pub fn from_columns(col_x: Vector, col_y: Vector) -> Self {
        Self { col_x, col_y }
    }

    pub fn determinant(&self) -> f64 {
        self.col_x.x * self.col_y.y - self.col_y.x * self.col_x.y
    }

    /// Returns `true` when the columns are (numerically) parallel or contain
    /// non-finite values, i.e. no inverse exists.
    pub fn is_singular(&self) -> bool {
        if !(self.col_x.is_finite() && self.col_y.is_finite()) {
            return true;
        }
        let det = self.determinant();
        let scale = self.col_x.length() * self.col_y.length();
        !det.is_finite() || det.abs() <= COLLINEAR_TOLERANCE * scale
    }

    /// Inverts the matrix, or returns `None` when the columns are collinear.
    pub fn inverse(&self) -> Option<Matrix2> {
        if self.is_singular() {
            return None;
        }
        let det = self.determinant();
        Some(Matrix2::from_columns(
            Vector::new(self.col_y.y / det, -self.col_x.y / det),
            Vector::new(-self.col_y.x / det, self.col_x.x / det),
        ))
    }

    /// Applies the matrix to `v`.
    pub fn mul_vector(&self, v: Vector) -> Vector {
        self.col_x * v.x + self.col_y * v.y
    }

    /// Expresses `z` in the coordinate system spanned by the columns.
    pub fn solve(&self, z: Vector) -> Option<Vector> {
        if self.is_singular() {
            return None;
        }
        let m = na::Matrix2::new(self.col_x.x, self.col_y.x, self.col_x.y, self.col_y.y);
        let v = m.lu().solve(&na::Vector2::new(z.x, z.y))?;
        Some(Vector::new(v.x, v.y))
    }
}
