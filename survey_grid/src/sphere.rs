//! Distance measurements between geographic points.

use crate::geometry::{self, Point};

/// Mean earth radius in meters used by [`Haversine::default`].
pub const EARTH_MEAN_RADIUS: f64 = 6_371_008.8;

/// Measures the real-world distance between two points expressed in the
/// reference geographic projection.
pub trait DistanceMetric {
    fn distance(&self, a: Point, b: Point) -> f64;
}

impl<M: DistanceMetric + ?Sized> DistanceMetric for &M {
    fn distance(&self, a: Point, b: Point) -> f64 {
        (**self).distance(a, b)
    }
}

/// Great-circle distance on a sphere for longitude/latitude pairs in degrees.
///
/// Only accurate for point pairs that do not span the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Haversine {
    pub radius: f64,
}

impl Haversine {
    pub fn with_radius(radius: f64) -> Self {
        Self { radius }
    }
}

impl Default for Haversine {
    fn default() -> Self {
        Self::with_radius(EARTH_MEAN_RADIUS)
    }
}

impl DistanceMetric for Haversine {
    fn distance(&self, a: Point, b: Point) -> f64 {
        let lat1 = a.y.to_radians();
        let lat2 = b.y.to_radians();
        let half_dlat = (lat2 - lat1) / 2.0;
        let half_dlon = (b.x - a.x).to_radians() / 2.0;
        let h = half_dlat.sin().powi(2) + half_dlon.sin().powi(2) * lat1.cos() * lat2.cos();
        2.0 * self.radius * h.sqrt().atan2((1.0 - h).sqrt())
    }
}

/// Straight-line distance, for maps whose units are already linear.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Euclidean;

impl DistanceMetric for Euclidean {
    fn distance(&self, a: Point, b: Point) -> f64 {
        geometry::distance(a, b)
    }
}
